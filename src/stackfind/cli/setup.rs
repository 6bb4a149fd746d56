use clap::{Parser, Subcommand};
use stackfind::find::FindMode;
use std::path::PathBuf;

/// Returns the version string, with the git hash appended for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "stackfind", bin_name = "stackfind", version = get_version())]
#[command(about = "Find text in card stacks", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log search progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the next match in a stack
    #[command(alias = "f", display_order = 1)]
    Find {
        /// Stack file (.json or .json.gz)
        stack: PathBuf,

        /// Search text (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Match mode: begins, contains, whole-word, word-phrase, char-phrase
        #[arg(short, long)]
        mode: Option<FindMode>,

        /// Card to start from: id, #position or name (default: first card)
        #[arg(long, value_name = "CARD")]
        from: Option<String>,

        /// Only search this field: id or name
        #[arg(long, value_name = "FIELD")]
        field: Option<String>,

        /// Only search marked cards
        #[arg(long)]
        marked: bool,

        /// Report every match instead of the first
        #[arg(short, long)]
        all: bool,
    },

    /// Summarize what a search over a stack will see
    #[command(display_order = 2)]
    Info {
        /// Stack file (.json or .json.gz)
        stack: PathBuf,
    },

    /// Get or set configuration
    #[command(display_order = 3)]
    Config {
        /// Configuration key (default-mode, step-budget, context-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
