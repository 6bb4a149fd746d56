use super::logging;
use super::render::{print_messages, render_config, render_matches, render_summary};
use super::setup::{Cli, Commands};
use clap::Parser;
use stackfind::api::{self, ConfigAction, FindApi, SearchTarget};
use stackfind::config::FindConfig;
use stackfind::error::Result;
use stackfind::find::{FindMode, FindParams};
use stackfind::store::fs::StackFile;
use stackfind::store::memory::MemoryStack;
use std::path::{Path, PathBuf};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_dir = FindConfig::default_dir()?;
    match cli.command {
        Commands::Find {
            stack,
            text,
            mode,
            from,
            field,
            marked,
            all,
        } => {
            let request = FindRequest {
                text: text.join(" "),
                mode,
                target: SearchTarget { from, field },
                marked,
                all,
            };
            handle_find(&config_dir, &stack, request)
        }
        Commands::Info { stack } => handle_info(&config_dir, &stack),
        Commands::Config { key, value } => handle_config(&config_dir, key, value),
    }
}

struct FindRequest {
    text: String,
    mode: Option<FindMode>,
    target: SearchTarget,
    marked: bool,
    all: bool,
}

fn open_stack(config_dir: &Path, stack: &Path) -> Result<FindApi<MemoryStack>> {
    let config = FindConfig::load(config_dir)?;
    let doc = StackFile::new(stack).load()?;
    Ok(FindApi::new(doc, config))
}

fn handle_find(config_dir: &Path, stack: &PathBuf, request: FindRequest) -> Result<()> {
    let mut api = open_stack(config_dir, stack)?;
    let mode = request.mode.unwrap_or(api.config().default_mode);
    let params = FindParams::new(mode, request.text).marked_only(request.marked);

    let result = if request.all {
        api.find_all(&request.target, params)?
    } else {
        api.find(&request.target, params)?
    };

    if !result.matches.is_empty() {
        println!(
            "{}",
            render_matches(&result.matches, api.config().context_width)
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_info(config_dir: &Path, stack: &PathBuf) -> Result<()> {
    let api = open_stack(config_dir, stack)?;
    let result = api.info()?;
    if let Some(summary) = &result.summary {
        print!("{}", render_summary(api.doc().name(), summary));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(config_dir: &Path, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = action == ConfigAction::ShowAll;

    let result = api::config(config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            println!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
