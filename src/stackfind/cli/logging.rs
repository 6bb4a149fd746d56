use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "STACKFIND_LOG";

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "stackfind=debug"
    } else {
        "stackfind=warn"
    }
}

/// Installs a stderr subscriber. `STACKFIND_LOG` overrides the default filter.
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .without_time(),
    );

    // Already installed (tests); keep the existing one.
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_the_default_level() {
        assert_eq!(default_filter(false), "stackfind=warn");
        assert_eq!(default_filter(true), "stackfind=debug");
    }
}
