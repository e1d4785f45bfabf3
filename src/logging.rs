use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "MIRAGE_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs a stderr `fmt` subscriber. `MIRAGE_LOG` takes precedence over `RUST_LOG`.
///
/// Calling it again after a subscriber is installed is a no-op.
pub fn init() {
    let filter = filter_from_env(
        std::env::var(LOG_ENV_VAR).ok().as_deref(),
        std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
    );
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter_from_env(mirage_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    [mirage_log, rust_log]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| match EnvFilter::try_new(directives) {
            Ok(filter) => Some(filter),
            Err(err) => {
                eprintln!("ignoring invalid log filter {directives:?}: {err}");
                None
            }
        })
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirage_log_wins_over_rust_log() {
        let filter = filter_from_env(Some("mirage=trace"), Some("warn"));
        assert_eq!(filter.to_string(), "mirage=trace");
    }

    #[test]
    fn falls_back_to_rust_log_then_info() {
        assert_eq!(filter_from_env(None, Some("debug")).to_string(), "debug");
        assert_eq!(filter_from_env(Some("  "), None).to_string(), "info");
    }

    #[test]
    fn invalid_directives_are_skipped() {
        let filter = filter_from_env(Some("mirage=loud"), Some("warn"));
        assert_eq!(filter.to_string(), "warn");
    }
}
