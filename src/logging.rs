// 📝 Logging - tracing subscriber setup shared by both binaries

use std::io;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. RUST_LOG wins over `default_level`.
/// Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// `--verbose` forces debug; otherwise the configured level
pub fn level_for(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else if configured.trim().is_empty() {
        "info".to_string()
    } else {
        configured.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true, "warn"), "debug");
        assert_eq!(level_for(false, "warn"), "warn");
        assert_eq!(level_for(false, " "), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init("info");
        init("debug");
        tracing::info!("logging initialised");
    }
}
