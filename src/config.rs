//! Runtime configuration.
//!
//! The bubbletea runtime constructs the model itself, so the binary installs
//! the parsed configuration process-wide before the program starts and
//! `App::init` reads it back.

use std::path::PathBuf;

use once_cell::sync::OnceCell;

/// Default service base URL (the public deployment).
pub const DEFAULT_API_URL: &str = "https://bookrecommenderbackend.onrender.com";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the recommendation service.
    pub api_url: String,
    /// Log destination, if logging was enabled.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            log_file: None,
        }
    }
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Installs the process-wide configuration.
    ///
    /// Returns `false` when a configuration was already installed; the
    /// existing one wins.
    pub fn set_global(config: Config) -> bool {
        CONFIG.set(config).is_ok()
    }

    /// The process-wide configuration; defaults when nothing was installed.
    pub fn global() -> &'static Config {
        CONFIG.get_or_init(Config::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_the_public_service() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn global_falls_back_to_default() {
        // Whatever earlier tests did, a global config is always available.
        assert!(!Config::global().api_url.is_empty());
    }
}
