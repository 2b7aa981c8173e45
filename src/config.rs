//! Server configuration.
//!
//! A small `requiem.toml` controls the quote style used when wrapping
//! inserted specifiers and any extra module names offered next to the
//! runtime builtins. The workspace file wins over the user-level file;
//! a missing or malformed file degrades to defaults.

use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;
use serde::Deserialize;
use tracing::warn;

/// Configuration file name, looked up in the workspace root and in the
/// user configuration directory.
pub const CONFIG_FILE: &str = "requiem.toml";

/// Quote character wrapped around an inserted specifier when the user
/// has not typed one yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Single,
    Double,
}

impl QuoteStyle {
    pub fn quote_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Preferred quote style for inserted module specifiers.
    pub quote: QuoteStyle,
    /// Extra module names offered alongside the runtime builtins,
    /// e.g. host-provided modules like `electron`.
    pub extra_builtins: Vec<String>,
}

impl Config {
    /// Load configuration at startup: an explicit `--config` path wins,
    /// then the user configuration directory. Workspace configuration is
    /// applied later, once `initialize` reveals the root.
    pub fn load(explicit: Option<&Path>) -> Config {
        if let Some(path) = explicit {
            return Config::from_file(path).unwrap_or_else(|| {
                warn!(path = %path.display(), "could not read configuration, using defaults");
                Config::default()
            });
        }

        user_config_path()
            .and_then(|path| Config::from_file(&path))
            .unwrap_or_default()
    }

    /// Parse a configuration file, or `None` when it is missing or
    /// malformed. Malformed files are reported but never fatal.
    pub fn from_file(path: &Path) -> Option<Config> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed configuration");
                None
            }
        }
    }
}

fn user_config_path() -> Option<PathBuf> {
    let strategy = etcetera::choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("requiem").join(CONFIG_FILE))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_single_quotes_and_no_extras() {
        let config = Config::default();
        assert_eq!(config.quote, QuoteStyle::Single);
        assert_eq!(config.quote.quote_char(), '\'');
        assert!(config.extra_builtins.is_empty());
    }

    #[test]
    fn parses_a_full_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "quote = \"double\"\nextra_builtins = [\"electron\"]\n").unwrap();

        let config = Config::from_file(&path).expect("config should parse");
        assert_eq!(config.quote, QuoteStyle::Double);
        assert_eq!(config.quote.quote_char(), '"');
        assert_eq!(config.extra_builtins, vec!["electron".to_string()]);
    }

    #[test]
    fn partial_files_keep_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "quote = \"double\"\n").unwrap();

        let config = Config::from_file(&path).expect("config should parse");
        assert_eq!(config.quote, QuoteStyle::Double);
        assert!(config.extra_builtins.is_empty());
    }

    #[test]
    fn malformed_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "quote = [not toml").unwrap();
        assert!(Config::from_file(&path).is_none());
    }

    #[test]
    fn missing_file_is_none() {
        assert!(Config::from_file(Path::new("/nonexistent/requiem.toml")).is_none());
    }

    #[test]
    fn explicit_load_falls_back_to_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/requiem.toml")));
        assert_eq!(config.quote, QuoteStyle::Single);
    }
}
