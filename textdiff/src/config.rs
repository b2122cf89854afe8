//! User configuration for textdiff.
//!
//! Read once at startup from `$XDG_CONFIG_HOME/textdiff/config.toml`. Every key
//! is optional and a missing or broken file yields the defaults: configuration
//! problems never prevent startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use textdiff_core::compare::DEFAULT_CACHE_CAPACITY;
use textdiff_core::DiffOptions;

/// Parsed `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `"dark"` or `"catppuccin-mocha"`.
    pub theme: String,
    pub ignore_punctuation: bool,
    pub diff_enabled: bool,
    /// Directory holding `workspace.db` and `textdiff.log`.
    pub data_dir: PathBuf,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Diff memo entries kept in memory.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            ignore_punctuation: false,
            diff_enabled: true,
            data_dir: PathBuf::from(".textdiff"),
            log_level: "info".to_owned(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Returns the path to the textdiff config file.
///
/// Prefers `$XDG_CONFIG_HOME/textdiff/config.toml`; falls back to
/// `~/.config/textdiff/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("textdiff").join("config.toml")
}

impl Config {
    /// Loads the config from [`config_path`].
    ///
    /// Returns the config plus a warning to report once logging is up. The
    /// subscriber is configured from this file, so the warning cannot be
    /// logged here.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> (Self, Option<String>) {
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(_) => return (Self::default(), None),
        };
        match toml::from_str(&raw) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default(),
                Some(format!("config parse error in {}: {e}", path.display())),
            ),
        }
    }

    /// Diff flags at startup.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            ignore_punctuation: self.ignore_punctuation,
            diff_enabled: self.diff_enabled,
        }
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("workspace.db")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("textdiff.log")
    }
}
