//! Unified path management for finpanel files.
//!
//! ```text
//! ~/.config/finpanel/          # Config directory
//! ├── config.toml              # Client configuration
//! ├── session.toml             # Session marker (present only while logged in)
//! └── logs/                    # Application logs
//!     └── finpanel.log.YYYY-MM-DD
//! ```
//!
//! `FINPANEL_CONFIG_DIR` replaces the platform directory when set.

use std::path::PathBuf;

pub const CONFIG_DIR_ENV: &str = "FINPANEL_CONFIG_DIR";
const APP_DIR_NAME: &str = "finpanel";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No platform config directory could be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for finpanel_core::FinpanelError {
    fn from(err: PathError) -> Self {
        finpanel_core::FinpanelError::config(err.to_string())
    }
}

/// Resolves every file location from one base directory.
#[derive(Debug, Clone)]
pub struct FinpanelPaths {
    base: PathBuf,
}

impl FinpanelPaths {
    /// Uses `base` when given, else the environment override, else the
    /// platform config directory.
    pub fn new(base: Option<PathBuf>) -> Result<Self, PathError> {
        let base = match base {
            Some(base) => base,
            None => match std::env::var_os(CONFIG_DIR_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => dirs::config_dir()
                    .ok_or(PathError::ConfigDirNotFound)?
                    .join(APP_DIR_NAME),
            },
        };
        Ok(Self { base })
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.base.join("session.toml")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_wins() {
        let paths = FinpanelPaths::new(Some(PathBuf::from("/tmp/fp"))).unwrap();
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/fp/config.toml"));
        assert_eq!(paths.session_file(), PathBuf::from("/tmp/fp/session.toml"));
        assert_eq!(paths.log_dir(), PathBuf::from("/tmp/fp/logs"));
    }
}
