//! Path management for portal configuration files.
//!
//! ```text
//! ~/.config/portal/
//! ├── config.toml        # PortalConfig
//! ├── secret.json        # API keys
//! ├── preferences.toml   # theme
//! └── logs/
//!     └── portal.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR: &str = "portal";

#[derive(Debug, Error)]
pub enum PathError {
    #[error("Cannot find the user configuration directory")]
    ConfigDirNotFound,
}

/// Resolves every file the shell reads or writes.
#[derive(Debug, Clone)]
pub struct PortalPaths {
    root: PathBuf,
}

impl PortalPaths {
    /// Uses `base` when given, otherwise `<user config dir>/portal`.
    pub fn new(base: Option<&Path>) -> Result<Self, PathError> {
        let root = match base {
            Some(path) => path.to_path_buf(),
            None => dirs::config_dir()
                .ok_or(PathError::ConfigDirNotFound)?
                .join(APP_DIR),
        };
        Ok(Self { root })
    }

    pub fn config_dir(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Keep this file private to the user (mode 600).
    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    pub fn preferences_file(&self) -> PathBuf {
        self.root.join("preferences.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}
