//! Store location configuration

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Namespace every setting of the config store is grouped under
pub const DEFAULT_NAMESPACE: &str = "com.keepsafe.switchboard.settings";

/// Environment variable overriding the default store directory
pub const STORE_DIR_ENV: &str = "SWITCHBOARD_HOME";

/// Where and under which namespace a file-backed store keeps its settings
///
/// # Example
///
/// ```rust
/// use switchboard::{StoreConfig, DEFAULT_NAMESPACE};
///
/// let config = StoreConfig::default();
/// assert!(config.directory.is_none());
/// assert_eq!(config.namespace, DEFAULT_NAMESPACE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Explicit store directory; resolved with [`resolve_store_directory`] when `None`
    pub directory: Option<PathBuf>,
    /// File name stem of the namespace file
    pub namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            directory: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Config rooted at an explicit directory with the default namespace
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
            ..Self::default()
        }
    }

    /// Directory the store will use, after applying fallbacks
    pub fn resolved_directory(&self) -> Result<PathBuf> {
        resolve_store_directory(self.directory.as_deref())
    }
}

/// Resolve the settings directory
///
/// Priority:
/// 1. `manual_path`, if given
/// 2. the `SWITCHBOARD_HOME` environment variable
/// 3. the per-OS application data directory
///
/// The directory does not need to exist yet.
pub fn resolve_store_directory(manual_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = manual_path {
        return Ok(path.to_path_buf());
    }

    if let Some(env_path) = std::env::var_os(STORE_DIR_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }

    default_store_directory()
}

/// Default settings directory for the current operating system
fn default_store_directory() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        let home = std::env::var("HOME").map_err(|_| Error::MissingHomeDirectory("HOME"))?;
        Ok(PathBuf::from(home).join("Library/Application Support/switchboard"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").map_err(|_| Error::MissingHomeDirectory("APPDATA"))?;
        Ok(PathBuf::from(appdata).join("switchboard"))
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            if !config_home.is_empty() {
                return Ok(PathBuf::from(config_home).join("switchboard"));
            }
        }
        let home = std::env::var("HOME").map_err(|_| Error::MissingHomeDirectory("HOME"))?;
        Ok(PathBuf::from(home).join(".config/switchboard"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_path_wins() {
        let path = PathBuf::from("/tmp/switchboard-manual");
        assert_eq!(resolve_store_directory(Some(path.as_path())).unwrap(), path);
    }

    #[test]
    fn test_in_directory_keeps_default_namespace() {
        let config = StoreConfig::in_directory("/var/lib/app");
        assert_eq!(config.directory, Some(PathBuf::from("/var/lib/app")));
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
        assert_eq!(
            config.resolved_directory().unwrap(),
            PathBuf::from("/var/lib/app")
        );
    }
}
