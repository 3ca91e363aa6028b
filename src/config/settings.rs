use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Where dpkg keeps its database of installed packages.
pub const DEFAULT_STATUS_FILE: &str = "/var/lib/dpkg/status";

/// Environment variable naming the config file to load.
pub const CONFIG_ENV: &str = "DPKG_INDEX_CONFIG";

/// Environment variable overriding `status_file`.
pub const STATUS_FILE_ENV: &str = "DPKG_INDEX_STATUS_FILE";

fn default_status_file() -> PathBuf {
    PathBuf::from(DEFAULT_STATUS_FILE)
}

/// Settings for reading the package database.
///
/// # Examples
///
/// ```rust
/// use dpkg_index::config::StatusConfig;
/// use std::path::Path;
///
/// let config: StatusConfig = toml::from_str(r#"status_file = "/tmp/status""#).unwrap();
/// assert_eq!(config.status_file, Path::new("/tmp/status"));
///
/// let defaults: StatusConfig = toml::from_str("").unwrap();
/// assert_eq!(defaults.status_file, Path::new("/var/lib/dpkg/status"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Path of the dpkg status file.
    #[serde(default = "default_status_file")]
    pub status_file: PathBuf,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            status_file: default_status_file(),
        }
    }
}

impl StatusConfig {
    /// Load configuration from the default location.
    ///
    /// Falls back to defaults when the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if the
    /// status file path cannot be expanded.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load configuration from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults. Environment overrides and path expansion
    /// are applied in both cases.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file contains invalid TOML
    /// - The status file path references an undefined variable
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path),
            None => Self::default_path().ok(),
        };

        match path {
            Some(path) if path.exists() => Self::load_from(&path).await,
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Self::default().resolve()
            }
            None => Self::default().resolve(),
        }
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read (permissions, not found, etc.)
    /// - The file contains invalid TOML syntax
    /// - The status file path references an undefined variable
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        config.resolve()
    }

    /// Default config file path.
    ///
    /// `DPKG_INDEX_CONFIG` wins when set; otherwise the platform config directory
    /// (`~/.config/dpkg-index/config.toml` on Linux).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Unable to determine config directory"))?;

        Ok(config_dir.join("dpkg-index").join("config.toml"))
    }

    /// Replace the status file path, expanding `~` and `$VAR`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path references an undefined variable.
    pub fn with_status_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.status_file = expand_path(path.as_ref())?;
        Ok(self)
    }

    /// Apply the `DPKG_INDEX_STATUS_FILE` override and expand the path.
    fn resolve(mut self) -> Result<Self> {
        if let Some(path) = std::env::var_os(STATUS_FILE_ENV) {
            debug!("{} overrides status_file", STATUS_FILE_ENV);
            self.status_file = PathBuf::from(path);
        }

        self.status_file = expand_path(&self.status_file)?;
        Ok(self)
    }
}

/// Expand `~` and environment variables in a path.
fn expand_path(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_string_lossy();

    let expanded = shellexpand::full(&path_str).with_context(|| {
        format!(
            "Failed to expand path: {path_str}\n\n\
            Check for undefined environment variables (e.g., $UNDEFINED_VAR)"
        )
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}
