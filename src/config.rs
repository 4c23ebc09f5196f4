//! Configuration loaded from `i18n.yml`.
//!
//! ```yaml
//! default_locale: en-US
//! locales_dir: config/locales
//! ```
//!
//! Both keys are optional. A relative `locales_dir` is resolved against the
//! directory that contains the config file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MSGTREE_CONFIG";

/// Locale used when neither flags, config nor environment name one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Settings read from `i18n.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Locale to use when none is given on the command line.
    pub default_locale: Option<String>,
    /// Directory holding `{locale}.yml` catalogs.
    pub locales_dir: Option<PathBuf>,
}

/// Error raised while reading the config file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io {
        /// Config path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not valid settings YAML.
    Parse {
        /// Config path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_norway::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl Settings {
    /// What: Load settings from a YAML file.
    ///
    /// # Errors
    /// - Returns `ConfigError::Io` when the file cannot be read
    /// - Returns `ConfigError::Parse` when the YAML is invalid or has unknown keys
    ///
    /// Details:
    /// - An empty file yields default settings
    /// - A relative `locales_dir` is anchored at the config file's directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut settings: Self =
            serde_norway::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        if let (Some(dir), Some(base)) = (settings.locales_dir.as_mut(), path.parent())
            && dir.is_relative()
        {
            *dir = base.join(&*dir);
        }
        tracing::debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }

    /// What: Locate and load settings, falling back to defaults.
    ///
    /// Inputs:
    /// - `explicit`: Path given on the command line, if any
    ///
    /// # Errors
    /// - Returns `ConfigError` when a located file cannot be read or parsed
    ///
    /// Details:
    /// - Order: `explicit`, then `$MSGTREE_CONFIG`, then [`find_config_file`]
    /// - No file found means default settings
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let located = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(|| find_config_file("i18n.yml"));
        match located {
            Some(path) => Self::load(&path),
            None => {
                tracing::debug!("no i18n.yml found, using default settings");
                Ok(Self::default())
            }
        }
    }
}

/// What: Find a config file in development and installed locations.
///
/// Inputs:
/// - `relative_path`: Relative path from config directory (e.g., "i18n.yml")
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/config/{relative_path}` first, then
///   `/usr/share/msgtree/config/{relative_path}`
#[must_use]
pub fn find_config_file(relative_path: &str) -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join(relative_path);
    if dev_path.is_file() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from("/usr/share/msgtree/config").join(relative_path);
    installed_path.is_file().then_some(installed_path)
}

/// What: Find the locales directory in development and installed locations.
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing locales directory found, or `None` if not found
///
/// Details:
/// - Tries `CARGO_MANIFEST_DIR/config/locales` first, then `/usr/share/msgtree/locales`
#[must_use]
pub fn find_locales_dir() -> Option<PathBuf> {
    let dev_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("locales");
    if dev_path.is_dir() {
        return Some(dev_path);
    }

    let installed_path = PathBuf::from("/usr/share/msgtree/locales");
    installed_path.is_dir().then_some(installed_path)
}
