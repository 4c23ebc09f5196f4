//! Errors surfaced by the command-line front end.

use std::fmt;

use msgtree::config::ConfigError;
use msgtree::i18n::{FormatError, LoadError, ProvisionError};

/// Anything that stops the CLI from printing a message.
#[derive(Debug)]
pub enum CliError {
    /// Config file could not be read.
    Config(ConfigError),
    /// Catalog could not be loaded.
    Load(LoadError),
    /// Resolved template could not be formatted.
    Format(FormatError),
    /// Translator was requested outside a provisioning scope.
    Provision(ProvisionError),
    /// No `--catalog`, `--locales-dir` or configured locales directory.
    NoLocalesDir,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Provision(err) => write!(f, "{err}"),
            Self::NoLocalesDir => write!(
                f,
                "no locales directory found; pass --catalog or --locales-dir, or set locales_dir in i18n.yml"
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Provision(err) => Some(err),
            Self::NoLocalesDir => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoadError> for CliError {
    fn from(value: LoadError) -> Self {
        Self::Load(value)
    }
}

impl From<FormatError> for CliError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<ProvisionError> for CliError {
    fn from(value: ProvisionError) -> Self {
        Self::Provision(value)
    }
}
