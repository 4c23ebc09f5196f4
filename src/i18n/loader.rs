//! Locale file loading and parsing.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::i18n::catalog::{CatalogError, MessageCatalog};
use crate::i18n::locale::is_valid_locale_format;

/// File extensions tried, in order, for `{locale}.{ext}`.
const LOCALE_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// Error raised while loading a catalog file.
#[derive(Debug)]
pub enum LoadError {
    /// Locale code is empty or malformed.
    InvalidLocale(String),
    /// No file exists for the locale in the locales directory.
    NotFound {
        /// Locale that was requested.
        locale: String,
        /// Directory that was searched.
        dir: PathBuf,
    },
    /// File could not be read.
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// File exists but contains nothing.
    Empty(PathBuf),
    /// File is not valid YAML/JSON.
    Parse {
        /// File path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Parsed document does not have the shape of a catalog.
    Catalog {
        /// File path.
        path: PathBuf,
        /// Shape error.
        source: CatalogError,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocale(locale) => write!(
                f,
                "Invalid locale code format: '{locale}'. Expected format: language[-region] (e.g., 'en-US', 'de-DE')"
            ),
            Self::NotFound { locale, dir } => write!(
                f,
                "Locale file not found for '{locale}' in {} (tried .yml, .yaml, .json)",
                dir.display()
            ),
            Self::Io { path, source } => {
                write!(f, "Failed to read locale file {}: {source}", path.display())
            }
            Self::Empty(path) => write!(f, "Locale file is empty: {}", path.display()),
            Self::Parse { path, message } => write!(
                f,
                "Failed to parse locale file {}: {message}. Please check the file syntax.",
                path.display()
            ),
            Self::Catalog { path, source } => {
                write!(f, "Invalid catalog in {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Catalog { source, .. } => Some(source),
            Self::InvalidLocale(_)
            | Self::NotFound { .. }
            | Self::Empty(_)
            | Self::Parse { .. } => None,
        }
    }
}

/// What: Load the catalog for a locale from a locales directory.
///
/// Inputs:
/// - `locale`: Locale code (e.g., "de-DE")
/// - `locales_dir`: Path to locales directory
///
/// Output:
/// - `Result<MessageCatalog, LoadError>` containing the catalog or error
///
/// # Errors
/// - Returns `LoadError::InvalidLocale` when the locale code is empty or malformed
/// - Returns `LoadError::NotFound` when no `{locale}.yml|yaml|json` exists
/// - Returns the errors of [`load_catalog_file`] for the file that was found
///
/// Details:
/// - A document whose only top-level key is the locale code is unwrapped
pub fn load_locale_file(locale: &str, locales_dir: &Path) -> Result<MessageCatalog, LoadError> {
    if locale.is_empty() || !is_valid_locale_format(locale) {
        return Err(LoadError::InvalidLocale(locale.to_string()));
    }

    let file_path = LOCALE_EXTENSIONS
        .iter()
        .map(|ext| locales_dir.join(format!("{locale}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| LoadError::NotFound {
            locale: locale.to_string(),
            dir: locales_dir.to_path_buf(),
        })?;

    load_file(&file_path, Some(locale))
}

/// What: Load a catalog from an explicit file path.
///
/// # Errors
/// - Returns `LoadError::Io` when the file cannot be read
/// - Returns `LoadError::Empty` when the file has no content
/// - Returns `LoadError::Parse` when the YAML/JSON content cannot be parsed
/// - Returns `LoadError::Catalog` when the document is not a catalog
///
/// Details:
/// - `.json` files are parsed as JSON; everything else as YAML
pub fn load_catalog_file(path: &Path) -> Result<MessageCatalog, LoadError> {
    load_file(path, None)
}

/// Read, parse and convert one file, unwrapping a `locale:` wrapper if present.
fn load_file(path: &Path, locale: Option<&str>) -> Result<MessageCatalog, LoadError> {
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let parsed = if is_json {
        parse_locale_json(&contents, locale)
    } else {
        parse_locale_yaml(&contents, locale)
    };
    parsed.map_err(|err| match err {
        ParseFailure::Syntax(message) => LoadError::Parse {
            path: path.to_path_buf(),
            message,
        },
        ParseFailure::Shape(source) => LoadError::Catalog {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Parse failure before a path is attached.
enum ParseFailure {
    /// Parser rejected the text.
    Syntax(String),
    /// Document is not a catalog.
    Shape(CatalogError),
}

/// What: Parse YAML content into a `MessageCatalog`.
///
/// Details:
/// - If the root mapping has exactly one key equal to `locale`, its value is the catalog
fn parse_locale_yaml(yaml_content: &str, locale: Option<&str>) -> Result<MessageCatalog, ParseFailure> {
    let doc: serde_norway::Value = serde_norway::from_str(yaml_content)
        .map_err(|e| ParseFailure::Syntax(format!("Failed to parse YAML: {e}")))?;

    let root = match (&doc, locale) {
        (serde_norway::Value::Mapping(map), Some(locale)) if map.len() == 1 => {
            map.get(locale).unwrap_or(&doc)
        }
        _ => &doc,
    };
    MessageCatalog::from_yaml_value(root).map_err(ParseFailure::Shape)
}

/// What: Parse JSON content into a `MessageCatalog`, with the same wrapper rule as YAML.
fn parse_locale_json(json_content: &str, locale: Option<&str>) -> Result<MessageCatalog, ParseFailure> {
    let doc: serde_json::Value = serde_json::from_str(json_content)
        .map_err(|e| ParseFailure::Syntax(format!("Failed to parse JSON: {e}")))?;

    let root = match (&doc, locale) {
        (serde_json::Value::Object(map), Some(locale)) if map.len() == 1 => {
            map.get(locale).unwrap_or(&doc)
        }
        _ => &doc,
    };
    MessageCatalog::from_json_value(root).map_err(ParseFailure::Shape)
}

/// Locale loader that caches loaded catalogs.
#[derive(Debug)]
pub struct LocaleLoader {
    locales_dir: PathBuf,
    cache: HashMap<String, Arc<MessageCatalog>>,
}

impl LocaleLoader {
    /// What: Create a new `LocaleLoader`.
    ///
    /// Inputs:
    /// - `locales_dir`: Path to locales directory
    ///
    /// Output:
    /// - `LocaleLoader` instance
    #[must_use]
    pub fn new(locales_dir: PathBuf) -> Self {
        Self {
            locales_dir,
            cache: HashMap::new(),
        }
    }

    /// What: Load a locale catalog, using the cache if available.
    ///
    /// Inputs:
    /// - `locale`: Locale code to load
    ///
    /// Output:
    /// - Shared catalog for the locale
    ///
    /// # Errors
    /// - Returns `LoadError` when the locale file cannot be loaded (see `load_locale_file`)
    ///
    /// Details:
    /// - Caches catalogs to avoid re-reading files; failures are not cached
    /// - Logs warnings for missing, invalid or empty locale files
    pub fn load(&mut self, locale: &str) -> Result<Arc<MessageCatalog>, LoadError> {
        if let Some(catalog) = self.cache.get(locale) {
            return Ok(Arc::clone(catalog));
        }
        match load_locale_file(locale, &self.locales_dir) {
            Ok(catalog) => {
                if catalog.is_empty() {
                    tracing::warn!(
                        "Locale '{}' in {} has no translation keys; every key will show as-is",
                        locale,
                        self.locales_dir.display()
                    );
                }
                tracing::debug!(
                    "Loaded locale '{}' with {} translation keys",
                    locale,
                    catalog.leaf_keys().len()
                );
                let catalog = Arc::new(catalog);
                self.cache.insert(locale.to_string(), Arc::clone(&catalog));
                Ok(catalog)
            }
            Err(e) => {
                tracing::warn!("Failed to load locale '{}': {}", locale, e);
                Err(e)
            }
        }
    }

    /// What: Get locales directory path.
    #[must_use]
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    /// What: A locale-keyed wrapper is unwrapped and nesting preserved.
    fn parse_locale_yaml_unwraps_locale_key() {
        let yaml = r#"
de-DE:
  app:
    titles:
      search: "Suche"
      help: "Hilfe"
"#;
        let Ok(catalog) = parse_locale_yaml(yaml, Some("de-DE")) else {
            panic!("Failed to parse test locale YAML");
        };
        assert_eq!(catalog.lookup("app.titles.search"), Some("Suche"));
        assert_eq!(catalog.lookup("app.titles.help"), Some("Hilfe"));
        assert_eq!(catalog.lookup("app.titles"), None);
    }

    #[test]
    /// What: Documents without a wrapper are used as the root.
    fn parse_locale_yaml_without_wrapper() {
        let yaml = "app:\n  modals:\n    preflight:\n      title_install: \" Preflight: Install \"\n";
        let Ok(catalog) = parse_locale_yaml(yaml, Some("en-US")) else {
            panic!("Failed to parse test locale YAML");
        };
        assert_eq!(
            catalog.lookup("app.modals.preflight.title_install"),
            Some(" Preflight: Install ")
        );
    }

    #[test]
    /// What: Broken YAML is a syntax failure.
    fn parse_locale_yaml_invalid() {
        assert!(matches!(
            parse_locale_yaml("invalid: yaml: content: [", None),
            Err(ParseFailure::Syntax(_))
        ));
    }

    #[test]
    /// What: Locale files load from the directory, preferring `.yml`.
    fn load_locale_file_yaml_and_json() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let locales_dir = temp_dir.path();
        fs::write(
            locales_dir.join("test-LOCALE.yml"),
            "test-LOCALE:\n  app:\n    titles:\n      search: \"Test Search\"\n",
        )
        .expect("Failed to write test locale file");
        fs::write(
            locales_dir.join("fr.json"),
            r#"{ "app": { "titles": { "search": "Recherche" } } }"#,
        )
        .expect("Failed to write test locale file");

        let yaml = load_locale_file("test-LOCALE", locales_dir).expect("yaml locale");
        assert_eq!(yaml.lookup("app.titles.search"), Some("Test Search"));
        let json = load_locale_file("fr", locales_dir).expect("json locale");
        assert_eq!(json.lookup("app.titles.search"), Some("Recherche"));
    }

    #[test]
    /// What: Missing, malformed-code and empty files are distinct errors.
    fn load_locale_file_errors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let locales_dir = temp_dir.path();
        fs::write(locales_dir.join("empty.yml"), "  \n").expect("Failed to write empty file");
        fs::write(locales_dir.join("nulls.yml"), "app:\n  title: ~\n")
            .expect("Failed to write test locale file");

        assert!(matches!(
            load_locale_file("nonexistent", locales_dir),
            Err(LoadError::NotFound { .. })
        ));
        assert!(matches!(
            load_locale_file("invalid-format-", locales_dir),
            Err(LoadError::InvalidLocale(_))
        ));
        assert!(matches!(
            load_locale_file("empty", locales_dir),
            Err(LoadError::Empty(_))
        ));
        assert!(matches!(
            load_locale_file("nulls", locales_dir),
            Err(LoadError::Catalog { .. })
        ));
    }

    #[test]
    /// What: The loader caches successful loads.
    fn locale_loader_caching() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let locales_dir = temp_dir.path();
        let locale_file = locales_dir.join("cache-test.yml");
        fs::write(&locale_file, "app:\n  titles:\n    search: \"Cached\"\n")
            .expect("Failed to write test locale file");

        let mut loader = LocaleLoader::new(locales_dir.to_path_buf());
        let first = loader.load("cache-test").expect("Failed to load locale in test");
        fs::remove_file(&locale_file).expect("Failed to remove locale file");
        let second = loader
            .load("cache-test")
            .expect("Failed to load cached locale in test");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lookup("app.titles.search"), Some("Cached"));
        assert!(loader.load("other").is_err());
        assert_eq!(loader.locales_dir(), locales_dir);
    }

    #[test]
    /// What: A locale file with an empty mapping loads as an empty catalog.
    fn locale_loader_empty_mapping() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        fs::write(temp_dir.path().join("xx.yml"), "{}\n").expect("Failed to write locale file");

        let mut loader = LocaleLoader::new(temp_dir.path().to_path_buf());
        let catalog = loader.load("xx").expect("empty mapping is a valid catalog");
        assert!(catalog.is_empty());
        assert!(catalog.leaf_keys().is_empty());
    }
}
