//! Command execution: load the catalog, provision a translator, render.

use std::sync::Arc;

use msgtree::config::{Settings, find_locales_dir};
use msgtree::i18n::{
    LocaleLoader, MessageCatalog, detect_system_locale, load_catalog_file, provide, retrieve,
    with_translator,
};

use crate::args::utils::{collect_values, pick_locale};
use crate::args::{Args, CliError};

/// What: Execute the command described by `args`.
///
/// Output:
/// - Text to print on stdout (a rendered message or the key listing)
///
/// # Errors
/// - Returns `CliError` for config, catalog and formatting failures
///
/// Details:
/// - The translator is provisioned for the duration of the command and
///   rendering code fetches it through `retrieve()`
pub fn run(args: &Args) -> Result<String, CliError> {
    let settings = Settings::discover(args.config.as_deref())?;
    let locale = pick_locale(
        args.locale.as_deref(),
        settings.default_locale.as_deref(),
        detect_system_locale,
    );
    let catalog = load_catalog(args, &settings, &locale)?;
    tracing::info!(locale = %locale, "catalog ready");

    let _scope = provide(locale, catalog);
    if args.list_keys {
        return Ok(with_translator(|t| t.catalog().leaf_keys().join("\n"))?);
    }
    let key = args.key.as_deref().unwrap_or_default();
    render(key, args)
}

/// What: Load the catalog named by `--catalog` or the locale file for `locale`.
fn load_catalog(
    args: &Args,
    settings: &Settings,
    locale: &str,
) -> Result<Arc<MessageCatalog>, CliError> {
    if let Some(path) = &args.catalog {
        return Ok(Arc::new(load_catalog_file(path)?));
    }
    let dir = args
        .locales_dir
        .clone()
        .or_else(|| settings.locales_dir.clone())
        .or_else(find_locales_dir)
        .ok_or(CliError::NoLocalesDir)?;
    let mut loader = LocaleLoader::new(dir);
    tracing::debug!(dir = %loader.locales_dir().display(), locale, "loading locale catalog");
    Ok(loader.load(locale)?)
}

/// What: Translate `key` with the provisioned translator.
fn render(key: &str, args: &Args) -> Result<String, CliError> {
    let translator = retrieve()?;
    let values = collect_values(&args.args);
    Ok(translator.translate(key, values.as_ref())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
        let locales = temp_dir.path().join("locales");
        fs::create_dir(&locales).expect("Failed to create locales dir");
        fs::write(
            locales.join("en-US.yml"),
            "en-US:\n  app:\n    results: \"{count, plural, one {# result} other {# results}}\"\n    broken: \"{oops\"\n",
        )
        .expect("Failed to write locale file");
        fs::write(
            temp_dir.path().join("i18n.yml"),
            "default_locale: en-US\nlocales_dir: locales\n",
        )
        .expect("Failed to write config");
        temp_dir
    }

    fn parse(temp_dir: &TempDir, extra: &[&str]) -> Args {
        let config = temp_dir.path().join("i18n.yml");
        let mut argv = vec![
            "msgtree".to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| (*s).to_string()));
        Args::try_parse_from(argv).expect("valid args")
    }

    #[test]
    /// What: Keys render through the configured locales directory.
    fn renders_from_config() {
        let temp_dir = fixture();
        let args = parse(&temp_dir, &["app.results", "--arg", "count=2"]);
        assert_eq!(run(&args).expect("render"), "2 results");
    }

    #[test]
    /// What: Misses print the key; broken templates are errors.
    fn misses_and_errors() {
        let temp_dir = fixture();
        assert_eq!(
            run(&parse(&temp_dir, &["app"])).expect("miss"),
            "app"
        );
        assert!(matches!(
            run(&parse(&temp_dir, &["app.broken"])),
            Err(CliError::Format(_))
        ));
        assert!(matches!(
            run(&parse(&temp_dir, &["app.results", "--locale", "fr-FR"])),
            Err(CliError::Load(_))
        ));
    }

    #[test]
    /// What: Key listing prints every leaf key.
    fn lists_keys() {
        let temp_dir = fixture();
        assert_eq!(
            run(&parse(&temp_dir, &["--list-keys"])).expect("list"),
            "app.broken\napp.results"
        );
    }
}
