//! Catalog loading from locale files.

use std::fs;

use msgtree::i18n::{Arg, LoadError, LocaleLoader, Translator, Values, load_catalog_file};
use tempfile::TempDir;

#[test]
/// What: The bundled locale files load and render.
///
/// Details:
/// - Uses `config/locales` from the crate root
fn bundled_locales_render() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("locales");
    let mut loader = LocaleLoader::new(dir);

    let en = Translator::create("en-US", loader.load("en-US").expect("en-US"));
    let count: Values = [("count".to_string(), Arg::from(1))].into_iter().collect();
    assert_eq!(en.translate("app.results", Some(&count)).expect("en"), "1 result");
    assert_eq!(en.translate("app.titles.search", None).expect("en"), "Search");

    let de = Translator::create("de-DE", loader.load("de-DE").expect("de-DE"));
    let zero: Values = [("count".to_string(), Arg::from(0))].into_iter().collect();
    assert_eq!(
        de.translate("app.results", Some(&zero)).expect("de"),
        "Keine Ergebnisse"
    );

    assert_eq!(
        en.catalog().leaf_keys(),
        de.catalog().leaf_keys(),
        "bundled locales expose the same keys"
    );
}

#[test]
/// What: JSON catalogs load by explicit path and keep nesting.
fn json_catalog_by_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let path = temp_dir.path().join("messages.json");
    fs::write(
        &path,
        r#"{ "nav": { "home": "Home", "count": 3 }, "welcome": "Welcome, {user}!" }"#,
    )
    .expect("Failed to write catalog");

    let translator = Translator::create("en", load_catalog_file(&path).expect("catalog"));
    let user: Values = [("user".to_string(), Arg::from("ada"))].into_iter().collect();
    assert_eq!(
        translator.translate("welcome", Some(&user)).expect("welcome"),
        "Welcome, ada!"
    );
    assert_eq!(translator.translate("nav.count", None).expect("count"), "3");
    assert_eq!(translator.translate("nav", None).expect("nav"), "nav");
}

#[test]
/// What: Shape errors report the offending path.
fn invalid_catalog_reports_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let path = temp_dir.path().join("bad.yml");
    fs::write(&path, "menu:\n  items:\n    - one\n    - two\n").expect("Failed to write catalog");

    let err = load_catalog_file(&path).expect_err("sequence entry");
    assert!(matches!(err, LoadError::Catalog { .. }));
    assert!(err.to_string().contains("menu.items"), "{err}");
}
