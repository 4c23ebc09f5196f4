//! Key resolution and formatting through the public `Translator` API.

use std::collections::BTreeMap;

use msgtree::i18n::{Arg, FormatError, MessageCatalog, MessageNode, Translator, Values};

fn tree(entries: Vec<(&str, MessageNode)>) -> MessageNode {
    MessageNode::Tree(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
    )
}

fn catalog(entries: Vec<(&str, MessageNode)>) -> MessageCatalog {
    match tree(entries) {
        MessageNode::Tree(root) => MessageCatalog::new(root),
        MessageNode::Leaf(_) => MessageCatalog::empty(),
    }
}

fn values(pairs: &[(&str, Arg)]) -> Values {
    pairs
        .iter()
        .map(|(name, arg)| ((*name).to_string(), arg.clone()))
        .collect()
}

#[test]
/// What: A leaf under nested trees is formatted with named values.
///
/// Inputs:
/// - Catalog `{a: {b: "Hello {name}"}}`, locale `en`, `name = World`
///
/// Output:
/// - `"Hello World"`
fn leaf_resolution_formats_values() {
    let translator = Translator::create(
        "en",
        catalog(vec![("a", tree(vec![("b", "Hello {name}".into())]))]),
    );
    let out = translator
        .translate("a.b", Some(&values(&[("name", Arg::from("World"))])))
        .expect("translate");
    assert_eq!(out, "Hello World");
}

#[test]
/// What: Keys naming a sub-tree, missing segments and unknown roots return the key.
///
/// Details:
/// - Covers the sub-tree case (`a`), the short-circuit case (`a.z.q`) and a key
///   that walks past a leaf (`a.b.c`)
fn misses_fall_back_to_key() {
    let translator = Translator::create("en", catalog(vec![("a", tree(vec![("b", "x".into())]))]));
    for key in ["a", "a.z.q", "a.b.c", "zzz", "a..b", "."] {
        assert_eq!(translator.translate(key, None).expect("miss"), key);
    }
}

#[test]
/// What: Static templates need no values.
fn static_text_without_values() {
    let translator = Translator::create("en", catalog(vec![("a", "static text".into())]));
    assert_eq!(translator.translate("a", None).expect("static"), "static text");
}

#[test]
/// What: Repeated calls give identical results.
fn repeated_calls_are_stable() {
    let translator = Translator::create(
        "en",
        catalog(vec![(
            "items",
            "{n, plural, one {# item} other {# items}}".into(),
        )]),
    );
    let vals = values(&[("n", Arg::from(3))]);
    let first = translator.translate("items", Some(&vals)).expect("first");
    let second = translator.translate("items", Some(&vals)).expect("second");
    assert_eq!(first, "3 items");
    assert_eq!(first, second);
}

#[test]
/// What: Malformed templates surface the formatter's syntax error.
fn malformed_template_propagates() {
    let translator = Translator::create("en", catalog(vec![("bad", "{count, plural, one {x}".into())]));
    let err = translator
        .translate("bad", Some(&values(&[("count", Arg::from(1))])))
        .expect_err("malformed");
    assert!(matches!(err, FormatError::Syntax { .. }), "{err}");
}

#[test]
/// What: Locale drives plural category selection.
fn locale_sensitive_plurals() {
    let messages = || {
        catalog(vec![(
            "files",
            "{n, plural, one {# plik} few {# pliki} many {# plików} other {# pliku}}".into(),
        )])
    };
    let polish = Translator::create("pl-PL", messages());
    assert_eq!(
        polish
            .translate("files", Some(&values(&[("n", Arg::from(22))])))
            .expect("pl"),
        "22 pliki"
    );
    let english = Translator::create("en-US", messages());
    assert_eq!(
        english
            .translate("files", Some(&values(&[("n", Arg::from(22))])))
            .expect("en"),
        "22 pliku"
    );
}

#[test]
/// What: A shared translator serves concurrent lookups.
fn concurrent_lookups() {
    let translator = std::sync::Arc::new(Translator::create(
        "en",
        catalog(vec![("greet", "Hi {who}".into())]),
    ));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let translator = std::sync::Arc::clone(&translator);
            std::thread::spawn(move || {
                let vals = values(&[("who", Arg::from(format!("#{i}")))]);
                translator.translate("greet", Some(&vals)).expect("translate")
            })
        })
        .collect();
    let mut results: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("thread"))
        .collect();
    results.sort();
    assert_eq!(results, vec!["Hi #0", "Hi #1", "Hi #2", "Hi #3"]);
}
