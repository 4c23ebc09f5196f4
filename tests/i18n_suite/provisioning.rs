//! Provisioning scope behavior seen from a nested caller.

use msgtree::i18n::{MessageCatalog, ProvisionError, provide, retrieve};

/// Deeply nested caller that only knows about `retrieve()`.
fn nested_caller(key: &str) -> Result<String, ProvisionError> {
    let translator = retrieve()?;
    Ok(translator
        .translate(key, None)
        .unwrap_or_else(|err| format!("error: {err}")))
}

fn catalog_yaml(yaml: &str) -> MessageCatalog {
    let doc: serde_norway::Value = serde_norway::from_str(yaml).expect("yaml");
    MessageCatalog::from_yaml_value(&doc).expect("catalog")
}

#[test]
/// What: Retrieval outside every scope fails deterministically.
fn no_scope_is_a_precondition_error() {
    for _ in 0..5 {
        assert_eq!(
            nested_caller("app.title"),
            Err(ProvisionError::NoActiveScope)
        );
    }
    let err = retrieve().expect_err("no scope");
    assert!(err.to_string().contains("no active provisioning scope"));
}

#[test]
/// What: Nested callers see the innermost scope and the outer one after it ends.
fn nested_callers_see_innermost_scope() {
    let _outer = provide("en-US", catalog_yaml("app:\n  title: \"Search\"\n"));
    assert_eq!(nested_caller("app.title"), Ok("Search".to_string()));
    {
        let _inner = provide("de-DE", catalog_yaml("app:\n  title: \"Suche\"\n"));
        assert_eq!(nested_caller("app.title"), Ok("Suche".to_string()));
        assert_eq!(nested_caller("app"), Ok("app".to_string()));
    }
    assert_eq!(nested_caller("app.title"), Ok("Search".to_string()));
}
