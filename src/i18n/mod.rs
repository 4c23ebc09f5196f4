//! Internationalization (i18n) core: nested catalogs, lookup and formatting.
//!
//! # Overview
//!
//! - **Catalog**: an immutable tree of templates ([`MessageCatalog`])
//! - **Translator**: resolves a dotted key against one catalog and formats the
//!   template for one locale ([`Translator::translate`])
//! - **Formatter**: the [`MessageFormatter`] seam; [`IcuFormatter`] handles
//!   `{name}`, `number`, `date`, `time`, `plural`, `selectordinal` and `select`
//!   arguments with locale-aware number and date rendering
//! - **Provisioning**: [`provide`] / [`retrieve`] for callers that cannot take
//!   the translator as a parameter
//! - **Loading**: locale files from disk ([`LocaleLoader`])
//!
//! # Locale Files
//!
//! Files live in a locales directory as `{locale}.yml`, `{locale}.yaml` or
//! `{locale}.json`. The nested structure is kept as a tree:
//!
//! ```yaml
//! app:
//!   titles:
//!     search: "Search"
//!   results: "{count, plural, one {# result} other {# results}}"
//! ```
//!
//! `app.titles.search` resolves to `"Search"`; `app.titles` is a sub-tree and
//! therefore a miss.
//!
//! # Usage
//!
//! ```rust
//! use msgtree::i18n::{Arg, MessageCatalog, MessageNode, Translator, Values};
//! use std::collections::BTreeMap;
//!
//! let mut root = BTreeMap::new();
//! root.insert(
//!     "greeting".to_string(),
//!     MessageNode::from("Hello {name}"),
//! );
//! let translator = Translator::create("en-US", MessageCatalog::new(root));
//!
//! let values: Values = [("name".to_string(), Arg::from("World"))].into_iter().collect();
//! assert_eq!(translator.translate("greeting", Some(&values)).unwrap(), "Hello World");
//! assert_eq!(translator.translate("missing.key", None).unwrap(), "missing.key");
//! ```
//!
//! # Error Handling
//!
//! - Missing keys (or keys naming a sub-tree) return the key itself and log at debug level
//! - Template errors from the formatter are returned unchanged
//! - `retrieve()` outside a `provide()` scope returns `ProvisionError::NoActiveScope`

pub mod catalog;
mod detection;
pub mod format;
mod loader;
mod locale;
pub mod provision;
mod translator;

pub use catalog::{CatalogError, MessageCatalog, MessageNode};
pub use detection::{detect_locale_with, detect_system_locale};
pub use format::{Arg, FormatError, Formatted, IcuFormatter, MessageFormatter, Part, Values};
pub use loader::{LoadError, LocaleLoader, load_catalog_file, load_locale_file};
pub use locale::{Locale, is_valid_locale_format};
pub use provision::{
    ProvisionError, ProvisionScope, provide, provide_translator, retrieve, with_translator,
};
pub use translator::Translator;
