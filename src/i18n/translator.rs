//! Translator: dotted-key lookup followed by locale-aware formatting.

use std::fmt;
use std::sync::Arc;

use crate::i18n::catalog::MessageCatalog;
use crate::i18n::format::{FormatError, IcuFormatter, MessageFormatter, Values};
use crate::i18n::locale::Locale;

/// Binds one locale and one catalog to a formatter.
///
/// Cheap to clone and safe to share across threads; lookups never mutate
/// anything.
#[derive(Clone)]
pub struct Translator {
    locale: Locale,
    catalog: Arc<MessageCatalog>,
    formatter: Arc<dyn MessageFormatter>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .field("catalog", &self.catalog)
            .finish_non_exhaustive()
    }
}

impl Translator {
    /// What: Create a translator using the bundled `IcuFormatter`.
    ///
    /// Inputs:
    /// - `locale`: Locale passed to the formatter on every call
    /// - `catalog`: Message catalog (an empty one is allowed)
    ///
    /// Output:
    /// - `Translator` instance
    #[must_use]
    pub fn create(locale: impl Into<Locale>, catalog: impl Into<Arc<MessageCatalog>>) -> Self {
        Self::with_formatter(locale, catalog, IcuFormatter::new())
    }

    /// What: Create a translator with a custom formatting backend.
    #[must_use]
    pub fn with_formatter<F>(
        locale: impl Into<Locale>,
        catalog: impl Into<Arc<MessageCatalog>>,
        formatter: F,
    ) -> Self
    where
        F: MessageFormatter + 'static,
    {
        Self {
            locale: locale.into(),
            catalog: catalog.into(),
            formatter: Arc::new(formatter),
        }
    }

    /// What: Locale bound to this translator.
    #[must_use]
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// What: Catalog bound to this translator.
    #[must_use]
    pub fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// What: Translate a dotted key.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key (e.g., "app.titles.search")
    /// - `values`: Optional substitution values
    ///
    /// Output:
    /// - The formatted message, or `key` itself when it does not name a
    ///   non-empty leaf
    ///
    /// # Errors
    /// - Returns the formatter's `FormatError` unchanged when the resolved template
    ///   cannot be rendered (malformed syntax, missing or mistyped values)
    ///
    /// Details:
    /// - A key that stops on a sub-tree counts as missing
    /// - An empty template counts as missing, so untranslated placeholders
    ///   left blank in a catalog show their key
    /// - Multi-part formatter output is joined in order
    /// - Nothing is cached between calls
    pub fn translate(&self, key: &str, values: Option<&Values>) -> Result<String, FormatError> {
        let Some(template) = self
            .catalog
            .lookup(key)
            .filter(|template| !template.is_empty())
        else {
            tracing::debug!(
                "Missing translation key: '{}' (locale '{}'). Returning key as-is.",
                key,
                self.locale
            );
            return Ok(key.to_string());
        };
        let formatted = self.formatter.format(template, &self.locale, values)?;
        Ok(formatted.into_string())
    }
}
