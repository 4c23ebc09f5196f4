//! Scoped provisioning of a translator for nested callers.
//!
//! Passing an `Arc<Translator>` down the call chain is the preferred way to
//! reach it. When code cannot take it as a parameter, [`provide`] makes a
//! translator reachable through [`retrieve`] until the returned
//! [`ProvisionScope`] is dropped. Scopes nest per thread; the innermost
//! one wins.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::i18n::catalog::MessageCatalog;
use crate::i18n::locale::Locale;
use crate::i18n::translator::Translator;

thread_local! {
    /// Active scopes on this thread, innermost last.
    static SCOPES: RefCell<Vec<(u64, Arc<Translator>)>> = const { RefCell::new(Vec::new()) };
    /// Id handed to the next scope on this thread.
    static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

/// Error returned by [`retrieve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionError {
    /// No `provide` scope is active on the calling thread.
    NoActiveScope,
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveScope => write!(
                f,
                "no active provisioning scope: retrieve() must be called within provide()"
            ),
        }
    }
}

impl std::error::Error for ProvisionError {}

/// Guard that keeps a translator reachable until dropped.
///
/// Bound to the thread that created it.
#[must_use = "the translator is only reachable while the scope is alive"]
pub struct ProvisionScope {
    id: u64,
    translator: Arc<Translator>,
    _not_send: PhantomData<*const ()>,
}

impl ProvisionScope {
    /// What: Translator made reachable by this scope.
    #[must_use]
    pub fn translator(&self) -> &Arc<Translator> {
        &self.translator
    }
}

impl fmt::Debug for ProvisionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionScope")
            .field("id", &self.id)
            .field("locale", self.translator.locale())
            .finish()
    }
}

impl Drop for ProvisionScope {
    fn drop(&mut self) {
        let id = self.id;
        SCOPES.with_borrow_mut(|scopes| {
            if let Some(index) = scopes.iter().rposition(|(scope_id, _)| *scope_id == id) {
                scopes.remove(index);
            }
        });
    }
}

/// What: Build a translator for `(locale, catalog)` and make it reachable.
///
/// Inputs:
/// - `locale`: Locale for the new translator
/// - `catalog`: Catalog for the new translator
///
/// Output:
/// - `ProvisionScope` guard; the translator stays reachable until it is dropped
pub fn provide(
    locale: impl Into<Locale>,
    catalog: impl Into<Arc<MessageCatalog>>,
) -> ProvisionScope {
    provide_translator(Translator::create(locale, catalog))
}

/// What: Make an existing translator reachable.
pub fn provide_translator(translator: impl Into<Arc<Translator>>) -> ProvisionScope {
    let translator = translator.into();
    let id = NEXT_ID.with(|next| {
        let id = next.get();
        next.set(id.wrapping_add(1));
        id
    });
    SCOPES.with_borrow_mut(|scopes| scopes.push((id, Arc::clone(&translator))));
    tracing::trace!(
        scope = id,
        locale = %translator.locale(),
        "translator provisioned"
    );
    ProvisionScope {
        id,
        translator,
        _not_send: PhantomData,
    }
}

/// What: Fetch the innermost provisioned translator.
///
/// # Errors
/// - Returns `ProvisionError::NoActiveScope` when called outside every `provide` scope
pub fn retrieve() -> Result<Arc<Translator>, ProvisionError> {
    SCOPES.with_borrow(|scopes| {
        scopes
            .last()
            .map(|(_, translator)| Arc::clone(translator))
            .ok_or(ProvisionError::NoActiveScope)
    })
}

/// What: Run `f` with the innermost provisioned translator.
///
/// # Errors
/// - Returns `ProvisionError::NoActiveScope` when called outside every `provide` scope
pub fn with_translator<R>(f: impl FnOnce(&Translator) -> R) -> Result<R, ProvisionError> {
    let translator = retrieve()?;
    Ok(f(&translator))
}
