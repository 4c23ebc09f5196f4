//! Library entry for msgtree: nested message catalogs with locale-aware formatting.

pub mod config;
pub mod i18n;
