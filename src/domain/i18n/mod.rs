//! Usage: Localization resources (document types, store, language resolution, active locale).

pub(crate) mod locale;
pub(crate) mod resolver;
pub(crate) mod store;
pub(crate) mod types;

pub(crate) use locale::LocaleState;
pub(crate) use resolver::{resolve_language, system_language_hint};
pub(crate) use store::TranslationStore;
pub(crate) use types::{Language, Translation};
