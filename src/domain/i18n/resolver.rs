//! Usage: Language Resolver (pick an effective language for any requested code, never fail).

use super::store::TranslationStore;
use super::types::Language;

/// Returns `code` itself when it was loaded. Otherwise some loaded language is returned; which
/// one is implementation-defined (first key of the unordered map). With nothing loaded the
/// placeholder language is returned.
pub(crate) fn resolve_language(store: &TranslationStore, code: &str) -> Language {
    if store.has_language(code) {
        return Language::new(code);
    }
    store
        .available_languages()
        .first()
        .cloned()
        .unwrap_or_else(Language::placeholder)
}

/// Primary subtag of a POSIX/BCP-47 locale string: `zh_CN.UTF-8` -> `zh`, `en-US` -> `en`.
pub(crate) fn primary_subtag(locale: &str) -> &str {
    locale
        .split(['.', '@'])
        .next()
        .unwrap_or(locale)
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .trim()
}

const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// First usable locale from the environment, reduced to its primary subtag.
pub(crate) fn system_language_hint() -> Option<String> {
    system_language_hint_from(|key| std::env::var(key).ok())
}

fn system_language_hint_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    LOCALE_ENV_VARS.iter().find_map(|key| {
        let value = lookup(key)?;
        let code = primary_subtag(&value).to_ascii_lowercase();
        // "C" / "POSIX" carry no language.
        if code.is_empty() || code == "c" || code == "posix" {
            return None;
        }
        Some(code)
    })
}
