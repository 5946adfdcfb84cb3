//! Usage: Localization queries for the window layer (languages, documents, active locale).

use crate::i18n::{Language, LocaleState, Translation};
use std::sync::Arc;

const MAX_LANGUAGE_CODE_LEN: usize = 35;

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct LanguageItem {
    code: Language,
    name: String,
    active: bool,
}

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct CurrentLocale {
    language: Language,
    translation: Translation,
}

/// Language codes are short BCP-47-ish tags; anything else is rejected before lookup.
pub(crate) fn validate_language_code(code: &str) -> Result<&str, String> {
    let code = code.trim();
    let well_formed = !code.is_empty()
        && code.len() <= MAX_LANGUAGE_CODE_LEN
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !well_formed {
        return Err(format!("SEC_INVALID_INPUT: invalid language code: {code:?}"));
    }
    Ok(code)
}

#[tauri::command]
pub(crate) fn i18n_languages_get(locales: tauri::State<'_, Arc<LocaleState>>) -> Vec<LanguageItem> {
    let active = locales.language();
    let store = locales.store();
    store
        .sorted_languages()
        .into_iter()
        .map(|code| LanguageItem {
            name: store.translation(code.as_str()).display_name().to_string(),
            active: code == active,
            code,
        })
        .collect()
}

/// Unknown codes yield the placeholder document, same as every other lookup.
#[tauri::command]
pub(crate) fn i18n_translation_get(
    locales: tauri::State<'_, Arc<LocaleState>>,
    code: String,
) -> Result<Translation, String> {
    let code = validate_language_code(&code)?;
    Ok(locales.store().translation(code).clone())
}

#[tauri::command]
pub(crate) fn i18n_current_get(locales: tauri::State<'_, Arc<LocaleState>>) -> CurrentLocale {
    CurrentLocale {
        language: locales.language(),
        translation: locales.locale(),
    }
}
