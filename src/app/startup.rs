//! Usage: Startup wiring that must succeed before the tray exists (translations, locale).

use crate::app_paths;
use crate::i18n::{system_language_hint, LocaleState, TranslationStore};
use crate::infra::assets::{AssetSource, EmbeddedBundle};
use std::path::Path;
use std::sync::Arc;

/// Loads translations from `dir` (extracting the bundled set there when missing) and picks the
/// initial language from `requested`.
pub(crate) fn load_locales_from(dir: &Path, requested: &str) -> Result<Arc<LocaleState>, String> {
    let source = AssetSource::resolve(dir, EmbeddedBundle::bundled())?;
    let store = TranslationStore::load(&source)?;
    Ok(Arc::new(LocaleState::new(Arc::new(store), requested)))
}

pub(crate) fn load_locales(app: &tauri::AppHandle) -> Result<Arc<LocaleState>, String> {
    let dir = app_paths::translations_dir(app)?;
    let requested = system_language_hint().unwrap_or_default();
    load_locales_from(&dir, &requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fs::test_support::unique_tmp_dir;

    #[test]
    fn missing_dir_is_populated_from_bundle() {
        let base = unique_tmp_dir("startup");
        let dir = base.join("translations");

        let locales = load_locales_from(&dir, "zh").expect("load");
        assert_eq!(locales.language().as_str(), "zh");
        assert!(dir.join("en.json").is_file());
        assert!(dir.join("zh.json").is_file());

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn existing_dir_wins_over_bundle() {
        let base = unique_tmp_dir("startup");
        let dir = base.join("translations");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(
            dir.join("de.json"),
            r#"{
                "lang": { "code": "de", "name": "Deutsch" },
                "appName": "Tray-Hub",
                "quitDialog": {
                    "message": "Beenden?",
                    "defaultButton": "Ja",
                    "cancelButton": "Nein"
                }
            }"#,
        )
        .expect("write");

        let locales = load_locales_from(&dir, "en").expect("load");
        assert!(!locales.store().has_language("en"));
        assert_eq!(locales.language().as_str(), "de");
        assert_eq!(locales.locale().app_name, "Tray-Hub");

        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn broken_external_document_fails_startup() {
        let base = unique_tmp_dir("startup");
        let dir = base.join("translations");
        std::fs::create_dir_all(&dir).expect("mkdir");
        std::fs::write(dir.join("en.json"), "{ not json").expect("write");

        let err = load_locales_from(&dir, "en").err().unwrap();
        assert!(err.contains("I18N_DECODE"), "{err}");

        let _ = std::fs::remove_dir_all(&base);
    }
}
