//! Usage: Translation Store (load every `*.json` document once, answer lookups without failing).

use super::types::{Language, Translation, TRANSLATION_PLACEHOLDER};
use crate::infra::assets::AssetSource;
use std::collections::HashMap;

const TRANSLATION_FILE_SUFFIX: &str = ".json";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TranslationStore {
    translations: HashMap<Language, Translation>,
    // Snapshot of the map keys taken after loading; order is whatever the map yields.
    available: Vec<Language>,
}

impl TranslationStore {
    /// Loads all translation documents from `assets`. A single undecodable document fails the
    /// whole load; no partial store is ever returned.
    ///
    /// When two documents declare the same `lang.code`, the one visited later wins.
    pub(crate) fn load(assets: &AssetSource) -> Result<Self, String> {
        let mut translations: HashMap<Language, Translation> = HashMap::new();

        assets
            .walk(|entry| {
                if entry.is_dir || !entry.name.ends_with(TRANSLATION_FILE_SUFFIX) {
                    return Ok(());
                }

                let translation: Translation = assets.load_json(&entry.path)?;
                let language = translation.language();
                if translations.insert(language.clone(), translation).is_some() {
                    tracing::warn!(
                        language = %language,
                        path = %entry.path,
                        "翻译语言代码重复，后加载的文档覆盖之前的文档"
                    );
                }
                Ok(())
            })
            .map_err(|e| format!("failed to load i18n from {}: {e}", assets.describe()))?;

        let available: Vec<Language> = translations.keys().cloned().collect();
        tracing::info!(
            source = %assets.describe(),
            languages = ?available,
            "翻译资源加载完成"
        );

        Ok(Self {
            translations,
            available,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_translations(items: Vec<Translation>) -> Self {
        let translations: HashMap<Language, Translation> = items
            .into_iter()
            .map(|t| (t.language(), t))
            .collect();
        let available = translations.keys().cloned().collect();
        Self {
            translations,
            available,
        }
    }

    /// The document for `code`, or the placeholder document when `code` is unknown.
    pub(crate) fn translation(&self, code: &str) -> &Translation {
        self.translations
            .get(code)
            .unwrap_or(&*TRANSLATION_PLACEHOLDER)
    }

    pub(crate) fn has_language(&self, code: &str) -> bool {
        self.translations.contains_key(code)
    }

    pub(crate) fn available_languages(&self) -> &[Language] {
        &self.available
    }

    /// Available languages ordered by code, for UI lists that must not reshuffle between runs.
    pub(crate) fn sorted_languages(&self) -> Vec<Language> {
        let mut out = self.available.clone();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::assets::EmbeddedBundle;
    use crate::shared::fs::test_support::unique_tmp_dir;

    fn doc(code: &str, app_name: &str) -> String {
        format!(
            r#"{{
                "lang": {{ "code": "{code}" }},
                "appName": "{app_name}",
                "quitDialog": {{
                    "message": "quit {code}?",
                    "defaultButton": "ok-{code}",
                    "cancelButton": "no-{code}"
                }}
            }}"#
        )
    }

    fn en_zh_bundle() -> EmbeddedBundle {
        EmbeddedBundle::from_files([
            ("en.json", doc("en", "App")),
            ("zh.json", doc("zh", "应用")),
            ("README.md", "not a translation".to_string()),
        ])
    }

    #[test]
    fn load_indexes_every_json_document_by_declared_code() {
        let store = TranslationStore::load(&AssetSource::Embedded(en_zh_bundle())).expect("load");

        assert_eq!(store.available_languages().len(), 2);
        assert_eq!(
            store.sorted_languages(),
            vec![Language::from("en"), Language::from("zh")]
        );
        for language in store.available_languages() {
            let t = store.translation(language.as_str());
            assert_eq!(t.lang.code, language.as_str());
        }
        assert_eq!(store.translation("zh").app_name, "应用");
        assert_eq!(store.translation("en").quit_dialog.default_button, "ok-en");
    }

    #[test]
    fn file_name_does_not_decide_the_language() {
        let bundle = EmbeddedBundle::from_files([("whatever.json", doc("ja", "アプリ"))]);
        let store = TranslationStore::load(&AssetSource::Embedded(bundle)).expect("load");
        assert!(store.has_language("ja"));
        assert!(!store.has_language("whatever"));
    }

    #[test]
    fn unknown_code_yields_placeholder() {
        let store = TranslationStore::load(&AssetSource::Embedded(en_zh_bundle())).expect("load");
        for code in ["fr", "", "EN", "zh-CN"] {
            assert_eq!(store.translation(code), &*TRANSLATION_PLACEHOLDER);
            assert!(!store.has_language(code));
        }
    }

    #[test]
    fn decode_failure_aborts_the_whole_load() {
        let bundle = EmbeddedBundle::from_files([
            ("en.json", doc("en", "App")),
            ("zz.json", "{ broken".to_string()),
        ]);
        let err = TranslationStore::load(&AssetSource::Embedded(bundle)).unwrap_err();
        assert!(err.contains("I18N_DECODE"), "{err}");
    }

    #[test]
    fn directories_named_like_json_are_skipped() {
        let dir = unique_tmp_dir("store");
        std::fs::create_dir_all(dir.join("nested.json")).expect("mkdir");
        std::fs::write(dir.join("nested.json").join("en.json"), doc("en", "App")).expect("write");

        let store = TranslationStore::load(&AssetSource::Dir(dir.clone())).expect("load");
        assert_eq!(store.available_languages(), &[Language::from("en")]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_code_keeps_the_later_document() {
        let bundle = EmbeddedBundle::from_files([
            ("a.json", doc("en", "First")),
            ("b.json", doc("en", "Second")),
        ]);
        let store = TranslationStore::load(&AssetSource::Embedded(bundle)).expect("load");
        assert_eq!(store.available_languages().len(), 1);
        assert_eq!(store.translation("en").app_name, "Second");
    }

    #[test]
    fn empty_root_loads_an_empty_but_usable_store() {
        let dir = unique_tmp_dir("store");
        let store = TranslationStore::load(&AssetSource::Dir(dir.clone())).expect("load");
        assert!(store.available_languages().is_empty());
        assert_eq!(store.translation("en"), &*TRANSLATION_PLACEHOLDER);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn loading_twice_yields_the_same_map() {
        let dir = unique_tmp_dir("store");
        AssetSource::Embedded(en_zh_bundle())
            .extract(&dir)
            .expect("extract");
        let source = AssetSource::Dir(dir.clone());

        let first = TranslationStore::load(&source).expect("first");
        let second = TranslationStore::load(&source).expect("second");
        assert_eq!(first.translations, second.translations);
        assert_eq!(first.sorted_languages(), second.sorted_languages());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
