use super::{MenuController, MenuOutcome};
use crate::app::tray::host::{MenuEntry, TrayView};
use crate::i18n::{Language, Translation, TranslationStore};
use std::sync::Arc;

pub(crate) const DISPLAY_LANGUAGE_ID: &str = "tray.lang";
const LANGUAGE_ITEM_PREFIX: &str = "tray.lang.";

pub(crate) trait DisplayLanguageListener: Send + Sync {
    /// Whether the display language really changed to `language`.
    fn on_display_language_changed(&self, language: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LanguageOption {
    pub(crate) language: Language,
    pub(crate) label: String,
}

pub(crate) struct DisplayLanguageMenu {
    title: String,
    options: Vec<LanguageOption>,
    active: Language,
    listener: Option<Arc<dyn DisplayLanguageListener>>,
}

/// One option per loaded language, ordered by code, labelled with the document's own `lang.name`.
pub(crate) fn display_language_options(store: &TranslationStore) -> Vec<LanguageOption> {
    store
        .sorted_languages()
        .into_iter()
        .map(|language| {
            let label = store.translation(language.as_str()).display_name().to_string();
            LanguageOption { language, label }
        })
        .collect()
}

fn item_id(language: &Language) -> String {
    format!("{LANGUAGE_ITEM_PREFIX}{language}")
}

impl DisplayLanguageMenu {
    pub(crate) fn new(
        translation: &Translation,
        options: Vec<LanguageOption>,
        active: Language,
    ) -> Self {
        Self {
            title: translation.tray.display_language.clone(),
            options,
            active,
            listener: None,
        }
    }

    pub(crate) fn attach(&mut self, listener: Arc<dyn DisplayLanguageListener>) -> &mut Self {
        self.listener = Some(listener);
        self
    }

    pub(crate) fn active(&self) -> &Language {
        &self.active
    }

    fn render_checks(&self, view: &dyn TrayView) {
        for option in &self.options {
            view.set_checked(&item_id(&option.language), option.language == self.active);
        }
    }

    fn option_for_id(&self, id: &str) -> Option<&LanguageOption> {
        let code = id.strip_prefix(LANGUAGE_ITEM_PREFIX)?;
        self.options.iter().find(|o| o.language.as_str() == code)
    }

    /// Asks the listener to switch to `code`; the active language only moves on success.
    pub(crate) fn click_language(&mut self, code: &str, view: &dyn TrayView) -> MenuOutcome {
        let Some(listener) = self.listener.clone() else {
            return MenuOutcome::Detached;
        };

        let changed = listener.on_display_language_changed(code);
        if changed {
            self.active = Language::new(code);
        } else {
            tracing::warn!(language = %code, "显示语言未切换，保持当前语言");
        }
        // Check items flip themselves on click, so always redraw from our state.
        self.render_checks(view);

        if changed {
            MenuOutcome::LocaleChanged
        } else {
            MenuOutcome::Handled
        }
    }
}

impl MenuController for DisplayLanguageMenu {
    fn entries(&self) -> Vec<MenuEntry> {
        let entries = self
            .options
            .iter()
            .map(|o| MenuEntry::check(&item_id(&o.language), &o.label, o.language == self.active))
            .collect();
        vec![MenuEntry::Submenu {
            id: DISPLAY_LANGUAGE_ID.to_string(),
            text: self.title.clone(),
            entries,
        }]
    }

    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView) {
        self.title = translation.tray.display_language.clone();
        view.set_text(DISPLAY_LANGUAGE_ID, &self.title);
        self.render_checks(view);
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn on_menu_event(&mut self, id: &str, view: &dyn TrayView) -> MenuOutcome {
        let Some(option) = self.option_for_id(id) else {
            return MenuOutcome::NotMine;
        };
        let code = option.language.as_str().to_string();
        self.click_language(&code, view)
    }
}
