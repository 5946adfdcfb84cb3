use super::{MenuController, MenuOutcome};
use crate::app::tray::host::{MenuEntry, TrayView};
use crate::i18n::Translation;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub(crate) const COLOR_THEME_ID: &str = "tray.theme";
const THEME_ITEM_PREFIX: &str = "tray.theme.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ColorTheme {
    Light,
    Dark,
    #[default]
    System,
}

impl ColorTheme {
    pub(crate) const ALL: [ColorTheme; 3] = [Self::Light, Self::Dark, Self::System];

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Unknown values mean "follow the system".
    pub(crate) fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }

    fn item_id(self) -> String {
        format!("{THEME_ITEM_PREFIX}{}", self.as_str())
    }

    fn label(self, translation: &Translation) -> &str {
        match self {
            Self::Light => &translation.tray.theme_light,
            Self::Dark => &translation.tray.theme_dark,
            Self::System => &translation.tray.theme_system,
        }
    }
}

pub(crate) trait ColorThemeListener: Send + Sync {
    /// Whether the window actually switched to `theme`.
    fn on_color_theme_changed(&self, theme: ColorTheme) -> bool;
}

pub(crate) struct ColorThemeMenu {
    title: String,
    labels: [String; 3],
    active: ColorTheme,
    listener: Option<Arc<dyn ColorThemeListener>>,
}

impl ColorThemeMenu {
    pub(crate) fn new(translation: &Translation) -> Self {
        Self {
            title: translation.tray.color_theme.clone(),
            labels: ColorTheme::ALL.map(|t| t.label(translation).to_string()),
            active: ColorTheme::default(),
            listener: None,
        }
    }

    pub(crate) fn attach(&mut self, listener: Arc<dyn ColorThemeListener>) -> &mut Self {
        self.listener = Some(listener);
        self
    }

    pub(crate) fn active(&self) -> ColorTheme {
        self.active
    }

    fn render_checks(&self, view: &dyn TrayView) {
        for theme in ColorTheme::ALL {
            view.set_checked(&theme.item_id(), theme == self.active);
        }
    }

    /// The active theme only moves when the listener reports success.
    pub(crate) fn click_theme(&mut self, theme: ColorTheme, view: &dyn TrayView) -> MenuOutcome {
        let Some(listener) = self.listener.clone() else {
            return MenuOutcome::Detached;
        };
        if listener.on_color_theme_changed(theme) {
            self.active = theme;
        } else {
            tracing::warn!(theme = theme.as_str(), "颜色主题未切换，保持当前主题");
        }
        self.render_checks(view);
        MenuOutcome::Handled
    }
}

impl MenuController for ColorThemeMenu {
    fn entries(&self) -> Vec<MenuEntry> {
        let entries = ColorTheme::ALL
            .iter()
            .zip(self.labels.iter())
            .map(|(theme, label)| MenuEntry::check(&theme.item_id(), label, *theme == self.active))
            .collect();
        vec![MenuEntry::Submenu {
            id: COLOR_THEME_ID.to_string(),
            text: self.title.clone(),
            entries,
        }]
    }

    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView) {
        self.title = translation.tray.color_theme.clone();
        self.labels = ColorTheme::ALL.map(|t| t.label(translation).to_string());
        view.set_text(COLOR_THEME_ID, &self.title);
        for (theme, label) in ColorTheme::ALL.iter().zip(self.labels.iter()) {
            view.set_text(&theme.item_id(), label);
        }
        self.render_checks(view);
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn on_menu_event(&mut self, id: &str, view: &dyn TrayView) -> MenuOutcome {
        let Some(theme) = ColorTheme::ALL.into_iter().find(|t| t.item_id() == id) else {
            return MenuOutcome::NotMine;
        };
        self.click_theme(theme, view)
    }
}
