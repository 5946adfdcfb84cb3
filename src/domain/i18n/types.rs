//! Usage: Language / Translation document types and their always-available placeholders.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;

pub(crate) const LANGUAGE_PLACEHOLDER: &str = "en";

/// Opaque locale code ("en", "zh"). Equality is exact string match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Language(String);

impl Language {
    pub(crate) fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub(crate) fn placeholder() -> Self {
        Self::new(LANGUAGE_PLACEHOLDER)
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Language {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LangInfo {
    pub(crate) code: String,
    // Native display name, e.g. "简体中文". Older documents may omit it.
    #[serde(default)]
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuitDialog {
    pub(crate) message: String,
    pub(crate) default_button: String,
    pub(crate) cancel_button: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct TrayLabels {
    pub(crate) open_window: String,
    pub(crate) api_start: String,
    pub(crate) api_stop: String,
    pub(crate) open_swagger: String,
    pub(crate) display_language: String,
    pub(crate) color_theme: String,
    pub(crate) theme_light: String,
    pub(crate) theme_dark: String,
    pub(crate) theme_system: String,
    pub(crate) quit: String,
}

impl Default for TrayLabels {
    fn default() -> Self {
        Self {
            open_window: "Open Window".to_string(),
            api_start: "Start API Service".to_string(),
            api_stop: "Stop API Service".to_string(),
            open_swagger: "Open API Docs".to_string(),
            display_language: "Display Language".to_string(),
            color_theme: "Color Theme".to_string(),
            theme_light: "Light".to_string(),
            theme_dark: "Dark".to_string(),
            theme_system: "System".to_string(),
            quit: "Quit".to_string(),
        }
    }
}

/// One localized string bundle. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Translation {
    pub(crate) lang: LangInfo,
    pub(crate) app_name: String,
    pub(crate) quit_dialog: QuitDialog,
    #[serde(default)]
    pub(crate) tray: TrayLabels,
}

impl Translation {
    pub(crate) fn language(&self) -> Language {
        Language::new(self.lang.code.as_str())
    }

    /// Label for the language picker; falls back to the code when the document has no name.
    pub(crate) fn display_name(&self) -> &str {
        let name = self.lang.name.trim();
        if name.is_empty() {
            &self.lang.code
        } else {
            name
        }
    }
}

pub(crate) static TRANSLATION_PLACEHOLDER: LazyLock<Translation> = LazyLock::new(|| Translation {
    lang: LangInfo {
        code: LANGUAGE_PLACEHOLDER.to_string(),
        name: "English".to_string(),
    },
    app_name: "Tray I18n Hub".to_string(),
    quit_dialog: QuitDialog {
        message: "Are you sure you want to quit?".to_string(),
        default_button: "Yes".to_string(),
        cancel_button: "No".to_string(),
    },
    tray: TrayLabels::default(),
});
