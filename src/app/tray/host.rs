//! Usage: Contracts between the tray core and its host (menu rendering, window runtime, API service).

use super::menus::ColorTheme;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuIcon {
    OpenWindow,
    ApiStart,
    ApiStop,
}

/// Declarative menu layout handed to the host once, when the tray becomes ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MenuEntry {
    Item {
        id: String,
        text: String,
        icon: Option<MenuIcon>,
    },
    Check {
        id: String,
        text: String,
        checked: bool,
    },
    Submenu {
        id: String,
        text: String,
        entries: Vec<MenuEntry>,
    },
    Separator,
}

impl MenuEntry {
    pub(crate) fn item(id: &str, text: &str, icon: Option<MenuIcon>) -> Self {
        Self::Item {
            id: id.to_string(),
            text: text.to_string(),
            icon,
        }
    }

    pub(crate) fn check(id: &str, text: &str, checked: bool) -> Self {
        Self::Check {
            id: id.to_string(),
            text: text.to_string(),
            checked,
        }
    }
}

/// Display-only updates of an installed tray menu. Failures are the host's to log.
pub(crate) trait TrayView: Send + Sync {
    fn set_text(&self, id: &str, text: &str);
    fn set_checked(&self, id: &str, checked: bool);
    fn set_icon(&self, id: &str, icon: MenuIcon);
    fn set_title(&self, title: &str);
    fn set_tooltip(&self, tooltip: &str);
}

pub(crate) trait TrayHost {
    /// Builds the tray icon + menu from `entries` and returns a handle for later updates.
    fn install_menu(&self, entries: &[MenuEntry]) -> Result<Arc<dyn TrayView>, String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MessageDialogOptions {
    pub(crate) title: String,
    pub(crate) message: String,
    pub(crate) buttons: Vec<String>,
    pub(crate) default_button: String,
    pub(crate) cancel_button: String,
}

pub(crate) trait WindowRuntime: Send + Sync {
    fn show(&self);
    fn open_url(&self, url: &str) -> Result<(), String>;
    fn set_title(&self, title: &str) -> Result<(), String>;
    fn set_theme(&self, theme: ColorTheme) -> Result<(), String>;
    fn emit(&self, event: &str, payload: serde_json::Value) -> Result<(), String>;
    /// Returns the label of the button the user picked.
    fn message_dialog(&self, options: &MessageDialogOptions) -> Result<String, String>;
    fn quit(&self);
}

/// The local API service started/stopped from the tray. Both calls must return quickly.
pub(crate) trait ServiceControl: Send + Sync {
    fn start(&self) -> bool;
    fn stop(&self) -> bool;
    fn docs_url(&self) -> String;
}
