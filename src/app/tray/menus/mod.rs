//! Usage: Tray menu controllers (per-item state machines with attach/detach + locale refresh).

mod api_service;
mod color_theme;
mod display_language;
mod open_window;
mod quit;

pub(crate) use api_service::{ApiServiceListener, ApiServiceMenu, ApiServiceState};
pub(crate) use color_theme::{ColorTheme, ColorThemeListener, ColorThemeMenu};
pub(crate) use display_language::{
    display_language_options, DisplayLanguageListener, DisplayLanguageMenu,
};
pub(crate) use open_window::{OpenWindowListener, OpenWindowMenu};
pub(crate) use quit::{QuitListener, QuitMenu, QUIT_ID};

use super::host::{MenuEntry, TrayView};
use crate::i18n::Translation;

pub(crate) enum MenuOutcome {
    /// The id belongs to another controller.
    NotMine,
    /// The id is ours but the controller is detached; nothing was routed.
    Detached,
    Handled,
    /// The active language changed; every controller needs a locale refresh.
    LocaleChanged,
    /// Work that must run after the caller released its locks.
    Deferred(Box<dyn FnOnce() + Send>),
}

impl MenuOutcome {
    pub(crate) fn is_routed(&self) -> bool {
        !matches!(self, Self::NotMine | Self::Detached)
    }
}

pub(crate) trait MenuController: Send {
    fn entries(&self) -> Vec<MenuEntry>;
    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView);
    /// Safe to call when never attached, and more than once.
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
    fn on_menu_event(&mut self, id: &str, view: &dyn TrayView) -> MenuOutcome;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::super::host::{MenuIcon, TrayView};
    use crate::shared::mutex_ext::MutexExt;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct RecordingView {
        pub(crate) texts: Mutex<HashMap<String, String>>,
        pub(crate) checks: Mutex<HashMap<String, bool>>,
        pub(crate) icons: Mutex<HashMap<String, MenuIcon>>,
        pub(crate) title: Mutex<Option<String>>,
        pub(crate) tooltip: Mutex<Option<String>>,
    }

    impl RecordingView {
        pub(crate) fn text(&self, id: &str) -> Option<String> {
            self.texts.lock_or_recover().get(id).cloned()
        }

        pub(crate) fn checked(&self, id: &str) -> Option<bool> {
            self.checks.lock_or_recover().get(id).copied()
        }

        pub(crate) fn icon(&self, id: &str) -> Option<MenuIcon> {
            self.icons.lock_or_recover().get(id).copied()
        }
    }

    impl TrayView for RecordingView {
        fn set_text(&self, id: &str, text: &str) {
            self.texts
                .lock_or_recover()
                .insert(id.to_string(), text.to_string());
        }

        fn set_checked(&self, id: &str, checked: bool) {
            self.checks
                .lock_or_recover()
                .insert(id.to_string(), checked);
        }

        fn set_icon(&self, id: &str, icon: MenuIcon) {
            self.icons.lock_or_recover().insert(id.to_string(), icon);
        }

        fn set_title(&self, title: &str) {
            *self.title.lock_or_recover() = Some(title.to_string());
        }

        fn set_tooltip(&self, tooltip: &str) {
            *self.tooltip.lock_or_recover() = Some(tooltip.to_string());
        }
    }
}
