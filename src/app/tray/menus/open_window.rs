use super::{MenuController, MenuOutcome};
use crate::app::tray::host::{MenuEntry, MenuIcon, TrayView};
use crate::i18n::Translation;
use std::sync::Arc;

pub(crate) const OPEN_WINDOW_ID: &str = "tray.open_window";

pub(crate) trait OpenWindowListener: Send + Sync {
    fn on_open_window(&self);
}

pub(crate) struct OpenWindowMenu {
    label: String,
    listener: Option<Arc<dyn OpenWindowListener>>,
}

impl OpenWindowMenu {
    pub(crate) fn new(translation: &Translation) -> Self {
        Self {
            label: translation.tray.open_window.clone(),
            listener: None,
        }
    }

    pub(crate) fn attach(&mut self, listener: Arc<dyn OpenWindowListener>) -> &mut Self {
        self.listener = Some(listener);
        self
    }

    pub(crate) fn click(&mut self) -> MenuOutcome {
        let Some(listener) = self.listener.as_ref() else {
            return MenuOutcome::Detached;
        };
        listener.on_open_window();
        MenuOutcome::Handled
    }
}

impl MenuController for OpenWindowMenu {
    fn entries(&self) -> Vec<MenuEntry> {
        vec![MenuEntry::item(
            OPEN_WINDOW_ID,
            &self.label,
            Some(MenuIcon::OpenWindow),
        )]
    }

    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView) {
        self.label = translation.tray.open_window.clone();
        view.set_text(OPEN_WINDOW_ID, &self.label);
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn on_menu_event(&mut self, id: &str, _view: &dyn TrayView) -> MenuOutcome {
        if id != OPEN_WINDOW_ID {
            return MenuOutcome::NotMine;
        }
        self.click()
    }
}
