use super::{MenuController, MenuOutcome};
use crate::app::tray::host::{MenuEntry, TrayView};
use crate::i18n::Translation;
use std::sync::Arc;

pub(crate) const QUIT_ID: &str = "tray.quit";

pub(crate) trait QuitListener: Send + Sync {
    fn on_quit(&self);
}

pub(crate) struct QuitMenu {
    label: String,
    listener: Option<Arc<dyn QuitListener>>,
}

impl QuitMenu {
    pub(crate) fn new(translation: &Translation) -> Self {
        Self {
            label: translation.tray.quit.clone(),
            listener: None,
        }
    }

    pub(crate) fn attach(&mut self, listener: Arc<dyn QuitListener>) -> &mut Self {
        self.listener = Some(listener);
        self
    }

    /// The confirmation prompt blocks, so the listener call is handed back as deferred work.
    pub(crate) fn click(&mut self) -> MenuOutcome {
        let Some(listener) = self.listener.clone() else {
            return MenuOutcome::Detached;
        };
        MenuOutcome::Deferred(Box::new(move || listener.on_quit()))
    }
}

impl MenuController for QuitMenu {
    fn entries(&self) -> Vec<MenuEntry> {
        vec![MenuEntry::item(QUIT_ID, &self.label, None)]
    }

    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView) {
        self.label = translation.tray.quit.clone();
        view.set_text(QUIT_ID, &self.label);
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn on_menu_event(&mut self, id: &str, _view: &dyn TrayView) -> MenuOutcome {
        if id != QUIT_ID {
            return MenuOutcome::NotMine;
        }
        self.click()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::RecordingView;
    use super::*;
    use crate::i18n::types::TRANSLATION_PLACEHOLDER;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter(AtomicUsize);

    impl QuitListener for Counter {
        fn on_quit(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn click_defers_listener_until_run() {
        let view = RecordingView::default();
        let counter = Arc::new(Counter::default());
        let mut menu = QuitMenu::new(&TRANSLATION_PLACEHOLDER);
        menu.attach(counter.clone());

        let MenuOutcome::Deferred(work) = menu.on_menu_event(QUIT_ID, &view) else {
            panic!("expected deferred quit");
        };
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
        work();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn detached_quit_does_nothing() {
        let view = RecordingView::default();
        let mut menu = QuitMenu::new(&TRANSLATION_PLACEHOLDER);
        menu.detach();
        assert!(matches!(
            menu.on_menu_event(QUIT_ID, &view),
            MenuOutcome::Detached
        ));
    }
}
