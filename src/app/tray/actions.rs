//! Usage: Side effects behind tray clicks (window, API service, locale, theme, quit prompt).

use super::host::{MessageDialogOptions, ServiceControl, WindowRuntime};
use super::menus::{
    ApiServiceListener, ColorTheme, ColorThemeListener, DisplayLanguageListener,
    OpenWindowListener, QuitListener,
};
use crate::i18n::{LocaleState, Translation};
use std::sync::Arc;

pub(crate) const LANGUAGE_CHANGED_EVENT: &str = "onLanguageChanged";

/// Canonical affirmative label some dialog backends report regardless of the translated text.
const AFFIRMATIVE_BUTTON: &str = "Yes";

pub(crate) fn is_affirmative(selected: &str, translation: &Translation) -> bool {
    selected == AFFIRMATIVE_BUTTON || selected == translation.quit_dialog.default_button
}

pub(crate) fn quit_dialog_options(translation: &Translation) -> MessageDialogOptions {
    let dialog = &translation.quit_dialog;
    MessageDialogOptions {
        title: translation.app_name.clone(),
        message: dialog.message.clone(),
        buttons: vec![dialog.default_button.clone(), dialog.cancel_button.clone()],
        default_button: dialog.default_button.clone(),
        cancel_button: dialog.cancel_button.clone(),
    }
}

pub(crate) struct TrayActions {
    locales: Arc<LocaleState>,
    service: Arc<dyn ServiceControl>,
    window: Arc<dyn WindowRuntime>,
}

impl TrayActions {
    pub(crate) fn new(
        locales: Arc<LocaleState>,
        service: Arc<dyn ServiceControl>,
        window: Arc<dyn WindowRuntime>,
    ) -> Self {
        Self {
            locales,
            service,
            window,
        }
    }

    /// Shows the quit prompt in the active language. `Ok(true)` means the user confirmed.
    pub(crate) fn confirm_quit(&self) -> Result<bool, String> {
        let locale = self.locales.locale();
        let selected = self
            .window
            .message_dialog(&quit_dialog_options(&locale))
            .map_err(|e| format!("failed to open quit dialog: {e}"))?;
        Ok(is_affirmative(&selected, &locale))
    }
}

impl OpenWindowListener for TrayActions {
    fn on_open_window(&self) {
        self.window.show();
    }
}

impl ApiServiceListener for TrayActions {
    fn on_start(&self) -> bool {
        self.service.start()
    }

    fn on_stop(&self) -> bool {
        self.service.stop()
    }

    fn on_open_swagger(&self) {
        let url = self.service.docs_url();
        if let Err(err) = self.window.open_url(&url) {
            tracing::warn!(url = %url, "打开 API 文档失败: {}", err);
        }
    }
}

impl DisplayLanguageListener for TrayActions {
    fn on_display_language_changed(&self, language: &str) -> bool {
        if !self.locales.store().has_language(language) {
            tracing::warn!(language = %language, "请求的显示语言未加载");
            return false;
        }

        let app_name = &self.locales.store().translation(language).app_name;
        if let Err(err) = self.window.set_title(app_name) {
            tracing::warn!(language = %language, "更新窗口标题失败: {}", err);
            return false;
        }

        let applied = self.locales.change(language);
        if let Err(err) = self.window.emit(
            LANGUAGE_CHANGED_EVENT,
            serde_json::Value::String(applied.as_str().to_string()),
        ) {
            tracing::warn!(language = %applied, "广播语言切换事件失败: {}", err);
        }
        true
    }
}

impl ColorThemeListener for TrayActions {
    fn on_color_theme_changed(&self, theme: ColorTheme) -> bool {
        match self.window.set_theme(theme) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(theme = theme.as_str(), "切换窗口主题失败: {}", err);
                false
            }
        }
    }
}

impl QuitListener for TrayActions {
    fn on_quit(&self) {
        match self.confirm_quit() {
            Ok(true) => self.window.quit(),
            Ok(false) => {}
            Err(err) => {
                // Dialog failure is fatal.
                tracing::error!("{}", err);
                std::process::exit(1);
            }
        }
    }
}
