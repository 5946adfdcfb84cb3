use super::{MenuController, MenuOutcome};
use crate::app::tray::host::{MenuEntry, MenuIcon, TrayView};
use crate::i18n::Translation;
use std::sync::Arc;

pub(crate) const API_TOGGLE_ID: &str = "tray.api.toggle";
pub(crate) const API_SWAGGER_ID: &str = "tray.api.swagger";

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ApiServiceState {
    Stopped,
    Running,
}

pub(crate) trait ApiServiceListener: Send + Sync {
    /// Whether the service actually started.
    fn on_start(&self) -> bool;
    /// Whether the service actually stopped.
    fn on_stop(&self) -> bool;
    fn on_open_swagger(&self);
}

pub(crate) struct ApiServiceMenu {
    state: ApiServiceState,
    start_label: String,
    stop_label: String,
    swagger_label: String,
    listener: Option<Arc<dyn ApiServiceListener>>,
}

impl ApiServiceMenu {
    pub(crate) fn new(translation: &Translation) -> Self {
        Self {
            state: ApiServiceState::Stopped,
            start_label: translation.tray.api_start.clone(),
            stop_label: translation.tray.api_stop.clone(),
            swagger_label: translation.tray.open_swagger.clone(),
            listener: None,
        }
    }

    pub(crate) fn attach(&mut self, listener: Arc<dyn ApiServiceListener>) -> &mut Self {
        self.listener = Some(listener);
        self
    }

    pub(crate) fn state(&self) -> ApiServiceState {
        self.state
    }

    fn toggle_label(&self) -> &str {
        match self.state {
            ApiServiceState::Stopped => &self.start_label,
            ApiServiceState::Running => &self.stop_label,
        }
    }

    fn toggle_icon(&self) -> MenuIcon {
        match self.state {
            ApiServiceState::Stopped => MenuIcon::ApiStart,
            ApiServiceState::Running => MenuIcon::ApiStop,
        }
    }

    fn render(&self, view: &dyn TrayView) {
        view.set_text(API_TOGGLE_ID, self.toggle_label());
        view.set_icon(API_TOGGLE_ID, self.toggle_icon());
    }

    /// Starts the service unless it already runs. The state only flips when the listener
    /// reports success. Returns whether the service is running afterwards.
    pub(crate) fn click_start(&mut self, view: &dyn TrayView) -> bool {
        let Some(listener) = self.listener.clone() else {
            return false;
        };
        if self.state == ApiServiceState::Running {
            return true;
        }
        if listener.on_start() {
            self.state = ApiServiceState::Running;
            self.render(view);
            tracing::info!("API 服务已启动");
        } else {
            tracing::warn!("API 服务启动失败，保持停止状态");
        }
        self.state == ApiServiceState::Running
    }

    /// Mirror of [`Self::click_start`]. Returns whether the service is stopped afterwards.
    pub(crate) fn click_stop(&mut self, view: &dyn TrayView) -> bool {
        let Some(listener) = self.listener.clone() else {
            return false;
        };
        if self.state == ApiServiceState::Stopped {
            return true;
        }
        if listener.on_stop() {
            self.state = ApiServiceState::Stopped;
            self.render(view);
            tracing::info!("API 服务已停止");
        } else {
            tracing::warn!("API 服务停止失败，保持运行状态");
        }
        self.state == ApiServiceState::Stopped
    }
}

impl MenuController for ApiServiceMenu {
    fn entries(&self) -> Vec<MenuEntry> {
        vec![
            MenuEntry::item(API_TOGGLE_ID, self.toggle_label(), Some(self.toggle_icon())),
            MenuEntry::item(API_SWAGGER_ID, &self.swagger_label, None),
        ]
    }

    fn set_locale(&mut self, translation: &Translation, view: &dyn TrayView) {
        self.start_label = translation.tray.api_start.clone();
        self.stop_label = translation.tray.api_stop.clone();
        self.swagger_label = translation.tray.open_swagger.clone();
        view.set_text(API_TOGGLE_ID, self.toggle_label());
        view.set_text(API_SWAGGER_ID, &self.swagger_label);
    }

    fn detach(&mut self) {
        self.listener = None;
    }

    fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    fn on_menu_event(&mut self, id: &str, view: &dyn TrayView) -> MenuOutcome {
        if id != API_TOGGLE_ID && id != API_SWAGGER_ID {
            return MenuOutcome::NotMine;
        }
        let Some(listener) = self.listener.clone() else {
            return MenuOutcome::Detached;
        };

        if id == API_SWAGGER_ID {
            listener.on_open_swagger();
            return MenuOutcome::Handled;
        }

        match self.state {
            ApiServiceState::Stopped => self.click_start(view),
            ApiServiceState::Running => self.click_stop(view),
        };
        MenuOutcome::Handled
    }
}
