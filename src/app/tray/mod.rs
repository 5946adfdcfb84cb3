//! Usage: Tray coordinator (owns the menu controllers, routes clicks, broadcasts locale refreshes).
//!
//! Lifecycle: `Registered` (constructed, callbacks wired)
//! -> `Active` (after [`TrayCoordinator::on_ready`])
//! -> `Terminated` (after [`TrayCoordinator::on_quit`], absorbing).

pub(crate) mod actions;
pub(crate) mod host;
pub(crate) mod menus;
#[cfg(desktop)]
pub(crate) mod tauri_host;

use crate::i18n::{LocaleState, Translation};
use crate::shared::mutex_ext::MutexExt;
use actions::TrayActions;
use host::{MenuEntry, ServiceControl, TrayHost, TrayView, WindowRuntime};
use menus::display_language_options;
use menus::{
    ApiServiceMenu, ApiServiceState, ColorTheme, ColorThemeMenu, DisplayLanguageMenu,
    MenuController, MenuOutcome, OpenWindowMenu, QuitMenu,
};
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum TrayPhase {
    Registered,
    Active,
    Terminated,
}

struct Controllers {
    open_window: OpenWindowMenu,
    api_service: ApiServiceMenu,
    display_language: DisplayLanguageMenu,
    color_theme: ColorThemeMenu,
    quit: QuitMenu,
}

impl Controllers {
    fn build(locales: &LocaleState, actions: &Arc<TrayActions>) -> Self {
        let locale = locales.locale();
        let mut controllers = Self {
            open_window: OpenWindowMenu::new(&locale),
            api_service: ApiServiceMenu::new(&locale),
            display_language: DisplayLanguageMenu::new(
                &locale,
                display_language_options(locales.store()),
                locales.language(),
            ),
            color_theme: ColorThemeMenu::new(&locale),
            quit: QuitMenu::new(&locale),
        };
        controllers.open_window.attach(actions.clone());
        controllers.api_service.attach(actions.clone());
        controllers.display_language.attach(actions.clone());
        controllers.color_theme.attach(actions.clone());
        controllers.quit.attach(actions.clone());
        controllers
    }

    fn all_mut(&mut self) -> [&mut dyn MenuController; 5] {
        [
            &mut self.open_window,
            &mut self.api_service,
            &mut self.display_language,
            &mut self.color_theme,
            &mut self.quit,
        ]
    }

    fn layout(&mut self) -> Vec<MenuEntry> {
        let mut entries = Vec::new();
        for (index, controller) in self.all_mut().into_iter().enumerate() {
            if index > 0 {
                entries.push(MenuEntry::Separator);
            }
            entries.extend(controller.entries());
        }
        entries
    }
}

struct TrayInner {
    phase: TrayPhase,
    controllers: Option<Controllers>,
    view: Option<Arc<dyn TrayView>>,
}

impl TrayInner {
    fn active_parts(&mut self) -> Option<(&mut Controllers, Arc<dyn TrayView>)> {
        if self.phase != TrayPhase::Active {
            return None;
        }
        let view = self.view.clone()?;
        let controllers = self.controllers.as_mut()?;
        Some((controllers, view))
    }
}

pub(crate) struct TrayCoordinator {
    locales: Arc<LocaleState>,
    service: Arc<dyn ServiceControl>,
    window: OnceLock<Arc<dyn WindowRuntime>>,
    inner: Mutex<TrayInner>,
}

impl TrayCoordinator {
    pub(crate) fn new(locales: Arc<LocaleState>, service: Arc<dyn ServiceControl>) -> Self {
        Self {
            locales,
            service,
            window: OnceLock::new(),
            inner: Mutex::new(TrayInner {
                phase: TrayPhase::Registered,
                controllers: None,
                view: None,
            }),
        }
    }

    /// Assigns the window runtime handle. Only the first assignment is kept.
    pub(crate) fn set_window_runtime(&self, window: Arc<dyn WindowRuntime>) -> &Self {
        if self.window.set(window).is_err() {
            tracing::warn!("托盘窗口上下文已设置，忽略重复设置");
        }
        self
    }

    pub(crate) fn phase(&self) -> TrayPhase {
        self.inner.lock_or_recover().phase
    }

    /// Builds and attaches every controller, installs the menu through `host` and pushes the
    /// active locale. Only valid from `Registered`.
    pub(crate) fn on_ready(&self, host: &dyn TrayHost) -> Result<(), String> {
        let window = self
            .window
            .get()
            .cloned()
            .ok_or_else(|| "TRAY_NOT_READY: window runtime not set".to_string())?;

        let mut inner = self.inner.lock_or_recover();
        if inner.phase != TrayPhase::Registered {
            tracing::warn!(phase = ?inner.phase, "托盘已就绪或已退出，忽略重复的就绪回调");
            return Ok(());
        }

        let actions = Arc::new(TrayActions::new(
            self.locales.clone(),
            self.service.clone(),
            window,
        ));
        let mut controllers = Controllers::build(&self.locales, &actions);
        let view = host.install_menu(&controllers.layout())?;

        inner.controllers = Some(controllers);
        inner.view = Some(view);
        inner.phase = TrayPhase::Active;
        self.refresh_locked(&mut inner);
        tracing::info!(language = %self.locales.language(), "系统托盘已就绪");
        Ok(())
    }

    /// Detaches every controller, stops the API service and tells the window runtime to quit.
    /// Runs at most once.
    pub(crate) fn on_quit(&self) {
        {
            let mut inner = self.inner.lock_or_recover();
            if inner.phase == TrayPhase::Terminated {
                return;
            }
            if let Some(controllers) = inner.controllers.as_mut() {
                for controller in controllers.all_mut() {
                    controller.detach();
                }
            }
            inner.phase = TrayPhase::Terminated;
        }

        if !self.service.stop() {
            tracing::warn!("退出托盘时停止 API 服务失败");
        }
        if let Some(window) = self.window.get() {
            window.quit();
        }
        tracing::info!("系统托盘已退出");
    }

    /// Pushes the active Translation to the tray title/tooltip and every controller.
    pub(crate) fn update_locales(&self) {
        let mut inner = self.inner.lock_or_recover();
        self.refresh_locked(&mut inner);
    }

    fn refresh_locked(&self, inner: &mut TrayInner) {
        let Some((controllers, view)) = inner.active_parts() else {
            return;
        };
        let locale: Translation = self.locales.locale();
        view.set_title(&locale.app_name);
        view.set_tooltip(&locale.app_name);
        for controller in controllers.all_mut() {
            controller.set_locale(&locale, view.as_ref());
        }
    }

    /// Routes a host menu event by item id. Returns whether some attached controller took it.
    pub(crate) fn handle_menu_event(&self, id: &str) -> bool {
        let outcome = {
            let mut inner = self.inner.lock_or_recover();
            let Some((controllers, view)) = inner.active_parts() else {
                return false;
            };

            let mut outcome = MenuOutcome::NotMine;
            for controller in controllers.all_mut() {
                if !controller.is_attached() {
                    continue;
                }
                outcome = controller.on_menu_event(id, view.as_ref());
                if !matches!(outcome, MenuOutcome::NotMine) {
                    break;
                }
            }
            outcome
        };

        match outcome {
            MenuOutcome::Deferred(work) => {
                work();
                true
            }
            MenuOutcome::LocaleChanged => {
                self.update_locales();
                true
            }
            other => {
                if matches!(other, MenuOutcome::NotMine) {
                    tracing::debug!(id = %id, "未知的托盘菜单项");
                }
                other.is_routed()
            }
        }
    }

    pub(crate) fn start_api_service(&self) -> bool {
        let mut inner = self.inner.lock_or_recover();
        let Some((controllers, view)) = inner.active_parts() else {
            return false;
        };
        controllers.api_service.click_start(view.as_ref())
    }

    pub(crate) fn stop_api_service(&self) -> bool {
        let mut inner = self.inner.lock_or_recover();
        let Some((controllers, view)) = inner.active_parts() else {
            return false;
        };
        controllers.api_service.click_stop(view.as_ref())
    }

    pub(crate) fn api_service_state(&self) -> Option<ApiServiceState> {
        let inner = self.inner.lock_or_recover();
        inner.controllers.as_ref().map(|c| c.api_service.state())
    }

    /// Same path as clicking the language item. Returns whether the language changed.
    pub(crate) fn change_language(&self, code: &str) -> bool {
        let outcome = {
            let mut inner = self.inner.lock_or_recover();
            let Some((controllers, view)) = inner.active_parts() else {
                return false;
            };
            controllers
                .display_language
                .click_language(code, view.as_ref())
        };
        if !matches!(outcome, MenuOutcome::LocaleChanged) {
            return false;
        }
        self.update_locales();
        true
    }

    /// Same path as clicking the theme item. Returns whether `theme` is active afterwards.
    pub(crate) fn change_theme(&self, theme: ColorTheme) -> bool {
        let mut inner = self.inner.lock_or_recover();
        let Some((controllers, view)) = inner.active_parts() else {
            return false;
        };
        controllers.color_theme.click_theme(theme, view.as_ref());
        controllers.color_theme.active() == theme
    }
}
