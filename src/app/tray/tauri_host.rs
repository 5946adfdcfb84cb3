//! Usage: Tauri-backed tray host (tray icon + native menu, window runtime, quit dialog).

use super::host::{MenuEntry, MenuIcon, MessageDialogOptions, TrayHost, TrayView, WindowRuntime};
use super::menus::{ColorTheme, QUIT_ID};
use super::TrayCoordinator;
use crate::app::resident::{self, MAIN_WINDOW_LABEL};
use crate::app_state::TrayState;
use crate::gateway::service::GatewayService;
use crate::i18n::LocaleState;
use crate::settings::AppSettings;
use std::collections::HashMap;
use std::sync::Arc;
use tauri::image::Image;
use tauri::menu::{
    CheckMenuItem, IconMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem, Submenu,
};
use tauri::tray::{MouseButton, MouseButtonState, TrayIcon, TrayIconBuilder, TrayIconEvent};
use tauri::{AppHandle, Emitter, Manager, Wry};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tauri_plugin_opener::OpenerExt;

const TRAY_ID: &str = "main-tray";

fn menu_icon(icon: MenuIcon) -> Result<Image<'static>, String> {
    let bytes: &'static [u8] = match icon {
        MenuIcon::OpenWindow => include_bytes!("../../../icons/open-window.png"),
        MenuIcon::ApiStart => include_bytes!("../../../icons/api-start.png"),
        MenuIcon::ApiStop => include_bytes!("../../../icons/api-stop.png"),
    };
    Image::from_bytes(bytes).map_err(|e| format!("failed to load menu icon {icon:?}: {e}"))
}

fn tray_icon() -> Result<Image<'static>, String> {
    #[cfg(target_os = "macos")]
    let icon_bytes = include_bytes!("../../../icons/tray.png");
    #[cfg(not(target_os = "macos"))]
    let icon_bytes = include_bytes!("../../../icons/32x32.png");

    Image::from_bytes(icon_bytes).map_err(|e| format!("failed to load tray icon: {e}"))
}

enum BuiltItem {
    Plain(MenuItem<Wry>),
    Icon(IconMenuItem<Wry>),
    Check(CheckMenuItem<Wry>),
    Submenu(Submenu<Wry>),
}

type Append<'a> = &'a dyn Fn(&dyn IsMenuItem<Wry>) -> tauri::Result<()>;

fn build_items(
    app: &AppHandle,
    entries: &[MenuEntry],
    items: &mut HashMap<String, BuiltItem>,
    append: Append<'_>,
) -> Result<(), String> {
    for entry in entries {
        match entry {
            MenuEntry::Item { id, text, icon } => {
                let built = match icon {
                    Some(icon) => {
                        let item = IconMenuItem::with_id(
                            app,
                            id.as_str(),
                            text,
                            true,
                            Some(menu_icon(*icon)?),
                            None::<&str>,
                        )
                        .map_err(|e| format!("failed to create tray menu item {id}: {e}"))?;
                        append(&item).map_err(|e| format!("failed to append {id}: {e}"))?;
                        BuiltItem::Icon(item)
                    }
                    None => {
                        let item = MenuItem::with_id(app, id.as_str(), text, true, None::<&str>)
                            .map_err(|e| format!("failed to create tray menu item {id}: {e}"))?;
                        append(&item).map_err(|e| format!("failed to append {id}: {e}"))?;
                        BuiltItem::Plain(item)
                    }
                };
                items.insert(id.clone(), built);
            }
            MenuEntry::Check { id, text, checked } => {
                let item =
                    CheckMenuItem::with_id(app, id.as_str(), text, true, *checked, None::<&str>)
                        .map_err(|e| format!("failed to create tray check item {id}: {e}"))?;
                append(&item).map_err(|e| format!("failed to append {id}: {e}"))?;
                items.insert(id.clone(), BuiltItem::Check(item));
            }
            MenuEntry::Submenu { id, text, entries } => {
                let submenu = Submenu::with_id(app, id.as_str(), text, true)
                    .map_err(|e| format!("failed to create tray submenu {id}: {e}"))?;
                build_items(app, entries, items, &|item| submenu.append(item))?;
                append(&submenu).map_err(|e| format!("failed to append {id}: {e}"))?;
                items.insert(id.clone(), BuiltItem::Submenu(submenu));
            }
            MenuEntry::Separator => {
                let separator = PredefinedMenuItem::separator(app)
                    .map_err(|e| format!("failed to create tray menu separator: {e}"))?;
                append(&separator).map_err(|e| format!("failed to append separator: {e}"))?;
            }
        }
    }
    Ok(())
}

fn dispatch_menu_event(app: &AppHandle, id: String) {
    let Some(tray) = app.state::<TrayState>().get() else {
        return;
    };
    if id == QUIT_ID {
        // The quit prompt blocks until answered; keep it off the event loop thread.
        std::thread::spawn(move || {
            tray.handle_menu_event(&id);
        });
        return;
    }
    tray.handle_menu_event(&id);
}

pub(crate) struct TauriTrayHost {
    app: AppHandle,
}

impl TrayHost for TauriTrayHost {
    fn install_menu(&self, entries: &[MenuEntry]) -> Result<Arc<dyn TrayView>, String> {
        let app = &self.app;
        let menu = Menu::new(app).map_err(|e| format!("failed to create tray menu: {e}"))?;
        let mut items = HashMap::new();
        build_items(app, entries, &mut items, &|item| menu.append(item))?;

        let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
            .icon(tray_icon()?)
            .menu(&menu);

        #[cfg(target_os = "macos")]
        let tray_builder = tray_builder.icon_as_template(true);

        let tray = tray_builder
            .show_menu_on_left_click(false)
            .on_menu_event(|app, event| {
                dispatch_menu_event(app, event.id().0.clone());
            })
            .on_tray_icon_event(|tray, event| {
                if let TrayIconEvent::Click {
                    button,
                    button_state,
                    ..
                } = event
                {
                    if button == MouseButton::Left && button_state == MouseButtonState::Up {
                        resident::show_main_window(tray.app_handle());
                    }
                }
            })
            .build(app)
            .map_err(|e| format!("failed to build tray icon: {e}"))?;

        Ok(Arc::new(TauriTrayView { tray, items }))
    }
}

struct TauriTrayView {
    tray: TrayIcon<Wry>,
    items: HashMap<String, BuiltItem>,
}

impl TrayView for TauriTrayView {
    fn set_text(&self, id: &str, text: &str) {
        let result = match self.items.get(id) {
            Some(BuiltItem::Plain(item)) => item.set_text(text),
            Some(BuiltItem::Icon(item)) => item.set_text(text),
            Some(BuiltItem::Check(item)) => item.set_text(text),
            Some(BuiltItem::Submenu(item)) => item.set_text(text),
            None => return,
        };
        if let Err(err) = result {
            tracing::warn!(id = %id, "更新托盘菜单文本失败: {}", err);
        }
    }

    fn set_checked(&self, id: &str, checked: bool) {
        let Some(BuiltItem::Check(item)) = self.items.get(id) else {
            return;
        };
        if let Err(err) = item.set_checked(checked) {
            tracing::warn!(id = %id, "更新托盘勾选状态失败: {}", err);
        }
    }

    fn set_icon(&self, id: &str, icon: MenuIcon) {
        let Some(BuiltItem::Icon(item)) = self.items.get(id) else {
            return;
        };
        let result = menu_icon(icon).and_then(|image| {
            item.set_icon(Some(image))
                .map_err(|e| format!("failed to set menu icon: {e}"))
        });
        if let Err(err) = result {
            tracing::warn!(id = %id, "更新托盘菜单图标失败: {}", err);
        }
    }

    fn set_title(&self, title: &str) {
        if let Err(err) = self.tray.set_title(Some(title)) {
            tracing::warn!("更新托盘标题失败: {}", err);
        }
    }

    fn set_tooltip(&self, tooltip: &str) {
        if let Err(err) = self.tray.set_tooltip(Some(tooltip)) {
            tracing::warn!("更新托盘提示失败: {}", err);
        }
    }
}

pub(crate) struct TauriWindowRuntime {
    app: AppHandle,
}

impl TauriWindowRuntime {
    fn main_window(&self) -> Result<tauri::WebviewWindow, String> {
        self.app
            .get_webview_window(MAIN_WINDOW_LABEL)
            .ok_or_else(|| "main window not found".to_string())
    }
}

impl WindowRuntime for TauriWindowRuntime {
    fn show(&self) {
        resident::show_main_window(&self.app);
    }

    fn open_url(&self, url: &str) -> Result<(), String> {
        self.app
            .opener()
            .open_url(url, None::<&str>)
            .map_err(|e| format!("failed to open {url}: {e}"))
    }

    fn set_title(&self, title: &str) -> Result<(), String> {
        self.main_window()?
            .set_title(title)
            .map_err(|e| format!("failed to set window title: {e}"))
    }

    fn set_theme(&self, theme: ColorTheme) -> Result<(), String> {
        let theme = match theme {
            ColorTheme::Light => Some(tauri::Theme::Light),
            ColorTheme::Dark => Some(tauri::Theme::Dark),
            ColorTheme::System => None,
        };
        self.main_window()?
            .set_theme(theme)
            .map_err(|e| format!("failed to set window theme: {e}"))
    }

    fn emit(&self, event: &str, payload: serde_json::Value) -> Result<(), String> {
        self.app
            .emit(event, payload)
            .map_err(|e| format!("failed to emit {event}: {e}"))
    }

    fn message_dialog(&self, options: &MessageDialogOptions) -> Result<String, String> {
        let confirmed = self
            .app
            .dialog()
            .message(options.message.as_str())
            .title(options.title.as_str())
            .kind(MessageDialogKind::Info)
            .buttons(MessageDialogButtons::OkCancelCustom(
                options.default_button.clone(),
                options.cancel_button.clone(),
            ))
            .blocking_show();

        Ok(if confirmed {
            options.default_button.clone()
        } else {
            options.cancel_button.clone()
        })
    }

    fn quit(&self) {
        self.app.exit(0);
    }
}

/// Registers the tray coordinator, installs the tray icon and drives it to `Active`.
pub(crate) fn install(
    app: &AppHandle,
    locales: Arc<LocaleState>,
    settings: &AppSettings,
) -> Result<Arc<TrayCoordinator>, String> {
    let tray = app.state::<TrayState>().get_or_register(|| {
        let service = Arc::new(GatewayService::new(app.clone(), locales.clone()));
        TrayCoordinator::new(locales.clone(), service)
    });
    tray.set_window_runtime(Arc::new(TauriWindowRuntime { app: app.clone() }))
        .on_ready(&TauriTrayHost { app: app.clone() })?;

    if settings.api_autostart && !tray.start_api_service() {
        tracing::warn!(port = settings.api_port, "API 服务自动启动失败");
    }

    Ok(tray)
}
