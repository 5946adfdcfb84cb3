//! Usage: Desktop resident mode (main window lifecycle while the tray icon is alive).

use std::sync::atomic::{AtomicBool, Ordering};

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";

pub struct ResidentState {
    tray_enabled: AtomicBool,
}

impl Default for ResidentState {
    fn default() -> Self {
        Self {
            tray_enabled: AtomicBool::new(true),
        }
    }
}

impl ResidentState {
    pub fn set_tray_enabled(&self, enabled: bool) {
        self.tray_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn tray_enabled(&self) -> bool {
        self.tray_enabled.load(Ordering::Relaxed)
    }
}

#[cfg(not(desktop))]
pub fn show_main_window(_app: &tauri::AppHandle) {}

#[cfg(not(desktop))]
pub fn on_window_event(_window: &tauri::Window, _event: &tauri::WindowEvent) {}

#[cfg(desktop)]
use tauri::Manager;

#[cfg(desktop)]
pub fn show_main_window(app: &tauri::AppHandle) {
    let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) else {
        tracing::warn!("主窗口不存在，无法显示");
        return;
    };

    let _ = window.show();
    let _ = window.unminimize();
    let _ = window.set_focus();
}

/// Closing the main window keeps the process alive behind the tray icon.
#[cfg(desktop)]
pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    let tauri::WindowEvent::CloseRequested { api, .. } = event else {
        return;
    };

    api.prevent_close();

    let resident = window.state::<ResidentState>();
    if resident.tray_enabled() {
        let _ = window.hide();
    } else {
        let _ = window.minimize();
    }
}
