//! Usage: Settings read/write for the window layer.

use crate::{resident, settings};
use tauri::Manager;

#[tauri::command]
pub(crate) fn settings_get(app: tauri::AppHandle) -> Result<settings::AppSettings, String> {
    settings::read(&app)
}

/// Port and host changes apply on the next API service start.
#[tauri::command]
pub(crate) fn settings_set(
    app: tauri::AppHandle,
    update: settings::AppSettings,
) -> Result<settings::AppSettings, String> {
    let saved = settings::write(
        &app,
        &settings::AppSettings {
            schema_version: settings::SCHEMA_VERSION,
            ..update
        },
    )?;
    app.state::<resident::ResidentState>()
        .set_tray_enabled(saved.tray_enabled);
    tracing::info!(
        api_port = saved.api_port,
        api_autostart = saved.api_autostart,
        tray_enabled = saved.tray_enabled,
        "配置已保存"
    );
    Ok(saved)
}
