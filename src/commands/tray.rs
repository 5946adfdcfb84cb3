//! Usage: Programmatic tray control (same paths as menu clicks).

use super::i18n::validate_language_code;
use crate::app::tray::menus::{ApiServiceState, ColorTheme};
use crate::app::tray::TrayPhase;
use crate::app_state::TrayState;
use crate::i18n::{Language, LocaleState};
use std::sync::Arc;

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct TrayStatus {
    phase: TrayPhase,
    api_service: Option<ApiServiceState>,
    language: Language,
}

#[tauri::command]
pub(crate) fn tray_status_get(
    tray_state: tauri::State<'_, TrayState>,
    locales: tauri::State<'_, Arc<LocaleState>>,
) -> Result<TrayStatus, String> {
    let tray = tray_state.require()?;
    Ok(TrayStatus {
        phase: tray.phase(),
        api_service: tray.api_service_state(),
        language: locales.language(),
    })
}

#[tauri::command]
pub(crate) fn tray_language_set(
    tray_state: tauri::State<'_, TrayState>,
    code: String,
) -> Result<bool, String> {
    let code = validate_language_code(&code)?;
    Ok(tray_state.require()?.change_language(code))
}

#[tauri::command]
pub(crate) fn tray_theme_set(
    tray_state: tauri::State<'_, TrayState>,
    theme: String,
) -> Result<bool, String> {
    Ok(tray_state.require()?.change_theme(ColorTheme::parse(&theme)))
}

#[tauri::command]
pub(crate) fn tray_api_service_start(
    tray_state: tauri::State<'_, TrayState>,
) -> Result<bool, String> {
    Ok(tray_state.require()?.start_api_service())
}

#[tauri::command]
pub(crate) fn tray_api_service_stop(
    tray_state: tauri::State<'_, TrayState>,
) -> Result<bool, String> {
    Ok(tray_state.require()?.stop_api_service())
}
