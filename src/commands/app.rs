//! Usage: App-level Tauri commands (about panel, exit).

use crate::app_paths;
use crate::i18n::{Language, LocaleState};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, serde::Serialize)]
pub(crate) struct AppAboutInfo {
    app_name: String,
    app_version: String,
    platform: String,
    translations_dir: String,
    language: Language,
    language_count: usize,
}

fn about_info(locales: &LocaleState, translations_dir: &Path) -> AppAboutInfo {
    AppAboutInfo {
        app_name: locales.locale().app_name,
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        translations_dir: translations_dir.display().to_string(),
        language: locales.language(),
        language_count: locales.store().available_languages().len(),
    }
}

/// About panel data: localized app name, where translations are read from, what got loaded.
#[tauri::command]
pub(crate) fn app_about_get(
    app: tauri::AppHandle,
    locales: tauri::State<'_, Arc<LocaleState>>,
) -> Result<AppAboutInfo, String> {
    let dir = app_paths::translations_dir(&app)?;
    Ok(about_info(&locales, &dir))
}

/// Exits through the normal exit request so cleanup still runs.
#[tauri::command]
pub(crate) fn app_exit(app: tauri::AppHandle) -> Result<bool, String> {
    std::thread::spawn(move || {
        std::thread::sleep(std::time::Duration::from_millis(200));
        app.exit(0);
    });
    Ok(true)
}
