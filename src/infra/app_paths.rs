//! Usage: Resolve per-user app data directory and related path helpers.

use std::path::{Path, PathBuf};
use tauri::Manager;

pub const APP_DOTDIR_NAME: &str = ".tray-i18n-hub";
const APP_DOTDIR_NAME_ENV: &str = "TRAY_I18N_HUB_DOTDIR_NAME";
const TRANSLATIONS_DIR_NAME: &str = "translations";
const LOGS_DIR_NAME: &str = "logs";

fn is_safe_dotdir_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if !name.starts_with('.') {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

fn dotdir_name_from(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| is_safe_dotdir_name(v))
        .unwrap_or_else(|| APP_DOTDIR_NAME.to_string())
}

pub fn app_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let home_dir = app
        .path()
        .home_dir()
        .map_err(|e| format!("failed to resolve home dir: {e}"))?;

    let dir = home_dir.join(dotdir_name_from(std::env::var(APP_DOTDIR_NAME_ENV).ok()));
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}

/// External translations root. Not created here: its absence means "extract the bundle".
pub fn translations_dir_in(app_dir: &Path) -> PathBuf {
    app_dir.join(TRANSLATIONS_DIR_NAME)
}

pub fn translations_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(translations_dir_in(&app_data_dir(app)?))
}

pub fn logs_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = app_data_dir(app)?.join(LOGS_DIR_NAME);
    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create logs dir: {e}"))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotdir_name_rejects_unsafe_values() {
        for name in ["", ".", "..", "tray", "./x", ".a/b", ".a\\b", ".a b", ".é"] {
            assert!(!is_safe_dotdir_name(name), "{name:?}");
        }
        for name in [".tray-i18n-hub", ".hub_dev", ".x.y"] {
            assert!(is_safe_dotdir_name(name), "{name:?}");
        }
    }

    #[test]
    fn dotdir_override_falls_back_to_default() {
        assert_eq!(dotdir_name_from(None), APP_DOTDIR_NAME);
        assert_eq!(dotdir_name_from(Some("../etc".to_string())), APP_DOTDIR_NAME);
        assert_eq!(dotdir_name_from(Some("  .hub-dev ".to_string())), ".hub-dev");
    }

    #[test]
    fn translations_dir_lives_under_app_dir() {
        let base = PathBuf::from("/home/u/.tray-i18n-hub");
        assert_eq!(
            translations_dir_in(&base),
            PathBuf::from("/home/u/.tray-i18n-hub/translations")
        );
    }
}
