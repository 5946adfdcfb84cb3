//! Usage: Persisted application settings (schema + read/write helpers).
//!
//! Language and theme are intentionally absent: the display language always starts from the
//! system locale and the theme from the system default.

use crate::app_paths;
use crate::shared::fs::read_optional_to_string;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

pub const SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_API_PORT: u16 = 10443;
const MIN_API_PORT: u16 = 1024;
pub const DEFAULT_API_LISTEN_HOST: &str = "127.0.0.1";
const SETTINGS_FILE_NAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub schema_version: u32,
    pub api_port: u16,
    pub api_listen_host: String,
    pub api_autostart: bool,
    pub tray_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            api_port: DEFAULT_API_PORT,
            api_listen_host: DEFAULT_API_LISTEN_HOST.to_string(),
            api_autostart: false,
            tray_enabled: true,
        }
    }
}

fn sanitize_api_listen_host(settings: &mut AppSettings) -> bool {
    let trimmed = settings.api_listen_host.trim();
    if trimmed.parse::<IpAddr>().is_ok() {
        if trimmed.len() != settings.api_listen_host.len() {
            settings.api_listen_host = trimmed.to_string();
            return true;
        }
        return false;
    }
    tracing::warn!(
        api_listen_host = %settings.api_listen_host,
        "监听地址无效，已恢复默认值"
    );
    settings.api_listen_host = DEFAULT_API_LISTEN_HOST.to_string();
    true
}

fn sanitize_schema_version(settings: &mut AppSettings, schema_version_present: bool) -> bool {
    // Missing schema_version forces a write so the file stops looking legacy.
    if schema_version_present && settings.schema_version == SCHEMA_VERSION {
        return false;
    }
    settings.schema_version = SCHEMA_VERSION;
    true
}

fn parse_settings_json(content: &str) -> Result<(AppSettings, bool), String> {
    let raw: serde_json::Value =
        serde_json::from_str(content).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    let schema_version_present = raw.get("schema_version").is_some();
    let settings: AppSettings =
        serde_json::from_value(raw).map_err(|e| format!("failed to parse settings.json: {e}"))?;
    Ok((settings, schema_version_present))
}

fn validate(settings: &AppSettings) -> Result<(), String> {
    if settings.api_port < MIN_API_PORT {
        return Err(format!(
            "SEC_INVALID_INPUT: api_port must be between {MIN_API_PORT} and 65535"
        ));
    }
    if settings.api_listen_host.trim().parse::<IpAddr>().is_err() {
        return Err("SEC_INVALID_INPUT: api_listen_host must be an IP address".to_string());
    }
    Ok(())
}

fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_paths::app_data_dir(app)?.join(SETTINGS_FILE_NAME))
}

pub fn read(app: &tauri::AppHandle) -> Result<AppSettings, String> {
    read_from(&settings_path(app)?)
}

pub fn write(app: &tauri::AppHandle, settings: &AppSettings) -> Result<AppSettings, String> {
    write_to(&settings_path(app)?, settings)
}

/// Reads `path`, creating it with defaults when missing. Repairable values are fixed and
/// persisted best-effort; an out-of-range port is reported instead of guessed.
pub(crate) fn read_from(path: &Path) -> Result<AppSettings, String> {
    let Some(content) = read_optional_to_string(path)? else {
        let settings = AppSettings::default();
        // Best-effort: create default settings.json on first read to make it discoverable.
        if let Err(err) = write_to(path, &settings) {
            tracing::warn!(path = %path.display(), "写入默认配置失败: {}", err);
        }
        return Ok(settings);
    };

    let (mut settings, schema_version_present) = parse_settings_json(&content)?;
    if settings.api_port < MIN_API_PORT {
        return Err(format!(
            "invalid settings.json: api_port must be between {MIN_API_PORT} and 65535"
        ));
    }

    let mut repaired = false;
    repaired |= sanitize_schema_version(&mut settings, schema_version_present);
    repaired |= sanitize_api_listen_host(&mut settings);
    if repaired {
        if let Err(err) = write_to(path, &settings) {
            tracing::warn!(path = %path.display(), "写入修复后的配置失败: {}", err);
        }
    }

    Ok(settings)
}

/// Validates then replaces `path` atomically, keeping the previous file as a backup until the
/// new one is in place.
pub(crate) fn write_to(path: &Path, settings: &AppSettings) -> Result<AppSettings, String> {
    validate(settings)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create settings dir: {e}"))?;
    }

    let tmp_path = path.with_file_name(format!("{SETTINGS_FILE_NAME}.tmp"));
    let backup_path = path.with_file_name(format!("{SETTINGS_FILE_NAME}.bak"));

    let content = serde_json::to_vec_pretty(settings)
        .map_err(|e| format!("failed to serialize settings: {e}"))?;

    std::fs::write(&tmp_path, content)
        .map_err(|e| format!("failed to write temp settings file: {e}"))?;

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    if path.exists() {
        std::fs::rename(path, &backup_path)
            .map_err(|e| format!("failed to create settings backup: {e}"))?;
    }

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::rename(&backup_path, path);
        return Err(format!("failed to finalize settings: {e}"));
    }

    if backup_path.exists() {
        let _ = std::fs::remove_file(&backup_path);
    }

    Ok(settings.clone())
}
