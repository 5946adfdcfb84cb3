//! Usage: `#[tauri::command]` entry points for the window layer.

mod app;
mod gateway;
mod i18n;
mod settings;
mod tray;

pub(crate) use app::*;
pub(crate) use gateway::*;
pub(crate) use i18n::*;
pub(crate) use settings::*;
pub(crate) use tray::*;
