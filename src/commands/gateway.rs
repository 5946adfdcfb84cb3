//! Usage: Local API service status.

use crate::app_state::GatewayState;
use crate::gateway;
use crate::shared::mutex_ext::MutexExt;

#[tauri::command]
pub(crate) fn gateway_status(state: tauri::State<'_, GatewayState>) -> gateway::GatewayStatus {
    let manager = state.0.lock_or_recover();
    manager.status()
}
