//! Usage: Best-effort cleanup hooks for app lifecycle events (exit).

use super::app_state::{GatewayState, TrayState};
use crate::shared::mutex_ext::MutexExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tauri::Manager;

static CLEANUP_STARTED: AtomicBool = AtomicBool::new(false);

/// Returns `true` for exactly one caller per process.
pub(crate) fn try_begin() -> bool {
    !CLEANUP_STARTED.swap(true, Ordering::SeqCst)
}

pub(crate) async fn cleanup_before_exit(app: &tauri::AppHandle) {
    stop_gateway_best_effort(app).await;

    if let Some(tray) = app.state::<TrayState>().get() {
        tray.on_quit();
    }
}

pub(crate) async fn stop_gateway_best_effort(app: &tauri::AppHandle) {
    let running = {
        let state = app.state::<GatewayState>();
        let mut manager = state.0.lock_or_recover();
        manager.take_running()
    };

    let Some((shutdown, mut task)) = running else {
        return;
    };

    let _ = shutdown.send(());

    let stop_timeout = Duration::from_secs(3);
    if tokio::time::timeout(stop_timeout, &mut task).await.is_err() {
        tracing::warn!("退出清理：网关停止超时，正在中止服务器任务");
        task.abort();

        let abort_grace = Duration::from_secs(1);
        let _ = tokio::time::timeout(abort_grace, &mut task).await;
    }
}
