//! Usage: `ServiceControl` backed by the managed `GatewayManager` (used by the tray API menu).

use super::{base_url, GatewayStatus, SWAGGER_PATH};
use crate::app::tray::host::ServiceControl;
use crate::app_state::GatewayState;
use crate::i18n::LocaleState;
use crate::settings;
use crate::shared::mutex_ext::MutexExt;
use std::sync::Arc;
use tauri::{Emitter, Manager};

pub(crate) const GATEWAY_STATUS_EVENT: &str = "gateway:status";

pub(crate) struct GatewayService {
    app: tauri::AppHandle,
    locales: Arc<LocaleState>,
}

impl GatewayService {
    pub(crate) fn new(app: tauri::AppHandle, locales: Arc<LocaleState>) -> Self {
        Self { app, locales }
    }

    fn emit_status(&self, status: &GatewayStatus) {
        if let Err(err) = self.app.emit(GATEWAY_STATUS_EVENT, status.clone()) {
            tracing::warn!("广播网关状态失败: {}", err);
        }
    }
}

impl ServiceControl for GatewayService {
    fn start(&self) -> bool {
        let cfg = settings::read(&self.app).unwrap_or_else(|err| {
            tracing::warn!("配置读取失败，使用默认值: {}", err);
            settings::AppSettings::default()
        });

        let result = {
            let state = self.app.state::<GatewayState>();
            let mut manager = state.0.lock_or_recover();
            manager.start(&cfg.api_listen_host, cfg.api_port, self.locales.clone())
        };

        match result {
            Ok(status) => {
                self.emit_status(&status);
                true
            }
            Err(err) => {
                tracing::error!(port = cfg.api_port, "网关启动失败: {}", err);
                false
            }
        }
    }

    fn stop(&self) -> bool {
        let status = {
            let state = self.app.state::<GatewayState>();
            let mut manager = state.0.lock_or_recover();
            manager.stop();
            manager.status()
        };
        self.emit_status(&status);
        true
    }

    fn docs_url(&self) -> String {
        let running = {
            let state = self.app.state::<GatewayState>();
            let manager = state.0.lock_or_recover();
            manager.status().base_url
        };
        let base = running.unwrap_or_else(|| {
            let cfg = settings::read(&self.app).unwrap_or_default();
            base_url(&cfg.api_listen_host, cfg.api_port)
        });
        format!("{base}{SWAGGER_PATH}")
    }
}
