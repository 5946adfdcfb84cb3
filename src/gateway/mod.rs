//! Usage: Local API service (bind, serve translations over HTTP, graceful stop).

mod routes;
pub(crate) mod service;

use crate::i18n::LocaleState;
use std::net::TcpListener;
use std::sync::Arc;
use tokio::sync::oneshot;

pub(crate) use routes::SWAGGER_PATH;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub(crate) struct GatewayStatus {
    pub(crate) running: bool,
    pub(crate) port: Option<u16>,
    pub(crate) base_url: Option<String>,
}

pub(crate) struct RunningGateway {
    host: String,
    port: u16,
    shutdown: oneshot::Sender<()>,
    task: tauri::async_runtime::JoinHandle<()>,
}

#[derive(Default)]
pub(crate) struct GatewayManager {
    running: Option<RunningGateway>,
}

fn base_url(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

impl GatewayManager {
    pub(crate) fn status(&self) -> GatewayStatus {
        match self.running.as_ref() {
            Some(running) => GatewayStatus {
                running: true,
                port: Some(running.port),
                base_url: Some(base_url(&running.host, running.port)),
            },
            None => GatewayStatus {
                running: false,
                port: None,
                base_url: None,
            },
        }
    }

    /// Binds synchronously so the caller learns about port conflicts right away, then serves on
    /// the async runtime. Starting an already running gateway returns its status.
    pub(crate) fn start(
        &mut self,
        host: &str,
        port: u16,
        locales: Arc<LocaleState>,
    ) -> Result<GatewayStatus, String> {
        if self.running.is_some() {
            return Ok(self.status());
        }

        let listener = TcpListener::bind((host, port))
            .map_err(|e| format!("failed to bind {host}:{port}: {e}"))?;
        listener
            .set_nonblocking(true)
            .map_err(|e| format!("failed to configure listener: {e}"))?;
        let bound_port = listener
            .local_addr()
            .map_err(|e| format!("failed to read listener address: {e}"))?
            .port();

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        let app = routes::router(locales);
        let task = tauri::async_runtime::spawn(async move {
            let listener = match tokio::net::TcpListener::from_std(listener) {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("网关监听器转换失败: {}", err);
                    return;
                }
            };
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(err) = served {
                tracing::error!("网关服务异常退出: {}", err);
            }
        });

        self.running = Some(RunningGateway {
            host: host.to_string(),
            port: bound_port,
            shutdown,
            task,
        });
        tracing::info!(host = %host, port = bound_port, "网关已启动");
        Ok(self.status())
    }

    /// Signals a graceful shutdown without waiting for in-flight requests.
    pub(crate) fn stop(&mut self) -> bool {
        let Some((shutdown, _task)) = self.take_running() else {
            return false;
        };
        let _ = shutdown.send(());
        tracing::info!("网关已停止");
        true
    }

    pub(crate) fn take_running(
        &mut self,
    ) -> Option<(oneshot::Sender<()>, tauri::async_runtime::JoinHandle<()>)> {
        self.running
            .take()
            .map(|running| (running.shutdown, running.task))
    }
}
