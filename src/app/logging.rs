//! Usage: Tracing subscriber setup (stderr + daily rolling file under `<app data>/logs`).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILTER_ENV: &str = "TRAY_HUB_LOG";
const DEFAULT_LOG_FILTER: &str = "info";
const LOG_FILE_PREFIX: &str = "tray-hub.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static INIT: OnceLock<()> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Installs the global subscriber once. Later calls are no-ops. File logging is skipped (with a
/// stderr warning) when the logs dir cannot be created.
pub(crate) fn init(app: &tauri::AppHandle) {
    INIT.get_or_init(|| {
        let _ = tracing_log::LogTracer::init();

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(env_filter());

        let file_layer = match app_paths::logs_dir(app) {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let _ = FILE_GUARD.set(guard);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(env_filter()),
                )
            }
            Err(err) => {
                eprintln!("file logging disabled: {err}");
                None
            }
        };

        let subscriber = tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer);
        if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("tracing subscriber already installed: {err}");
        }
    });
}
