mod app;
mod commands;
mod domain;
mod gateway;
mod infra;
mod shared;

pub(crate) use app::{app_state, resident};
pub(crate) use domain::i18n;
pub(crate) use infra::{app_paths, settings};

use app_state::{GatewayState, TrayState};
use commands::*;
use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default()
        .manage(GatewayState::default())
        .manage(TrayState::default())
        .manage(resident::ResidentState::default())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init());

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        resident::show_main_window(app);
    }));

    let app = builder
        .on_window_event(resident::on_window_event)
        .setup(|app| {
            crate::app::logging::init(app.handle());

            let settings = settings::read(app.handle()).unwrap_or_else(|err| {
                tracing::warn!("配置读取失败，使用默认值: {}", err);
                settings::AppSettings::default()
            });
            app.state::<resident::ResidentState>()
                .set_tray_enabled(settings.tray_enabled);

            let locales = crate::app::startup::load_locales(app.handle()).map_err(|err| {
                tracing::error!("翻译资源加载失败: {}", err);
                err
            })?;
            app.manage(locales.clone());

            #[cfg(desktop)]
            crate::app::tray::tauri_host::install(app.handle(), locales, &settings).map_err(
                |err| {
                    tracing::error!("系统托盘初始化失败: {}", err);
                    err
                },
            )?;

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            app_about_get,
            app_exit,
            gateway_status,
            settings_get,
            settings_set,
            i18n_languages_get,
            i18n_translation_get,
            i18n_current_get,
            tray_status_get,
            tray_language_set,
            tray_theme_set,
            tray_api_service_start,
            tray_api_service_stop
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| {
        if let tauri::RunEvent::ExitRequested { api, .. } = &event {
            api.prevent_exit();
            if !crate::app::cleanup::try_begin() {
                return;
            }

            tracing::info!("收到退出请求，开始清理...");
            let app_handle = app_handle.clone();
            tauri::async_runtime::spawn(async move {
                crate::app::cleanup::cleanup_before_exit(&app_handle).await;
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
                std::process::exit(0);
            });
            return;
        }

        #[cfg(target_os = "macos")]
        if let tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } = event
        {
            if !has_visible_windows {
                resident::show_main_window(app_handle);
            }
        }
    });
}
