//! Usage: Shared Tauri state types used by `commands/*` and the tray.

use crate::app::tray::TrayCoordinator;
use crate::gateway;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Default)]
pub(crate) struct GatewayState(pub(crate) Mutex<gateway::GatewayManager>);

/// Process-wide tray registration. The first `get_or_register` builds the coordinator; every
/// later call hands back the same instance.
#[derive(Default)]
pub(crate) struct TrayState(OnceLock<Arc<TrayCoordinator>>);

impl TrayState {
    pub(crate) fn get_or_register(
        &self,
        build: impl FnOnce() -> TrayCoordinator,
    ) -> Arc<TrayCoordinator> {
        self.0.get_or_init(|| Arc::new(build())).clone()
    }

    pub(crate) fn get(&self) -> Option<Arc<TrayCoordinator>> {
        self.0.get().cloned()
    }

    pub(crate) fn require(&self) -> Result<Arc<TrayCoordinator>, String> {
        self.get()
            .ok_or_else(|| "TRAY_NOT_READY: tray is not registered".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tray::host::ServiceControl;
    use crate::i18n::{LocaleState, TranslationStore};
    use crate::infra::assets::{AssetSource, EmbeddedBundle};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NoopService;

    impl ServiceControl for NoopService {
        fn start(&self) -> bool {
            true
        }
        fn stop(&self) -> bool {
            true
        }
        fn docs_url(&self) -> String {
            String::new()
        }
    }

    fn coordinator() -> TrayCoordinator {
        let store = TranslationStore::load(&AssetSource::Embedded(EmbeddedBundle::bundled()))
            .expect("load");
        TrayCoordinator::new(
            Arc::new(LocaleState::new(Arc::new(store), "en")),
            Arc::new(NoopService),
        )
    }

    #[test]
    fn get_or_register_builds_once() {
        let state = TrayState::default();
        assert!(state.get().is_none());
        assert!(state.require().err().unwrap().starts_with("TRAY_NOT_READY"));

        let builds = AtomicUsize::new(0);
        let first = state.get_or_register(|| {
            builds.fetch_add(1, Ordering::SeqCst);
            coordinator()
        });
        let second = state.get_or_register(|| {
            builds.fetch_add(1, Ordering::SeqCst);
            coordinator()
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(state.require().is_ok());
    }
}
