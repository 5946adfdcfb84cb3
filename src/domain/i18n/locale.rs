//! Usage: Active locale state (current language over an immutable Translation Store).

use super::resolver::resolve_language;
use super::store::TranslationStore;
use super::types::{Language, Translation};
use crate::shared::mutex_ext::MutexExt;
use std::sync::{Arc, Mutex};

pub(crate) struct LocaleState {
    store: Arc<TranslationStore>,
    current: Mutex<Language>,
}

impl LocaleState {
    pub(crate) fn new(store: Arc<TranslationStore>, requested: &str) -> Self {
        let current = resolve_language(&store, requested);
        tracing::info!(requested = %requested, language = %current, "初始显示语言");
        Self {
            store,
            current: Mutex::new(current),
        }
    }

    pub(crate) fn store(&self) -> &TranslationStore {
        &self.store
    }

    pub(crate) fn language(&self) -> Language {
        self.current.lock_or_recover().clone()
    }

    /// The Translation of the active language.
    pub(crate) fn locale(&self) -> Translation {
        let current = self.current.lock_or_recover();
        self.store.translation(current.as_str()).clone()
    }

    /// Switches to the resolved form of `code` and returns the effective language.
    pub(crate) fn change(&self, code: &str) -> Language {
        let resolved = resolve_language(&self.store, code);
        let mut current = self.current.lock_or_recover();
        if *current != resolved {
            tracing::info!(from = %current.as_str(), to = %resolved, "切换显示语言");
        }
        *current = resolved.clone();
        resolved
    }
}
