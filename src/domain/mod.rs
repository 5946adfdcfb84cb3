//! Usage: Domain logic (pure rules over loaded data, no Tauri types).

pub(crate) mod i18n;
