//! Usage: Infrastructure adapters (app paths, settings file, translation asset sources).

pub(crate) mod app_paths;
pub(crate) mod assets;
pub(crate) mod settings;
