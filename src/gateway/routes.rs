use crate::i18n::{LocaleState, Translation};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

pub(crate) const SWAGGER_PATH: &str = "/swagger/index.html";

#[derive(Clone)]
struct ApiState {
    locales: Arc<LocaleState>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
struct LanguageSummary {
    code: String,
    name: String,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
struct LanguagesResponse {
    current: String,
    languages: Vec<LanguageSummary>,
}

pub(super) fn router(locales: Arc<LocaleState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/languages", get(languages))
        .route("/api/translations/:code", get(translation))
        .route(SWAGGER_PATH, get(swagger))
        .with_state(ApiState { locales })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn languages(State(state): State<ApiState>) -> Json<LanguagesResponse> {
    let store = state.locales.store();
    let languages = store
        .sorted_languages()
        .into_iter()
        .map(|language| LanguageSummary {
            name: store.translation(language.as_str()).display_name().to_string(),
            code: language.as_str().to_string(),
        })
        .collect();
    Json(LanguagesResponse {
        current: state.locales.language().as_str().to_string(),
        languages,
    })
}

/// Unknown codes get the placeholder document, same as the in-app lookup.
async fn translation(
    State(state): State<ApiState>,
    Path(code): Path<String>,
) -> Json<Translation> {
    Json(state.locales.store().translation(&code).clone())
}

async fn swagger() -> Html<&'static str> {
    Html(SWAGGER_HTML)
}

const SWAGGER_HTML: &str = r#"<!doctype html>
<html>
  <head><meta charset="utf-8" /><title>Tray I18n Hub API</title></head>
  <body>
    <h1>Tray I18n Hub API</h1>
    <ul>
      <li><code>GET /health</code> liveness check</li>
      <li><code>GET /api/languages</code> loaded languages and the active one</li>
      <li><code>GET /api/translations/{code}</code> one document, placeholder when unknown</li>
    </ul>
  </body>
</html>
"#;
