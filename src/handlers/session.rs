use axum::{Json, extract::State, response::Response};

use crate::middleware::session::CurrentSession;
use crate::router::AppState;
use crate::types::Nav;

/// GET /session -> `{username, page}`
pub async fn session_handler(State(state): State<AppState>, current: CurrentSession) -> Response {
    let body = Json(current.session.clone());
    current.finish(&state, Ok(body))
}

/// POST /session/navigate
pub async fn navigate_handler(
    State(state): State<AppState>,
    mut current: CurrentSession,
    Json(nav): Json<Nav>,
) -> Response {
    current.session.navigate(nav);
    let body = Json(current.session.clone());
    current.finish(&state, Ok(body))
}

/// GET /healthz
pub async fn health_handler() -> &'static str {
    "ok"
}
