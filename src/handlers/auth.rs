use axum::{Json, extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::middleware::session::CurrentSession;
use crate::router::AppState;
use crate::types::Session;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Outcome message plus the session as it stands after the action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub message: String,
    pub session: Session,
}

/// POST /register
pub async fn register_handler(
    State(state): State<AppState>,
    mut current: CurrentSession,
    Json(form): Json<Credentials>,
) -> Response {
    let outcome = state
        .auth
        .register(&mut current.session, &form.username, &form.password)
        .await
        .map(|()| {
            Json(ActionResponse {
                message: "User registered successfully! Please log in.".to_string(),
                session: current.session.clone(),
            })
        });
    current.finish(&state, outcome)
}

/// POST /login
pub async fn login_handler(
    State(state): State<AppState>,
    mut current: CurrentSession,
    Json(form): Json<Credentials>,
) -> Response {
    let outcome = state
        .auth
        .login(&mut current.session, &form.username, &form.password)
        .await
        .map(|()| {
            Json(ActionResponse {
                message: format!("Welcome, {}!", form.username),
                session: current.session.clone(),
            })
        });
    current.finish(&state, outcome)
}

/// POST /logout
pub async fn logout_handler(State(state): State<AppState>, mut current: CurrentSession) -> Response {
    state.auth.logout(&mut current.session);
    let body = Json(ActionResponse {
        message: "Logged out.".to_string(),
        session: current.session.clone(),
    });
    current.finish(&state, Ok(body))
}
