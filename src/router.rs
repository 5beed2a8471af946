use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::sync::Arc;

use crate::config::Config;
use crate::db::Records;
use crate::error::SkillError;
use crate::handlers::{
    auth::{login_handler, logout_handler, register_handler},
    courses::{course_page_handler, enroll_handler, list_courses_handler, my_courses_handler},
    session::{health_handler, navigate_handler, session_handler},
};
use crate::service::{AuthService, CatalogService, SessionsHandle, sessions_actor};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogService,
    pub sessions: SessionsHandle,
    pub cookie_key: Key,
    pub insecure_cookie: bool,
    pub cookie_max_age: time::Duration,
}

impl AppState {
    pub fn new(
        records: Arc<Records>,
        sessions: SessionsHandle,
        cfg: &Config,
    ) -> Result<Self, SkillError> {
        Ok(Self {
            auth: AuthService::new(records.clone()),
            catalog: CatalogService::new(records, cfg.catalog.enforce_course_exists),
            sessions,
            cookie_key: cfg.cookie_key()?,
            insecure_cookie: cfg.basic.insecure_cookie,
            cookie_max_age: time::Duration::seconds(
                i64::try_from(cfg.session.idle_timeout_secs).unwrap_or(i64::MAX),
            ),
        })
    }

    /// Open storage, spawn the session registry and wire the services.
    pub async fn build(cfg: &Config) -> Result<Self, SkillError> {
        let records = Arc::new(Records::open(&cfg.storage).await?);
        let sessions = sessions_actor::spawn(cfg.session.clone()).await?;
        Self::new(records, sessions, cfg)
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/courses", get(list_courses_handler))
        .route("/courses/{title}", get(course_page_handler))
        .route("/courses/{title}/enroll", post(enroll_handler))
        .route("/my/courses", get(my_courses_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/session", get(session_handler))
        .route("/session/navigate", post(navigate_handler))
        .with_state(state)
}
