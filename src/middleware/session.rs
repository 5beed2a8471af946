use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use crate::config::SESSION_COOKIE;
use crate::error::SkillError;
use crate::router::AppState;
use crate::types::{Session, SessionToken};

/// The caller's session, resolved from the private session cookie.
/// A new session is issued when none is presented. The cookie is re-sent on
/// every response so its `Max-Age` tracks the last request, like the
/// server-side idle timer.
pub struct CurrentSession {
    pub token: SessionToken,
    pub session: Session,
    opened: Session,
    jar: PrivateCookieJar,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::from_headers(&parts.headers, state.cookie_key.clone());
        let presented = jar
            .get(SESSION_COOKIE)
            .and_then(|c| Uuid::parse_str(c.value()).ok());

        let (token, session) = state
            .sessions
            .open(presented)
            .await
            .map_err(IntoResponse::into_response)?;

        let jar = jar.add(build_cookie(token, state.insecure_cookie, state.cookie_max_age));

        Ok(Self {
            token,
            opened: session.clone(),
            session,
            jar,
        })
    }
}

impl CurrentSession {
    /// Write back the fields this request changed and attach the cookie jar
    /// to the handler's outcome, success or failure.
    pub fn finish<T: IntoResponse>(
        self,
        state: &AppState,
        outcome: Result<T, SkillError>,
    ) -> Response {
        if let Err(e) = state.sessions.store(self.token, self.opened, self.session) {
            return e.into_response();
        }
        (self.jar, outcome).into_response()
    }
}

fn build_cookie(token: SessionToken, insecure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, token.to_string()))
        .path("/")
        .http_only(true)
        .secure(!insecure)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}
