use crate::db::{Records, User};
use crate::error::SkillError;
use crate::types::{Session, Transition};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Registration and login against the users table.
#[derive(Clone)]
pub struct AuthService {
    records: Arc<Records>,
}

impl AuthService {
    pub fn new(records: Arc<Records>) -> Self {
        Self { records }
    }

    /// Append a new user. An anonymous session then moves to the login page.
    pub async fn register(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), SkillError> {
        if username.is_empty() || password.is_empty() {
            return Err(SkillError::Validation(
                "Username and password cannot be empty.".to_string(),
            ));
        }

        let users = self.records.lock::<User>().await;
        if users.load().await?.iter().any(|u| u.username == username) {
            debug!(username, "registration rejected: username taken");
            return Err(SkillError::DuplicateUser(username.to_string()));
        }
        users
            .append(User {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;
        drop(users);

        info!(username, "user registered");
        session.apply(Transition::Registered);
        Ok(())
    }

    /// Both fields must match the same row. Unknown user and wrong password
    /// are reported identically.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<(), SkillError> {
        let users = self.records.load::<User>().await?;
        let matched = users.iter().any(|u| {
            u.username == username && bool::from(u.password.as_bytes().ct_eq(password.as_bytes()))
        });
        if !matched {
            debug!(username, "login rejected");
            return Err(SkillError::InvalidCredentials);
        }

        info!(username, "user logged in");
        session.sign_in(username);
        Ok(())
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(username) = session.username() {
            info!(username, "user logged out");
        }
        session.sign_out();
    }
}
