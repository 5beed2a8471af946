use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::page::{Nav, Page, Transition};

pub type SessionToken = Uuid;

/// Per-client interaction context: who is signed in and which page is shown.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub username: Option<String>,
    pub page: Page,
    #[serde(skip)]
    pub last_seen: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            username: None,
            page: Page::Home,
            last_seen: Utc::now(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    pub fn apply(&mut self, transition: Transition) {
        self.page = self.page.next(&transition, self.is_authenticated());
    }

    pub fn navigate(&mut self, nav: Nav) {
        self.apply(Transition::Navigate(nav));
    }

    pub fn sign_in(&mut self, username: impl Into<String>) {
        self.username = Some(username.into());
        self.apply(Transition::LoggedIn);
    }

    pub fn sign_out(&mut self) {
        self.username = None;
        self.apply(Transition::LoggedOut);
    }

    /// Carry over the fields that changed between `opened` and `changed`.
    /// Fields another request updated in the meantime are left alone.
    pub fn merge_changes(&mut self, opened: &Session, changed: &Session) {
        if opened.username != changed.username {
            self.username = changed.username.clone();
        }
        if opened.page != changed.page {
            self.page = changed.page.clone();
        }
    }

    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    pub fn idle_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.last_seen
    }
}
