use crate::config::SessionConfig;
use crate::error::SkillError;
use crate::types::{Session, SessionToken};

use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

/// Messages handled by the session registry actor.
#[derive(Debug)]
pub enum SessionsMessage {
    /// Resolve the presented token, or start a fresh session when it is
    /// absent, unknown or expired. Replies with the token actually in use.
    Open(Option<SessionToken>, RpcReplyPort<(SessionToken, Session)>),
    /// Write back a handler's changes: the session as opened, then as left.
    /// Only the fields that differ are applied to the live session.
    Store(SessionToken, Session, Session),
    /// Number of live sessions.
    Count(RpcReplyPort<usize>),

    // Internal messages (sent by the actor itself)
    /// Drop sessions idle longer than the configured timeout.
    Sweep,
}

/// Handle for interacting with the sessions actor.
#[derive(Clone)]
pub struct SessionsHandle {
    actor: ActorRef<SessionsMessage>,
}

impl SessionsHandle {
    pub async fn open(
        &self,
        token: Option<SessionToken>,
    ) -> Result<(SessionToken, Session), SkillError> {
        ractor::call!(self.actor, SessionsMessage::Open, token)
            .map_err(|e| SkillError::RactorError(format!("Open RPC failed: {e}")))
    }

    pub fn store(
        &self,
        token: SessionToken,
        opened: Session,
        changed: Session,
    ) -> Result<(), SkillError> {
        ractor::cast!(self.actor, SessionsMessage::Store(token, opened, changed))
            .map_err(|e| SkillError::RactorError(format!("Store cast failed: {e}")))
    }

    pub async fn count(&self) -> Result<usize, SkillError> {
        ractor::call!(self.actor, SessionsMessage::Count)
            .map_err(|e| SkillError::RactorError(format!("Count RPC failed: {e}")))
    }

    pub fn stop(&self) {
        self.actor.stop(None);
    }
}

/// Internal state held by the sessions actor
struct SessionsState {
    sessions: HashMap<SessionToken, Session>,
    idle_timeout: chrono::Duration,
    sweeper: JoinHandle<()>,
}

struct SessionsActor;

#[ractor::async_trait]
impl Actor for SessionsActor {
    type Msg = SessionsMessage;
    type State = SessionsState;
    type Arguments = SessionConfig;

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        cfg: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let idle_timeout = chrono::Duration::from_std(cfg.idle_timeout())
            .map_err(|e| ActorProcessingErr::from(format!("invalid idle timeout: {e}")))?;
        let sweeper = spawn_sweeper(myself, cfg.sweep_interval());

        info!(
            idle_timeout_secs = cfg.idle_timeout_secs,
            sweep_interval_secs = cfg.sweep_interval_secs,
            "SessionsActor started"
        );
        Ok(SessionsState {
            sessions: HashMap::new(),
            idle_timeout,
            sweeper,
        })
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        state.sweeper.abort();
        Ok(())
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            SessionsMessage::Open(token, rp) => {
                let _ = rp.send(state.open(token));
            }
            SessionsMessage::Store(token, opened, changed) => {
                state.store(token, &opened, changed);
            }
            SessionsMessage::Count(rp) => {
                let _ = rp.send(state.sessions.len());
            }
            SessionsMessage::Sweep => {
                let removed = state.sweep();
                if removed > 0 {
                    debug!(removed, live = state.sessions.len(), "expired idle sessions");
                }
            }
        }
        Ok(())
    }
}

impl SessionsState {
    fn open(&mut self, token: Option<SessionToken>) -> (SessionToken, Session) {
        let now = Utc::now();
        if let Some(token) = token
            && let Some(session) = self.sessions.get_mut(&token)
            && session.idle_for(now) <= self.idle_timeout
        {
            session.touch();
            return (token, session.clone());
        }

        let token = Uuid::new_v4();
        let session = Session::new();
        self.sessions.insert(token, session.clone());
        debug!(live = self.sessions.len(), "session created");
        (token, session)
    }

    fn store(&mut self, token: SessionToken, opened: &Session, mut changed: Session) {
        match self.sessions.get_mut(&token) {
            Some(live) => {
                live.merge_changes(opened, &changed);
                live.touch();
            }
            None => {
                changed.touch();
                self.sessions.insert(token, changed);
            }
        }
    }

    fn sweep(&mut self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        let idle_timeout = self.idle_timeout;
        self.sessions
            .retain(|_, session| session.idle_for(now) <= idle_timeout);
        before - self.sessions.len()
    }
}

fn spawn_sweeper(actor: ActorRef<SessionsMessage>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if ractor::cast!(actor, SessionsMessage::Sweep).is_err() {
                break;
            }
        }
    })
}

/// Async spawn of the sessions actor and return a handle.
pub async fn spawn(cfg: SessionConfig) -> Result<SessionsHandle, SkillError> {
    let (actor, _jh) = Actor::spawn(None, SessionsActor, cfg)
        .await
        .map_err(|e| SkillError::RactorError(format!("failed to spawn SessionsActor: {e}")))?;
    Ok(SessionsHandle { actor })
}
