// ABOUTME: In-memory session service - scopes one run to an (app, user, session)
// ABOUTME: triple and holds the state that seeds each run's context.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::agent::Context;

/// Identity of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

impl SessionKey {
    pub fn new(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
        }
    }
}

/// A session and its initial state.
#[derive(Debug, Clone)]
pub struct Session {
    pub key: SessionKey,
    /// Copied into a fresh context at the start of every run.
    pub state: Context,
}

/// Thread-safe in-memory session store. Clones share state.
#[derive(Clone, Default)]
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<SessionKey, Session>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or reset) a session. A UUID is generated when no id is given.
    pub async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
    ) -> Session {
        self.create_session_with_state(app_name, user_id, session_id, Context::new())
            .await
    }

    pub async fn create_session_with_state(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: Option<&str>,
        state: Context,
    ) -> Session {
        let session_id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let session = Session {
            key: SessionKey::new(app_name, user_id, session_id),
            state,
        };

        debug!(
            app = app_name,
            user = user_id,
            session_id = %session.key.session_id,
            "session created"
        );
        self.sessions
            .write()
            .await
            .insert(session.key.clone(), session.clone());
        session
    }

    pub async fn get_session(&self, app_name: &str, user_id: &str, session_id: &str) -> Option<Session> {
        let key = SessionKey::new(app_name, user_id, session_id);
        self.sessions.read().await.get(&key).cloned()
    }

    pub async fn delete_session(&self, app_name: &str, user_id: &str, session_id: &str) -> bool {
        let key = SessionKey::new(app_name, user_id, session_id);
        self.sessions.write().await.remove(&key).is_some()
    }

    /// Session ids of one user within one app, sorted.
    pub async fn list_sessions(&self, app_name: &str, user_id: &str) -> Vec<String> {
        let sessions = self.sessions.read().await;
        let mut ids: Vec<_> = sessions
            .keys()
            .filter(|k| k.app_name == app_name && k.user_id == user_id)
            .map(|k| k.session_id.clone())
            .collect();
        ids.sort();
        ids
    }
}
