//! In-memory per-user session store.
//!
//! One session per browser, keyed by a random id carried in an HttpOnly
//! cookie. State lives only in this process; a new upload replaces the
//! session contents wholesale and nothing survives a restart.

use crate::quiz::QuizItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "studyloop_session";

/// Everything the workflow keeps between requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    pub quiz: Vec<QuizItem>,
    pub original_text: String,
    pub score: usize,
    pub revision: Vec<String>,
}

/// Map of session id to session state behind a RwLock.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Store a session under a fresh random id and return the id.
    pub fn create(&self, session: Session) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.put(&id, session);
        id
    }

    /// Store (or replace) a session under an existing id.
    pub fn put(&self, id: &str, session: Session) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(id.to_string(), session);
        }
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let sessions = self.sessions.read().ok()?;
        sessions.get(id).cloned()
    }

    /// Apply a mutation to an existing session. Returns false if the id
    /// is unknown.
    pub fn update<F: FnOnce(&mut Session)>(&self, id: &str, f: F) -> bool {
        match self.sessions.write() {
            Ok(mut sessions) => match sessions.get_mut(id) {
                Some(session) => {
                    f(session);
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the session id out of a raw `Cookie` request header.
pub fn session_id_from_cookies(header: &str) -> Option<String> {
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if key == SESSION_COOKIE && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Value for the `Set-Cookie` response header.
pub fn set_cookie_value(id: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id)
}
