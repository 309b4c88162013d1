//! Per-session recovery maps.
//!
//! The vault never owns recovery state; this store is the hosting layer that does. Each
//! session gets its own [`RecoveryMap`], kept in process memory only and dropped on restart.
//! A session ends once it has been idle for longer than the store's idle timeout; its map is
//! dropped the next time the index is touched. Work on one session's map is serialised by that
//! map's lock; different sessions only share the outer index.

use safekeep_vault::RecoveryMap;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default idle time after which a session and its codes are forgotten (1 hour).
pub const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(60 * 60);

/// Shared handle to one session's recovery map.
pub type SessionMap = Arc<Mutex<RecoveryMap>>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session state lock poisoned")]
    Poisoned,
}

#[derive(Debug)]
struct Session {
    map: SessionMap,
    last_seen: Instant,
}

#[derive(Clone, Debug)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_IDLE)
    }
}

impl SessionStore {
    /// Creates an empty store whose sessions end after `idle_timeout` without a request.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            idle_timeout,
        }
    }

    /// Returns the session named by `header`, creating it if needed.
    ///
    /// A missing or malformed header, or one naming an ended session, starts a new session.
    pub fn get_or_create(&self, header: Option<&str>) -> Result<(Uuid, SessionMap), SessionError> {
        let id = header
            .and_then(|h| Uuid::parse_str(h.trim()).ok())
            .unwrap_or_else(Uuid::new_v4);
        let mut sessions = self.index()?;
        let session = sessions.entry(id).or_insert_with(|| Session {
            map: SessionMap::default(),
            last_seen: Instant::now(),
        });
        session.last_seen = Instant::now();
        Ok((id, session.map.clone()))
    }

    /// Returns the session named by `header` if it exists and has not ended.
    pub fn get(&self, header: Option<&str>) -> Result<Option<SessionMap>, SessionError> {
        let Some(id) = header.and_then(|h| Uuid::parse_str(h.trim()).ok()) else {
            return Ok(None);
        };
        let mut sessions = self.index()?;
        Ok(sessions.get_mut(&id).map(|session| {
            session.last_seen = Instant::now();
            session.map.clone()
        }))
    }

    /// Number of live sessions.
    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.index()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.index()?.is_empty())
    }

    /// Locks the index and drops every session idle for at least the timeout.
    fn index(&self) -> Result<MutexGuard<'_, HashMap<Uuid, Session>>, SessionError> {
        let mut sessions = self.sessions.lock().map_err(|_| SessionError::Poisoned)?;
        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| now.duration_since(session.last_seen) < self.idle_timeout);
        let ended = before - sessions.len();
        if ended > 0 {
            tracing::debug!("dropped {} idle session(s)", ended);
        }
        Ok(sessions)
    }
}

/// Locks one session's map.
pub fn lock(map: &SessionMap) -> Result<MutexGuard<'_, RecoveryMap>, SessionError> {
    map.lock().map_err(|_| SessionError::Poisoned)
}

/// Canonical string form of a session id, as sent back to clients.
pub fn session_id_string(id: &Uuid) -> String {
    id.simple().to_string()
}
