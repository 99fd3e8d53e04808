//! Per-player game sessions.

use millionaire_core::GameState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Default time a session may sit untouched before eviction.
pub const DEFAULT_IDLE_LIMIT: Duration = Duration::from_secs(30 * 60);

/// Default upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// One player's game.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    /// The game state.
    pub game: GameState,
    /// Last time the session was created, read or played.
    pub last_active: Instant,
}

impl GameSession {
    /// Creates a session with a fresh game.
    #[instrument]
    pub fn new(id: SessionId) -> Self {
        info!(session_id = %id, "Creating new game session");
        Self {
            id,
            game: GameState::new(),
            last_active: Instant::now(),
        }
    }
}

/// Manages all game sessions.
///
/// Sessions never share state. The map lock is held only for the duration
/// of a single lookup or mutation, never across a provider call.
///
/// Creating a session first evicts sessions idle past the limit, then the
/// least recently active ones while the map is at capacity.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
    next_id: Arc<AtomicU64>,
    idle_limit: Duration,
    max_sessions: usize,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::with_limits(DEFAULT_IDLE_LIMIT, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionManager {
    /// Creates a new session manager with the default limits.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self::default()
    }

    /// Creates a session manager with an idle limit and a session cap.
    ///
    /// A cap of zero is treated as one.
    #[instrument]
    pub fn with_limits(idle_limit: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Arc::default(),
            next_id: Arc::default(),
            idle_limit,
            max_sessions: max_sessions.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, GameSession>> {
        self.sessions.lock().unwrap_or_else(|poisoned| {
            warn!("Session map lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Creates a new session and returns its ID.
    #[instrument(skip(self))]
    pub fn create_session(&self) -> SessionId {
        let id = format!("game-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let session = GameSession::new(id.clone());
        let mut sessions = self.lock();
        Self::evict(&mut sessions, Instant::now(), self.idle_limit, self.max_sessions - 1);
        sessions.insert(id.clone(), session);
        info!(session_id = %id, live = sessions.len(), "Created new session");
        id
    }

    /// Gets a snapshot of a session by ID and marks it active.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: &str) -> Option<GameSession> {
        let mut sessions = self.lock();
        let Some(session) = sessions.get_mut(id) else {
            debug!(session_id = id, "Session not found");
            return None;
        };
        session.last_active = Instant::now();
        Some(session.clone())
    }

    /// Runs `f` against a session while holding the lock.
    ///
    /// Returns `None` if the session does not exist.
    #[instrument(skip(self, f))]
    pub fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut GameSession) -> R) -> Option<R> {
        let mut sessions = self.lock();
        let session = sessions.get_mut(id)?;
        session.last_active = Instant::now();
        Some(f(session))
    }

    /// Removes sessions idle for longer than the idle limit as of `now`.
    ///
    /// Returns how many were removed.
    #[instrument(skip(self, now))]
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        Self::evict(&mut sessions, now, self.idle_limit, self.max_sessions)
    }

    fn evict(
        sessions: &mut HashMap<SessionId, GameSession>,
        now: Instant,
        idle_limit: Duration,
        keep_at_most: usize,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, s| now.saturating_duration_since(s.last_active) <= idle_limit);

        while sessions.len() > keep_at_most {
            let Some(oldest) = sessions
                .values()
                .min_by_key(|s| s.last_active)
                .map(|s| s.id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
        }

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, live = sessions.len(), "Evicted sessions");
        }
        evicted
    }

    /// Removes a session. Returns true if it existed.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> bool {
        let removed = self.lock().remove(id).is_some();
        info!(session_id = id, removed, "Session removed");
        removed
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Vec<SessionId> {
        let ids: Vec<_> = self.lock().keys().cloned().collect();
        debug!(count = ids.len(), "Listed sessions");
        ids
    }
}
