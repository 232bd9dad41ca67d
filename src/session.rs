//! # Session Manager
//!
//! Owns the "who is logged in" state and its lifecycle across process
//! restarts. The state itself is two-valued ([`SessionState`]); what makes it
//! worth a module is the lifecycle:
//!
//! - On startup the session **marker** (a tiny persisted `{ "username" }`
//!   record, never workout data) is read once to restore a previous session.
//! - [`SessionManager::login`] starts an **empty** session: both store
//!   collections are cleared, and it is up to the user to import a snapshot.
//! - [`SessionManager::import_succeeded`] is deliberately distinct from
//!   login: it installs the imported collections while authenticating, so the
//!   import does not wipe the very data it is installing.
//! - [`SessionManager::logout`] clears the marker and both collections.
//!
//! Marker persistence sits behind the [`MarkerStore`] trait so tests can run
//! against [`MemMarkerStore`] without touching the filesystem.

use crate::error::{RepzError, Result};
use crate::model::{LoggedWorkout, User, WorkoutTemplate};
use crate::store::DataStore;
use std::fs;
use std::path::{Path, PathBuf};

const MARKER_FILENAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated(String),
}

/// A navigation destination, as the routing collaborator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Auth,
    Home,
    Templates,
    LogEditor,
    Stats,
}

/// Persistence seam for the session marker.
pub trait MarkerStore {
    /// Read the marker. A corrupt marker is removed and reported as absent.
    fn load(&self) -> Result<Option<User>>;

    /// Write the marker (session began via login or import).
    fn save(&mut self, user: &User) -> Result<()>;

    /// Remove the marker (logout).
    fn clear(&mut self) -> Result<()>;
}

/// Production marker store: `session.json` under the state directory.
pub struct FsMarkerStore {
    path: PathBuf,
}

impl FsMarkerStore {
    pub fn new<P: AsRef<Path>>(state_dir: P) -> Self {
        Self {
            path: state_dir.as_ref().join(MARKER_FILENAME),
        }
    }
}

impl MarkerStore for FsMarkerStore {
    fn load(&self) -> Result<Option<User>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(RepzError::Io)?;
        match serde_json::from_str::<User>(&content) {
            Ok(user) if !user.username.is_empty() => Ok(Some(user)),
            // Corrupt or empty marker: drop it rather than resurrect a
            // half-valid session.
            _ => {
                let _ = fs::remove_file(&self.path);
                Ok(None)
            }
        }
    }

    fn save(&mut self, user: &User) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(RepzError::Io)?;
            }
        }
        let content = serde_json::to_string(user).map_err(RepzError::Serialization)?;
        fs::write(&self.path, content).map_err(RepzError::Io)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepzError::Io)?;
        }
        Ok(())
    }
}

/// In-memory marker store for tests.
#[derive(Debug, Default)]
pub struct MemMarkerStore {
    slot: Option<User>,
}

impl MemMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(username: &str) -> Self {
        Self {
            slot: Some(User {
                username: username.to_string(),
            }),
        }
    }
}

impl MarkerStore for MemMarkerStore {
    fn load(&self) -> Result<Option<User>> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, user: &User) -> Result<()> {
        self.slot = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.slot = None;
        Ok(())
    }
}

pub struct SessionManager<M: MarkerStore> {
    marker: M,
    state: SessionState,
}

impl<M: MarkerStore> SessionManager<M> {
    /// Resolve the initial state by reading the marker once. Absent, invalid,
    /// or unreadable markers all mean `Unauthenticated`.
    pub fn restore(marker: M) -> Self {
        let state = match marker.load() {
            Ok(Some(user)) => SessionState::Authenticated(user.username),
            _ => SessionState::Unauthenticated,
        };
        Self { marker, state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated(username) => Some(username),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    /// Begin a fresh session: both collections are cleared, the marker is
    /// written. The new session starts empty; importing data is the user's
    /// next move.
    pub fn login(&mut self, username: &str, store: &mut DataStore) -> Result<()> {
        if username.trim().is_empty() {
            return Err(RepzError::Session("Username cannot be empty".into()));
        }
        let user = User {
            username: username.trim().to_string(),
        };
        // Marker write is the only fallible step; it runs before any store
        // mutation so a failed login leaves the previous session's data
        // untouched.
        self.marker.save(&user)?;
        store.clear();
        self.state = SessionState::Authenticated(user.username);
        Ok(())
    }

    /// End the session: marker and both collections are cleared.
    pub fn logout(&mut self, store: &mut DataStore) -> Result<()> {
        self.marker.clear()?;
        store.clear();
        self.state = SessionState::Unauthenticated;
        Ok(())
    }

    /// Authenticate as `username` and atomically install the imported
    /// collections. Bypasses login's clear-on-entry so the import does not
    /// wipe what it is installing.
    pub fn import_succeeded(
        &mut self,
        username: String,
        templates: Vec<WorkoutTemplate>,
        logs: Vec<LoggedWorkout>,
        store: &mut DataStore,
    ) -> Result<()> {
        let user = User {
            username: username.clone(),
        };
        // Same ordering as login: fail before touching the store, so the
        // incoming collections never coexist with the previous session.
        self.marker.save(&user)?;
        store.install(templates, logs);
        self.state = SessionState::Authenticated(username);
        Ok(())
    }

    /// Guard policy for the routing collaborator. Re-evaluated on every
    /// navigation, not just at startup.
    pub fn resolve_route(&self, requested: Route) -> Route {
        match (&self.state, requested) {
            (SessionState::Unauthenticated, _) => Route::Auth,
            (SessionState::Authenticated(_), Route::Auth) => Route::Home,
            (SessionState::Authenticated(_), requested) => requested,
        }
    }
}
