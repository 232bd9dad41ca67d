//! # API Facade
//!
//! [`RepzApi`] is the single entry point for UI collaborators. It owns the
//! [`DataStore`] and [`SessionManager`] and wires them together; everything
//! from here inward takes plain Rust arguments, returns `Result`, and never
//! touches stdout, stderr, or `process::exit`.
//!
//! Generic over [`MarkerStore`] so tests run against the in-memory marker
//! and production against the filesystem one.
//!
//! ## Error taxonomy at this surface
//!
//! - Precondition: any mutating data operation without a session is
//!   [`RepzError::NoActiveSession`], with no state mutation. Reads keep
//!   plain signatures; the store is necessarily empty while logged out.
//! - Validation: a bad import is [`RepzError::InvalidSnapshot`]; the store
//!   and session keep their pre-import state.
//! - I/O: an unreadable import file is [`RepzError::Io`], distinct from
//!   validation so the client can word the message differently.
//!
//! Importing takes `&mut self`, so a second import cannot start while one is
//! in flight; the exclusive borrow is the concurrency guard.

use crate::error::{RepzError, Result};
use crate::interchange::{self, Snapshot};
use crate::model::{LoggedWorkout, WorkoutTemplate};
use crate::session::{MarkerStore, Route, SessionManager};
use crate::store::DataStore;
use std::fs;
use std::path::{Path, PathBuf};

pub struct RepzApi<M: MarkerStore> {
    store: DataStore,
    session: SessionManager<M>,
}

impl<M: MarkerStore> RepzApi<M> {
    /// Build the engine, restoring any previous session from the marker.
    pub fn new(marker: M) -> Self {
        Self {
            store: DataStore::new(),
            session: SessionManager::restore(marker),
        }
    }

    // --- Session ---

    pub fn login(&mut self, username: &str) -> Result<()> {
        self.session.login(username, &mut self.store)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout(&mut self.store)
    }

    pub fn current_user(&self) -> Option<&str> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn resolve_route(&self, requested: Route) -> Route {
        self.session.resolve_route(requested)
    }

    fn require_session(&self) -> Result<&str> {
        self.session.current_user().ok_or(RepzError::NoActiveSession)
    }

    // --- Templates ---

    pub fn add_template(&mut self, template: WorkoutTemplate) -> Result<()> {
        self.require_session()?;
        self.store.add_template(template)
    }

    pub fn update_template(&mut self, template: WorkoutTemplate) -> Result<bool> {
        self.require_session()?;
        Ok(self.store.update_template(template))
    }

    pub fn delete_template(&mut self, id: &str) -> Result<bool> {
        self.require_session()?;
        Ok(self.store.delete_template(id))
    }

    pub fn get_template_by_id(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.store.get_template_by_id(id)
    }

    pub fn templates(&self) -> &[WorkoutTemplate] {
        self.store.templates()
    }

    // --- Logged workouts ---

    pub fn add_logged_workout(&mut self, log: LoggedWorkout) -> Result<()> {
        self.require_session()?;
        self.store.add_logged_workout(log)
    }

    pub fn update_logged_workout(&mut self, log: LoggedWorkout) -> Result<bool> {
        self.require_session()?;
        Ok(self.store.update_logged_workout(log))
    }

    pub fn delete_logged_workout(&mut self, id: &str) -> Result<bool> {
        self.require_session()?;
        Ok(self.store.delete_logged_workout(id))
    }

    pub fn get_logged_workout_by_id(&self, id: &str) -> Option<&LoggedWorkout> {
        self.store.get_logged_workout_by_id(id)
    }

    pub fn logged_workouts(&self) -> &[LoggedWorkout] {
        self.store.logged_workouts()
    }

    // --- Interchange ---

    /// Serialize the active session's full dataset. Precondition: a session
    /// must exist.
    pub fn export_snapshot(&self) -> Result<String> {
        let username = self.require_session()?;
        interchange::export_snapshot(
            username,
            self.store.templates(),
            self.store.logged_workouts(),
        )
    }

    /// Export to `path`, or to `repz-{username}-{date}.json` in the current
    /// directory when no path is given. Returns the path written.
    pub fn export_to_file(&self, path: Option<PathBuf>) -> Result<PathBuf> {
        let blob = self.export_snapshot()?;
        let username = self.require_session()?;
        let path =
            path.unwrap_or_else(|| PathBuf::from(interchange::default_export_filename(username)));
        fs::write(&path, blob).map_err(RepzError::Io)?;
        Ok(path)
    }

    /// Read, validate, and install a snapshot file, establishing a session
    /// for the snapshot's user as a side effect.
    ///
    /// Until the install step nothing is mutated: an unreadable file or an
    /// invalid snapshot leaves the pre-import session and data intact.
    pub fn import_from_file(&mut self, path: &Path) -> Result<String> {
        let raw = fs::read_to_string(path).map_err(RepzError::Io)?;
        let snapshot = interchange::parse_snapshot(&raw)?;
        self.install_snapshot(snapshot)
    }

    /// Install an already-parsed snapshot (the non-file entry point for
    /// hosts that deliver the text some other way).
    pub fn install_snapshot(&mut self, snapshot: Snapshot) -> Result<String> {
        let Snapshot {
            username,
            templates,
            logged_workouts,
        } = snapshot;
        self.session.import_succeeded(
            username.clone(),
            templates,
            logged_workouts,
            &mut self.store,
        )?;
        Ok(username)
    }
}
