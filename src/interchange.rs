//! # Data Interchange
//!
//! The only durability mechanism in the system. A [`Snapshot`] is a
//! self-describing JSON document carrying the username and both collections;
//! writing one to a file and reading it back later is how data survives the
//! process.
//!
//! [`parse_snapshot`] is deliberately forgiving about *missing* collections
//! (a snapshot with only a username is a valid, empty dataset) and strict
//! about everything that would break the store's invariants: malformed JSON,
//! a missing or empty username, and missing or duplicate entity ids all
//! reject the snapshot wholesale. Rejection changes no state anywhere.
//!
//! Legacy exercises (scalar `sets`/`reps`/`weight` instead of `setDetails`)
//! are normalized here, on the way in, so the rest of the crate only ever
//! sees the list shape.

use crate::error::{RepzError, Result};
use crate::model::{normalize_exercises, LoggedWorkout, WorkoutTemplate};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One user's full exported dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub username: String,
    #[serde(default)]
    pub templates: Vec<WorkoutTemplate>,
    #[serde(default)]
    pub logged_workouts: Vec<LoggedWorkout>,
}

/// Serialize a full dataset to the canonical backup format.
///
/// Session preconditions (is anyone logged in?) are the caller's problem;
/// this layer only shapes bytes.
pub fn export_snapshot(
    username: &str,
    templates: &[WorkoutTemplate],
    logged_workouts: &[LoggedWorkout],
) -> Result<String> {
    let snapshot = Snapshot {
        username: username.to_string(),
        templates: templates.to_vec(),
        logged_workouts: logged_workouts.to_vec(),
    };
    serde_json::to_string_pretty(&snapshot).map_err(RepzError::Serialization)
}

/// Default filename for an export artifact: `repz-{username}-{date}.json`.
pub fn default_export_filename(username: &str) -> String {
    format!("repz-{}-{}.json", username, Utc::now().format("%Y-%m-%d"))
}

/// Parse and validate externally supplied snapshot text.
///
/// On success the returned snapshot is fully normalized and safe to install;
/// on failure ([`RepzError::InvalidSnapshot`]) the caller must leave the
/// store and session untouched.
pub fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    let mut snapshot: Snapshot = serde_json::from_str(raw)
        .map_err(|e| RepzError::InvalidSnapshot(format!("malformed JSON: {}", e)))?;

    if snapshot.username.trim().is_empty() {
        return Err(RepzError::InvalidSnapshot(
            "missing or empty username".into(),
        ));
    }

    check_ids("template", snapshot.templates.iter().map(|t| t.id.as_str()))?;
    check_ids(
        "logged workout",
        snapshot.logged_workouts.iter().map(|l| l.id.as_str()),
    )?;

    for template in &mut snapshot.templates {
        normalize_exercises(&mut template.exercises);
    }
    for log in &mut snapshot.logged_workouts {
        normalize_exercises(&mut log.exercises);
    }

    Ok(snapshot)
}

fn check_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.is_empty() {
            return Err(RepzError::InvalidSnapshot(format!(
                "{} with missing id",
                kind
            )));
        }
        if !seen.insert(id) {
            return Err(RepzError::InvalidSnapshot(format!(
                "duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(())
}
