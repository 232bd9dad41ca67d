//! # Domain Model
//!
//! Core entity types: [`User`], [`SetDetail`], [`Exercise`], [`WorkoutTemplate`],
//! and [`LoggedWorkout`]. All of them serialize with camelCase field names so the
//! JSON interchange format stays compatible with exports produced by earlier
//! versions of the app.
//!
//! ## The Legacy Set Shape
//!
//! Old exports describe an exercise's sets with three scalar fields
//! (`sets`, `reps`, `weight`). The current shape is a `setDetails` list with one
//! entry per set, each carrying its own reps and weight. Both shapes must parse,
//! and a non-empty `setDetails` is always authoritative:
//!
//! - [`Exercise::normalize_legacy`] expands the scalar fields into `setDetails`
//!   when `setDetails` is empty, so downstream code only ever reads the list.
//! - The scalar fields are kept on the struct purely so old exports round-trip;
//!   nothing downstream reads them after normalization.
//!
//! Entity ids are strings (historically browser-generated UUIDs); [`fresh_id`]
//! mints new ones.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mint a new entity id.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// The active session's identity. No credentials: "logging in" is declaring
/// a username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// One performed or planned set. `id` is unique within the owning exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDetail {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default)]
    pub id: String,
    pub name: String,
    /// Authoritative set list when non-empty.
    #[serde(default)]
    pub set_details: Vec<SetDetail>,
    /// Seconds, for timed work (planks, cardio).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    /// Rounds for timed exercises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timed_sets: Option<u32>,
    /// Rest in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Deprecated scalar shape, kept for serialization compatibility only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Exercise {
    /// Expand the deprecated `sets`/`reps`/`weight` scalars into `set_details`.
    ///
    /// No-op when `set_details` is already populated (the list is authoritative)
    /// or when the legacy shape carries no set count.
    pub fn normalize_legacy(&mut self) {
        if !self.set_details.is_empty() {
            return;
        }
        let count = match self.sets {
            Some(n) if n > 0 => n,
            _ => return,
        };
        self.set_details = (0..count)
            .map(|_| SetDetail {
                id: fresh_id(),
                reps: self.reps,
                weight: self.weight,
            })
            .collect();
    }
}

/// Normalize a batch of exercises in place: mint ids where they are missing
/// (exercises and their sets), and expand the legacy scalar shape.
pub fn normalize_exercises(exercises: &mut [Exercise]) {
    for exercise in exercises.iter_mut() {
        if exercise.id.is_empty() {
            exercise.id = fresh_id();
        }
        exercise.normalize_legacy();
        for set in &mut exercise.set_details {
            if set.id.is_empty() {
                set.id = fresh_id();
            }
        }
    }
}

/// A reusable, date-independent workout plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutTemplate {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// A dated record of exercises actually performed.
///
/// `template_name` is a snapshot of the template's name at logging time and is
/// never re-derived from `template_id`; the template may have been renamed or
/// deleted since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedWorkout {
    #[serde(default)]
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Total workout duration in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl WorkoutTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: fresh_id(),
            name: name.into(),
            description: None,
            exercises: Vec::new(),
        }
    }
}

impl LoggedWorkout {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: fresh_id(),
            date,
            template_id: None,
            template_name: None,
            exercises: Vec::new(),
            notes: None,
            duration: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy_exercise() -> Exercise {
        Exercise {
            id: "e1".into(),
            name: "Bench Press".into(),
            set_details: Vec::new(),
            duration: None,
            timed_sets: None,
            pause: None,
            notes: None,
            sets: Some(3),
            reps: Some(8),
            weight: Some(60.0),
        }
    }

    #[test]
    fn test_normalize_legacy_expands_scalar_shape() {
        let mut ex = legacy_exercise();
        ex.normalize_legacy();

        assert_eq!(ex.set_details.len(), 3);
        for set in &ex.set_details {
            assert!(!set.id.is_empty());
            assert_eq!(set.reps, Some(8));
            assert_eq!(set.weight, Some(60.0));
        }
        // Scalars survive for serialization compatibility.
        assert_eq!(ex.sets, Some(3));
    }

    #[test]
    fn test_normalize_legacy_set_details_authoritative() {
        let mut ex = legacy_exercise();
        ex.set_details = vec![SetDetail {
            id: "s1".into(),
            reps: Some(5),
            weight: None,
        }];
        ex.normalize_legacy();

        assert_eq!(ex.set_details.len(), 1);
        assert_eq!(ex.set_details[0].reps, Some(5));
    }

    #[test]
    fn test_normalize_legacy_without_set_count_is_noop() {
        let mut ex = legacy_exercise();
        ex.sets = None;
        ex.normalize_legacy();
        assert!(ex.set_details.is_empty());
    }

    #[test]
    fn test_exercise_camel_case_fields() {
        let mut ex = legacy_exercise();
        ex.set_details = vec![SetDetail {
            id: "s1".into(),
            reps: Some(8),
            weight: None,
        }];
        ex.timed_sets = Some(2);

        let json = serde_json::to_string(&ex).unwrap();
        assert!(json.contains("\"setDetails\""));
        assert!(json.contains("\"timedSets\""));
    }

    #[test]
    fn test_exercise_missing_set_details_defaults_empty() {
        let json = r#"{"id":"e1","name":"Squat","sets":5,"reps":5,"weight":100}"#;
        let ex: Exercise = serde_json::from_str(json).unwrap();
        assert!(ex.set_details.is_empty());
        assert_eq!(ex.sets, Some(5));
    }

    #[test]
    fn test_logged_workout_date_day_precision() {
        let log = LoggedWorkout::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"date\":\"2024-02-01\""));
    }
}
