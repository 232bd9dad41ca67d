//! # Data Store
//!
//! [`DataStore`] is the sole owner of the current session's templates and
//! logged workouts. It is a plain struct handed by reference from the
//! composition root to whoever needs it; there is no ambient singleton.
//!
//! ## Invariants
//!
//! - Ids are unique within each collection. `add_*` rejects collisions with
//!   [`RepzError::DuplicateId`]; `update_*`/`delete_*` are no-ops on a miss.
//! - `logged_workouts` is sorted by date descending at every observation
//!   point. Sorting is stable, so entries sharing a date keep their
//!   insertion/update order.
//! - Nothing here persists. The store's contents die with the process unless
//!   exported through the interchange layer first.
//!
//! Deleting a template does not cascade: logged workouts keep their
//! `template_id` even when it no longer resolves.

use crate::error::{RepzError, Result};
use crate::model::{LoggedWorkout, WorkoutTemplate};

#[derive(Debug, Default)]
pub struct DataStore {
    templates: Vec<WorkoutTemplate>,
    logged_workouts: Vec<LoggedWorkout>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Templates ---

    /// Append a template. The id must be fresh.
    pub fn add_template(&mut self, template: WorkoutTemplate) -> Result<()> {
        if self.get_template_by_id(&template.id).is_some() {
            return Err(RepzError::DuplicateId(template.id));
        }
        self.templates.push(template);
        Ok(())
    }

    /// Whole-entity replacement by id. Returns `false` (no-op) when absent.
    pub fn update_template(&mut self, template: WorkoutTemplate) -> bool {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => {
                *slot = template;
                true
            }
            None => false,
        }
    }

    /// Returns `false` (no-op) when absent.
    pub fn delete_template(&mut self, id: &str) -> bool {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        self.templates.len() != before
    }

    pub fn get_template_by_id(&self, id: &str) -> Option<&WorkoutTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    // --- Logged workouts ---

    /// Append a logged workout and re-sort by date descending.
    pub fn add_logged_workout(&mut self, log: LoggedWorkout) -> Result<()> {
        if self.get_logged_workout_by_id(&log.id).is_some() {
            return Err(RepzError::DuplicateId(log.id));
        }
        self.logged_workouts.push(log);
        sort_by_date_desc(&mut self.logged_workouts);
        Ok(())
    }

    /// Replace by id and re-sort. Returns `false` (no-op) when absent.
    pub fn update_logged_workout(&mut self, log: LoggedWorkout) -> bool {
        match self.logged_workouts.iter_mut().find(|l| l.id == log.id) {
            Some(slot) => {
                *slot = log;
                sort_by_date_desc(&mut self.logged_workouts);
                true
            }
            None => false,
        }
    }

    /// Returns `false` (no-op) when absent. Removal leaves order intact.
    pub fn delete_logged_workout(&mut self, id: &str) -> bool {
        let before = self.logged_workouts.len();
        self.logged_workouts.retain(|l| l.id != id);
        self.logged_workouts.len() != before
    }

    pub fn get_logged_workout_by_id(&self, id: &str) -> Option<&LoggedWorkout> {
        self.logged_workouts.iter().find(|l| l.id == id)
    }

    pub fn logged_workouts(&self) -> &[LoggedWorkout] {
        &self.logged_workouts
    }

    // --- Bulk lifecycle ---

    /// Wipe both collections (login/logout path).
    pub fn clear(&mut self) {
        self.templates.clear();
        self.logged_workouts.clear();
    }

    /// Wholesale replacement of both collections (import path).
    pub fn install(&mut self, templates: Vec<WorkoutTemplate>, logs: Vec<LoggedWorkout>) {
        self.templates = templates;
        self.logged_workouts = logs;
        sort_by_date_desc(&mut self.logged_workouts);
    }
}

// Vec::sort_by is stable; equal dates keep their relative order.
fn sort_by_date_desc(logs: &mut [LoggedWorkout]) {
    logs.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fresh_id;
    use chrono::NaiveDate;

    fn template(id: &str, name: &str) -> WorkoutTemplate {
        WorkoutTemplate {
            id: id.into(),
            name: name.into(),
            description: None,
            exercises: Vec::new(),
        }
    }

    fn log(id: &str, date: &str) -> LoggedWorkout {
        let mut l = LoggedWorkout::new(date.parse::<NaiveDate>().unwrap());
        l.id = id.into();
        l
    }

    #[test]
    fn test_add_and_get_template() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();

        assert_eq!(store.get_template_by_id("t1").unwrap().name, "Push Day");
        assert!(store.get_template_by_id("t2").is_none());
    }

    #[test]
    fn test_add_template_rejects_duplicate_id() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();

        match store.add_template(template("t1", "Pull Day")) {
            Err(RepzError::DuplicateId(id)) => assert_eq!(id, "t1"),
            other => panic!("expected DuplicateId, got {:?}", other),
        }
        assert_eq!(store.templates().len(), 1);
    }

    #[test]
    fn test_update_template_replaces_whole_entity() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();

        let mut updated = template("t1", "Push Day v2");
        updated.description = Some("Chest and triceps".into());
        assert!(store.update_template(updated));

        let t = store.get_template_by_id("t1").unwrap();
        assert_eq!(t.name, "Push Day v2");
        assert_eq!(t.description.as_deref(), Some("Chest and triceps"));
    }

    #[test]
    fn test_update_template_miss_is_noop() {
        let mut store = DataStore::new();
        assert!(!store.update_template(template("ghost", "Ghost")));
        assert!(store.templates().is_empty());
    }

    #[test]
    fn test_delete_template_is_idempotent() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();

        assert!(store.delete_template("t1"));
        assert!(!store.delete_template("t1"));
        assert!(store.templates().is_empty());
    }

    #[test]
    fn test_delete_template_does_not_cascade() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();
        let mut l = log("l1", "2024-01-05");
        l.template_id = Some("t1".into());
        l.template_name = Some("Push Day".into());
        store.add_logged_workout(l).unwrap();

        store.delete_template("t1");

        let kept = store.get_logged_workout_by_id("l1").unwrap();
        assert_eq!(kept.template_id.as_deref(), Some("t1"));
        assert_eq!(kept.template_name.as_deref(), Some("Push Day"));
    }

    #[test]
    fn test_logged_workouts_sorted_date_descending() {
        let mut store = DataStore::new();
        store.add_logged_workout(log("l1", "2024-01-05")).unwrap();
        store.add_logged_workout(log("l2", "2024-02-01")).unwrap();
        store.add_logged_workout(log("l3", "2024-01-20")).unwrap();

        let dates: Vec<&str> = vec!["2024-02-01", "2024-01-20", "2024-01-05"];
        let got: Vec<String> = store
            .logged_workouts()
            .iter()
            .map(|l| l.date.to_string())
            .collect();
        assert_eq!(got, dates);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut store = DataStore::new();
        store.add_logged_workout(log("first", "2024-03-10")).unwrap();
        store.add_logged_workout(log("second", "2024-03-10")).unwrap();
        store.add_logged_workout(log("older", "2024-03-01")).unwrap();

        let ids: Vec<&str> = store.logged_workouts().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "older"]);
    }

    #[test]
    fn test_update_logged_workout_resorts() {
        let mut store = DataStore::new();
        store.add_logged_workout(log("l1", "2024-01-05")).unwrap();
        store.add_logged_workout(log("l2", "2024-02-01")).unwrap();

        // Move l1 to the newest date; it must float to the front.
        store.update_logged_workout(log("l1", "2024-03-01"));

        let ids: Vec<&str> = store.logged_workouts().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l2"]);
    }

    #[test]
    fn test_delete_logged_workout_is_idempotent() {
        let mut store = DataStore::new();
        store.add_logged_workout(log("l1", "2024-01-05")).unwrap();

        assert!(store.delete_logged_workout("l1"));
        assert!(!store.delete_logged_workout("l1"));
        assert!(store.get_logged_workout_by_id("l1").is_none());
    }

    #[test]
    fn test_install_replaces_and_sorts() {
        let mut store = DataStore::new();
        store.add_template(template("old", "Old")).unwrap();

        store.install(
            vec![template("t1", "Push Day")],
            vec![log("l1", "2024-01-05"), log("l2", "2024-02-01")],
        );

        assert!(store.get_template_by_id("old").is_none());
        assert_eq!(store.templates().len(), 1);
        assert_eq!(store.logged_workouts()[0].id, "l2");
    }

    #[test]
    fn test_clear_empties_both_collections() {
        let mut store = DataStore::new();
        store.add_template(template("t1", "Push Day")).unwrap();
        store.add_logged_workout(log("l1", "2024-01-05")).unwrap();

        store.clear();

        assert!(store.templates().is_empty());
        assert!(store.logged_workouts().is_empty());
        assert!(store.get_template_by_id("t1").is_none());
        assert!(store.get_logged_workout_by_id("l1").is_none());
    }

    #[test]
    fn test_ids_stay_unique_across_sequences() {
        let mut store = DataStore::new();
        let id = fresh_id();
        let mut t = template("x", "A");
        t.id = id.clone();
        store.add_template(t).unwrap();

        let mut dup = template("x", "B");
        dup.id = id.clone();
        assert!(store.add_template(dup).is_err());

        store.delete_template(&id);
        let mut again = template("x", "C");
        again.id = id.clone();
        // Re-adding after delete is fine; the id is free again.
        store.add_template(again).unwrap();
        assert_eq!(store.templates().len(), 1);
    }
}
