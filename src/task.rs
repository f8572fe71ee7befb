//! Task management for rb.
//!
//! Tasks live as a single JSON blob (`tasks.json`). The store keeps the
//! authoritative in-memory list and rewrites the whole blob after every
//! successful mutation; loading never writes. When storage is empty or
//! unreadable the store starts from a fixed seed set, and seeds that went
//! missing from stored data are re-appended by id on load.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TasksConfig;
use crate::error::Error;
use crate::storage::{Storage, TASKS_KEY};

const SEED_IDS: [(&str, Period); 3] = [
    ("default-m1", Period::Morning),
    ("default-e1", Period::Evening),
    ("default-misc1", Period::Miscellaneous),
];

/// Time-of-day bucket a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Evening,
    Miscellaneous,
    Anytime,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Evening => "evening",
            Period::Miscellaneous => "miscellaneous",
            Period::Anytime => "anytime",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Period::Morning),
            "evening" => Ok(Period::Evening),
            "miscellaneous" => Ok(Period::Miscellaneous),
            "anytime" => Ok(Period::Anytime),
            other => Err(Error::InvalidArgument(format!(
                "unknown period '{other}' (expected morning|evening|miscellaneous|anytime)"
            ))),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low|medium|high)"
            ))),
        }
    }
}

/// A checklist item nested inside a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub area_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub period: Period,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Display time for the schedule (free-form, used for sorting/display only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

/// Payload for creating a new task. Everything the caller does not control
/// (id, completion state, creation time, tags, subtasks) is filled in by the
/// store.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub notes: Option<String>,
    pub area_id: String,
    pub project_id: Option<String>,
    pub period: Period,
    pub priority: Priority,
    pub scheduled_date: Option<NaiveDate>,
    pub scheduled_time: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Result of a completion toggle.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub task: Task,
    /// True when this call transitioned the task into the completed state.
    /// Only such transitions feed the streak engine.
    pub completed_now: bool,
}

/// Authoritative in-memory task list, synchronized to storage on mutation.
#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the store, reconciling stored data with the seed set.
    ///
    /// Stored data wins; seeds missing from it are appended by id. An empty
    /// or unreadable blob yields exactly the seed set (read failures are
    /// logged inside the storage layer).
    pub fn load(storage: Storage, config: &TasksConfig) -> Self {
        let seeds = seed_tasks(config);
        let tasks = match storage.get_item::<Vec<Task>>(TASKS_KEY) {
            Some(stored) if !stored.is_empty() => {
                let mut merged = stored;
                for seed in seeds {
                    if !merged.iter().any(|task| task.id == seed.id) {
                        merged.push(seed);
                    }
                }
                merged
            }
            _ => seeds,
        };
        Self { storage, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Create a task from a draft and append it to the list.
    pub fn add(&mut self, draft: TaskDraft) -> Task {
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            notes: draft.notes,
            area_id: draft.area_id,
            project_id: draft.project_id,
            period: draft.period,
            priority: draft.priority,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            scheduled_date: draft.scheduled_date,
            scheduled_time: draft.scheduled_time,
            deadline: draft.deadline,
            tags: Vec::new(),
            subtasks: Vec::new(),
        };
        self.tasks.push(task.clone());
        self.persist();
        task
    }

    /// Replace the record whose id matches. Unknown ids are a no-op and
    /// trigger no persistence write.
    pub fn update(&mut self, updated: Task) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the record with the given id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flip a task's completion state.
    ///
    /// Completing stamps `completed_at`; un-completing clears it, so the
    /// timestamp is present exactly when the task is completed. Unknown ids
    /// are a no-op.
    pub fn toggle(&mut self, id: &str) -> Option<ToggleOutcome> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.completed = !task.completed;
        task.completed_at = if task.completed { Some(Utc::now()) } else { None };
        let outcome = ToggleOutcome {
            task: task.clone(),
            completed_now: task.completed,
        };
        self.persist();
        Some(outcome)
    }

    /// Tasks for the "today" view: unscheduled tasks plus anything scheduled
    /// on `day`.
    pub fn due_on(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.scheduled_date.map_or(true, |date| date == day))
            .collect()
    }

    /// Tasks scheduled exactly on `day`.
    pub fn scheduled_on(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.scheduled_date == Some(day))
            .collect()
    }

    /// Completed tasks, newest completion first.
    pub fn logbook(&self) -> Vec<&Task> {
        let mut done: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.completed && task.completed_at.is_some())
            .collect();
        done.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        done
    }

    fn persist(&self) {
        self.storage.set_item(TASKS_KEY, &self.tasks);
    }
}

/// The fixed starter tasks: one per seeded period, all sharing the
/// configured title and area.
fn seed_tasks(config: &TasksConfig) -> Vec<Task> {
    let created_at = Utc::now();
    SEED_IDS
        .into_iter()
        .map(|(id, period)| Task {
            id: id.to_string(),
            title: config.seed_title.clone(),
            notes: None,
            area_id: config.seed_area.clone(),
            project_id: None,
            period,
            priority: Priority::Medium,
            completed: false,
            created_at,
            completed_at: None,
            scheduled_date: None,
            scheduled_time: None,
            deadline: None,
            tags: Vec::new(),
            subtasks: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, TaskStore) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        let store = TaskStore::load(storage, &TasksConfig::default());
        (temp, store)
    }

    fn reload(temp: &TempDir) -> TaskStore {
        let storage = Storage::new(temp.path().to_path_buf());
        TaskStore::load(storage, &TasksConfig::default())
    }

    fn draft(title: &str) -> TaskDraft {
        TaskDraft {
            title: title.to_string(),
            notes: None,
            area_id: "a1".to_string(),
            project_id: None,
            period: Period::Morning,
            priority: Priority::Medium,
            scheduled_date: None,
            scheduled_time: None,
            deadline: None,
        }
    }

    #[test]
    fn empty_storage_yields_seed_set() {
        let (_temp, store) = store();

        assert_eq!(store.tasks().len(), 3);
        let ids: Vec<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["default-m1", "default-e1", "default-misc1"]);
        for task in store.tasks() {
            assert_eq!(task.title, "First Task");
            assert_eq!(task.area_id, "Personal");
            assert_eq!(task.priority, Priority::Medium);
            assert!(!task.completed);
            assert!(task.tags.is_empty());
            assert!(task.subtasks.is_empty());
        }
        let periods: Vec<Period> = store.tasks().iter().map(|t| t.period).collect();
        assert_eq!(
            periods,
            vec![Period::Morning, Period::Evening, Period::Miscellaneous]
        );
    }

    #[test]
    fn load_never_writes() {
        let (temp, store) = store();
        assert_eq!(store.tasks().len(), 3);
        assert!(!temp.path().join("tasks.json").exists());
    }

    #[test]
    fn missing_seed_is_reappended_on_load() {
        let (temp, mut store) = store();
        let added = store.add(draft("Real work"));
        assert!(store.delete("default-e1"));

        let reloaded = reload(&temp);
        assert!(reloaded.get(&added.id).is_some());
        // The deleted seed comes back; stored records keep their position.
        assert!(reloaded.get("default-e1").is_some());
        assert_eq!(reloaded.tasks().last().unwrap().id, "default-e1");
    }

    #[test]
    fn corrupt_blob_falls_back_to_seeds() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("tasks.json"), "[{broken").unwrap();

        let store = reload(&temp);
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.tasks()[0].id, "default-m1");
    }

    #[test]
    fn add_fills_in_generated_fields() {
        let (_temp, mut store) = store();
        let task = store.add(draft("X"));

        assert!(!task.id.is_empty());
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
        assert!(task.tags.is_empty());
        assert!(task.subtasks.is_empty());

        let other = store.add(draft("Y"));
        assert_ne!(task.id, other.id);
    }

    #[test]
    fn toggle_alternates_and_stamps_completed_at() {
        let (_temp, mut store) = store();
        let id = store.add(draft("X")).id;

        for round in 0..4 {
            let outcome = store.toggle(&id).expect("toggle");
            let expect_completed = round % 2 == 0;
            assert_eq!(outcome.task.completed, expect_completed);
            assert_eq!(outcome.completed_now, expect_completed);
            assert_eq!(outcome.task.completed_at.is_some(), expect_completed);
        }
    }

    #[test]
    fn toggle_unknown_id_is_noop() {
        let (temp, mut store) = store();
        assert!(store.toggle("missing").is_none());
        // No mutation happened, so nothing was persisted either.
        assert!(!temp.path().join("tasks.json").exists());
    }

    #[test]
    fn update_replaces_matching_record() {
        let (_temp, mut store) = store();
        let mut task = store.add(draft("X"));
        task.title = "Renamed".to_string();
        task.subtasks.push(Subtask::new("step one"));

        assert!(store.update(task.clone()));
        let stored = store.get(&task.id).unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.subtasks.len(), 1);
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let (_temp, mut store) = store();
        let mut ghost = store.tasks()[0].clone();
        ghost.id = "missing".to_string();
        assert!(!store.update(ghost));
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn delete_removes_matching_record() {
        let (_temp, mut store) = store();
        let id = store.add(draft("X")).id;
        assert!(store.delete(&id));
        assert!(store.get(&id).is_none());
        assert!(!store.delete(&id));
    }

    #[test]
    fn dates_survive_a_save_load_cycle() {
        let (temp, mut store) = store();
        let mut d = draft("Scheduled");
        d.scheduled_date = NaiveDate::from_ymd_opt(2026, 8, 10);
        d.scheduled_time = Some("7:30 AM".to_string());
        d.deadline = NaiveDate::from_ymd_opt(2026, 9, 1);
        let task = store.add(d);
        store.toggle(&task.id).unwrap();
        let completed_at = store.get(&task.id).unwrap().completed_at;
        assert!(completed_at.is_some());

        let reloaded = reload(&temp);
        let stored = reloaded.get(&task.id).expect("stored task");
        assert_eq!(stored.created_at, task.created_at);
        assert_eq!(stored.scheduled_date, NaiveDate::from_ymd_opt(2026, 8, 10));
        assert_eq!(stored.scheduled_time.as_deref(), Some("7:30 AM"));
        assert_eq!(stored.deadline, NaiveDate::from_ymd_opt(2026, 9, 1));
        assert!(stored.completed);
        assert_eq!(stored.completed_at, completed_at);
    }

    #[test]
    fn due_on_includes_unscheduled_tasks() {
        let (_temp, mut store) = store();
        let day = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let mut scheduled = draft("On the day");
        scheduled.scheduled_date = Some(day);
        let mut later = draft("Later");
        later.scheduled_date = NaiveDate::from_ymd_opt(2026, 8, 20);
        let on_day = store.add(scheduled).id;
        let later_id = store.add(later).id;

        let due: Vec<&str> = store.due_on(day).iter().map(|t| t.id.as_str()).collect();
        assert!(due.contains(&on_day.as_str()));
        assert!(due.contains(&"default-m1"));
        assert!(!due.contains(&later_id.as_str()));

        let exact: Vec<&str> = store
            .scheduled_on(day)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(exact, vec![on_day.as_str()]);
    }

    #[test]
    fn logbook_sorts_by_completion_desc() {
        use chrono::TimeZone;

        let (_temp, mut store) = store();
        let mut first = store.add(draft("first"));
        let mut second = store.add(draft("second"));
        first.completed = true;
        first.completed_at = Some(Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap());
        second.completed = true;
        second.completed_at = Some(Utc.with_ymd_and_hms(2026, 8, 2, 9, 0, 0).unwrap());
        assert!(store.update(first.clone()));
        assert!(store.update(second.clone()));

        let log: Vec<&str> = store.logbook().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(log, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn period_and_priority_parse_round_trip() {
        for period in [
            Period::Morning,
            Period::Evening,
            Period::Miscellaneous,
            Period::Anytime,
        ] {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        for priority in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(priority.as_str().parse::<Priority>().unwrap(), priority);
        }
        assert!("someday".parse::<Period>().is_err());
        assert!("urgent".parse::<Priority>().is_err());
    }
}
