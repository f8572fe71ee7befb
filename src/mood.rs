//! Mood journal entries.
//!
//! A flat list of dated entries (`moods.json`), newest first. Moods sit
//! beside the task data but are not wired into the completion flow.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{Storage, MOODS_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: String,
    pub emoji: String,
    pub label: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Mood journal synchronized to storage.
#[derive(Debug, Clone)]
pub struct MoodStore {
    storage: Storage,
    moods: Vec<MoodEntry>,
}

impl MoodStore {
    /// Load the journal; missing or unreadable storage starts empty.
    pub fn load(storage: Storage) -> Self {
        let moods = storage.get_item(MOODS_KEY).unwrap_or_default();
        Self { storage, moods }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.moods
    }

    /// Record a mood now; new entries sit at the front of the journal.
    pub fn add(&mut self, emoji: String, label: String, note: Option<String>) -> MoodEntry {
        let entry = MoodEntry {
            id: Uuid::new_v4().to_string(),
            emoji,
            label,
            date: Utc::now(),
            note,
        };
        self.moods.insert(0, entry.clone());
        self.persist();
        entry
    }

    /// First entry recorded on the given calendar day.
    pub fn entry_for(&self, day: NaiveDate) -> Option<&MoodEntry> {
        self.moods
            .iter()
            .find(|entry| entry.date.with_timezone(&Local).date_naive() == day)
    }

    fn persist(&self) {
        self.storage.set_item(MOODS_KEY, &self.moods);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, MoodStore) {
        let temp = TempDir::new().unwrap();
        let store = MoodStore::load(Storage::new(temp.path().to_path_buf()));
        (temp, store)
    }

    #[test]
    fn journal_starts_empty() {
        let (_temp, store) = store();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn add_prepends_and_persists() {
        let (temp, mut store) = store();
        store.add("😐".to_string(), "Neutral".to_string(), None);
        store.add(
            "😊".to_string(),
            "Happy".to_string(),
            Some("good run".to_string()),
        );

        let reloaded = MoodStore::load(Storage::new(temp.path().to_path_buf()));
        assert_eq!(reloaded.entries().len(), 2);
        assert_eq!(reloaded.entries()[0].label, "Happy");
        assert_eq!(reloaded.entries()[0].note.as_deref(), Some("good run"));
        assert_eq!(reloaded.entries()[1].label, "Neutral");
    }

    #[test]
    fn entry_for_matches_on_calendar_day() {
        let (_temp, mut store) = store();
        let entry = store.add("😊".to_string(), "Happy".to_string(), None);

        let today = entry.date.with_timezone(&Local).date_naive();
        assert_eq!(store.entry_for(today).map(|e| e.id.as_str()), Some(entry.id.as_str()));
        assert!(store.entry_for(today - chrono::Duration::days(1)).is_none());
    }
}
