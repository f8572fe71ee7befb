//! Areas and their nested projects.
//!
//! Areas are user-defined top-level categories (Work, Personal, ...) that
//! group projects and standalone tasks. The whole hierarchy is one blob
//! (`areas.json`). Unlike tasks, stored data replaces the seed set wholesale:
//! seeds only apply when storage is empty or unreadable.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{Storage, AREAS_KEY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub area_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// Ids of the tasks attached to this project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Area hierarchy synchronized to storage.
#[derive(Debug, Clone)]
pub struct AreaStore {
    storage: Storage,
    areas: Vec<Area>,
}

impl AreaStore {
    /// Load areas; an empty or unreadable blob falls back to the seed set.
    pub fn load(storage: Storage) -> Self {
        let areas = match storage.get_item::<Vec<Area>>(AREAS_KEY) {
            Some(stored) if !stored.is_empty() => stored,
            _ => seed_areas(),
        };
        Self { storage, areas }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.iter().find(|area| area.id == id)
    }

    /// Create a new area with no projects.
    pub fn add_area(&mut self, name: String, icon: String, color: String) -> Area {
        let area = Area {
            id: Uuid::new_v4().to_string(),
            name,
            icon,
            color,
            projects: Vec::new(),
        };
        self.areas.push(area.clone());
        self.persist();
        area
    }

    /// Attach a new project to an area. Unknown area ids are a no-op.
    pub fn add_project(&mut self, area_id: &str, title: String) -> Option<Project> {
        let project = Project {
            id: Uuid::new_v4().to_string(),
            title,
            description: None,
            area_id: area_id.to_string(),
            deadline: None,
            tasks: Vec::new(),
            completed: false,
            created_at: Utc::now(),
        };
        let area = self.areas.iter_mut().find(|area| area.id == area_id)?;
        area.projects.push(project.clone());
        self.persist();
        Some(project)
    }

    fn persist(&self) {
        self.storage.set_item(AREAS_KEY, &self.areas);
    }
}

/// The default areas offered before the user has stored any of their own.
fn seed_areas() -> Vec<Area> {
    [
        ("work", "Work", "work", "#007AFF"),
        ("personal", "Personal", "personal", "#AF52DE"),
        ("health", "Health", "health", "#34C759"),
        ("family", "Family", "family", "#FF9500"),
    ]
    .into_iter()
    .map(|(id, name, icon, color)| Area {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        projects: Vec::new(),
    })
    .collect()
}
