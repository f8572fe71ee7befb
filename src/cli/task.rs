//! rb task command implementations.

use std::path::PathBuf;

use chrono::{Local, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::streak::{Streak, StreakStore};
use crate::task::{Period, Subtask, Task, TaskDraft, TaskStore};

pub struct AddOptions {
    pub title: String,
    pub period: Option<String>,
    pub priority: Option<String>,
    pub area: Option<String>,
    pub project: Option<String>,
    pub notes: Option<String>,
    pub on: Option<String>,
    pub at: Option<String>,
    pub deadline: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub today: bool,
    pub on: Option<String>,
    pub logbook: bool,
    pub period: Option<String>,
    pub area: Option<String>,
    pub all: bool,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub period: Option<String>,
    pub priority: Option<String>,
    pub area: Option<String>,
    pub project: Option<String>,
    pub on: Option<String>,
    pub at: Option<String>,
    pub deadline: Option<String>,
    pub tags: Vec<String>,
    pub subtasks: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ToggleOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ToggleReport {
    toggled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    streak: Option<Streak>,
}

#[derive(Serialize)]
struct RmReport {
    removed: bool,
    id: String,
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let title = opts.title.trim().to_string();
    if title.is_empty() {
        return Err(Error::InvalidArgument("task title cannot be empty".to_string()));
    }

    let period = match opts.period.as_deref() {
        Some(raw) => raw.parse()?,
        None => config.tasks.default_period(),
    };
    let priority = match opts.priority.as_deref() {
        Some(raw) => raw.parse()?,
        None => config.tasks.default_priority(),
    };
    let area_id = opts.area.unwrap_or_else(|| config.tasks.seed_area.clone());
    let scheduled_date = opts.on.as_deref().map(super::parse_date).transpose()?;
    let deadline = opts.deadline.as_deref().map(super::parse_date).transpose()?;

    let mut store = TaskStore::load(storage, &config.tasks);
    let task = store.add(TaskDraft {
        title,
        notes: opts.notes,
        area_id,
        project_id: opts.project,
        period,
        priority,
        scheduled_date,
        scheduled_time: opts.at,
        deadline,
    });

    let mut human = HumanOutput::new(format!("Added '{}'", task.title));
    human.push_summary("id", task.id.clone());
    human.push_summary("period", task.period.to_string());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("area", task.area_id.clone());
    if let Some(date) = task.scheduled_date {
        human.push_summary("scheduled", date.to_string());
    }

    emit_success(options, "task add", &task, Some(&human))
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let day_filter = opts.on.as_deref().map(super::parse_date).transpose()?;
    let period_filter = opts
        .period
        .as_deref()
        .map(str::parse::<Period>)
        .transpose()?;

    let store = TaskStore::load(storage, &config.tasks);
    let mut listed: Vec<Task> = if opts.logbook {
        store.logbook().into_iter().cloned().collect()
    } else if let Some(day) = day_filter {
        store.scheduled_on(day).into_iter().cloned().collect()
    } else if opts.today {
        let today = Local::now().date_naive();
        store.due_on(today).into_iter().cloned().collect()
    } else {
        store.tasks().to_vec()
    };

    if let Some(period) = period_filter {
        listed.retain(|task| task.period == period);
    }
    if let Some(area) = &opts.area {
        listed.retain(|task| &task.area_id == area);
    }
    if !opts.logbook && !opts.all {
        listed.retain(|task| !task.completed);
    }

    let mut human = HumanOutput::new("Tasks");
    human.push_summary("count", listed.len().to_string());
    for task in &listed {
        human.push_detail(task_line(task));
    }
    if listed.is_empty() {
        human.push_detail("no tasks match".to_string());
    }

    emit_success(options, "task list", &listed, Some(&human))
}

pub fn run_show(opts: ShowOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let store = TaskStore::load(storage, &config.tasks);
    let task = store
        .get(&opts.id)
        .cloned()
        .ok_or_else(|| Error::InvalidArgument(format!("task not found: {}", opts.id)))?;

    let mut human = HumanOutput::new(format!("Task '{}'", task.title));
    human.push_summary("id", task.id.clone());
    human.push_summary("period", task.period.to_string());
    human.push_summary("priority", task.priority.to_string());
    human.push_summary("area", task.area_id.clone());
    human.push_summary("completed", if task.completed { "yes" } else { "no" });
    if let Some(notes) = &task.notes {
        human.push_summary("notes", notes.clone());
    }
    if let Some(date) = task.scheduled_date {
        match &task.scheduled_time {
            Some(time) => human.push_summary("scheduled", format!("{date} {time}")),
            None => human.push_summary("scheduled", date.to_string()),
        }
    }
    if let Some(deadline) = task.deadline {
        human.push_summary("deadline", deadline.to_string());
    }
    if !task.tags.is_empty() {
        human.push_summary("tags", task.tags.join(", "));
    }
    for subtask in &task.subtasks {
        let marker = if subtask.completed { "x" } else { " " };
        human.push_detail(format!("[{marker}] {}", subtask.title));
    }

    emit_success(options, "task show", &task, Some(&human))
}

pub fn run_edit(opts: EditOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = TaskStore::load(storage, &config.tasks);
    let mut task = match store.get(&opts.id).cloned() {
        Some(task) => task,
        None => {
            let mut human = HumanOutput::new("Nothing to edit");
            human.push_warning(format!("task not found: {}", opts.id));
            return emit_success(
                options,
                "task edit",
                &serde_json::json!({ "updated": false, "id": opts.id }),
                Some(&human),
            );
        }
    };

    if let Some(title) = opts.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::InvalidArgument("task title cannot be empty".to_string()));
        }
        task.title = title;
    }
    if let Some(notes) = opts.notes {
        task.notes = Some(notes);
    }
    if let Some(period) = opts.period.as_deref() {
        task.period = period.parse()?;
    }
    if let Some(priority) = opts.priority.as_deref() {
        task.priority = priority.parse()?;
    }
    if let Some(area) = opts.area {
        task.area_id = area;
    }
    if let Some(project) = opts.project {
        task.project_id = Some(project);
    }
    if let Some(on) = opts.on.as_deref() {
        task.scheduled_date = Some(super::parse_date(on)?);
    }
    if let Some(at) = opts.at {
        task.scheduled_time = Some(at);
    }
    if let Some(deadline) = opts.deadline.as_deref() {
        task.deadline = Some(super::parse_date(deadline)?);
    }
    for tag in opts.tags {
        if !task.tags.contains(&tag) {
            task.tags.push(tag);
        }
    }
    for title in opts.subtasks {
        task.subtasks.push(Subtask::new(title));
    }

    store.update(task.clone());

    let mut human = HumanOutput::new(format!("Updated '{}'", task.title));
    human.push_summary("id", task.id.clone());

    emit_success(options, "task edit", &task, Some(&human))
}

pub fn run_toggle(opts: ToggleOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = TaskStore::load(storage.clone(), &config.tasks);
    match store.toggle(&opts.id) {
        Some(outcome) => {
            // Completion transitions feed the streak engine exactly once;
            // un-completing leaves the streak untouched.
            let streak = if outcome.completed_now {
                let mut streaks = StreakStore::load(storage);
                Some(streaks.record_completion(Utc::now()).clone())
            } else {
                None
            };

            let (state, header) = if outcome.task.completed {
                ("completed", "Completed")
            } else {
                ("reopened", "Reopened")
            };
            let mut human = HumanOutput::new(format!("{header} '{}'", outcome.task.title));
            human.push_summary("id", outcome.task.id.clone());
            human.push_summary("state", state);
            if let Some(streak) = &streak {
                human.push_summary("current streak", format!("{} days", streak.current_streak));
                human.push_summary("total completions", streak.total_completions.to_string());
            }

            let report = ToggleReport {
                toggled: true,
                task: Some(outcome.task),
                streak,
            };
            emit_success(options, "task toggle", &report, Some(&human))
        }
        None => {
            let mut human = HumanOutput::new("Nothing to toggle");
            human.push_warning(format!("task not found: {}", opts.id));
            let report = ToggleReport {
                toggled: false,
                task: None,
                streak: None,
            };
            emit_success(options, "task toggle", &report, Some(&human))
        }
    }
}

pub fn run_rm(opts: RmOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = TaskStore::load(storage, &config.tasks);
    let removed = store.delete(&opts.id);

    let mut human = if removed {
        HumanOutput::new("Removed task")
    } else {
        let mut human = HumanOutput::new("Nothing to remove");
        human.push_warning(format!("task not found: {}", opts.id));
        human
    };
    human.push_summary("id", opts.id.clone());

    let report = RmReport {
        removed,
        id: opts.id,
    };
    emit_success(options, "task rm", &report, Some(&human))
}

fn task_line(task: &Task) -> String {
    let marker = if task.completed { "x" } else { " " };
    let mut line = format!(
        "[{marker}] {}  {:13} {}",
        task.id,
        task.period.as_str(),
        task.title
    );
    if let Some(date) = task.scheduled_date {
        match &task.scheduled_time {
            Some(time) => line.push_str(&format!("  ({date} {time})")),
            None => line.push_str(&format!("  ({date})")),
        }
    }
    line
}
