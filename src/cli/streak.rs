//! rb streak and status command implementations.
//!
//! Both are read-only single-pane summaries over the persisted stores.

use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::streak::{Streak, StreakStore};
use crate::task::TaskStore;

pub struct ShowOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct StatusReport {
    tasks: TaskSummary,
    streak: Streak,
}

#[derive(Serialize)]
struct TaskSummary {
    total: usize,
    pending_today: usize,
    completed: usize,
}

pub fn run_show(opts: ShowOptions) -> Result<()> {
    let storage = crate::storage::Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let store = StreakStore::load(storage);
    let streak = store.streak().clone();

    let mut human = HumanOutput::new("Streak");
    push_streak_summary(&mut human, &streak);

    emit_success(options, "streak", &streak, Some(&human))
}

pub fn run_status(opts: StatusOptions) -> Result<()> {
    let (config, storage) = super::open(opts.data_dir, opts.config)?;
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let tasks = TaskStore::load(storage.clone(), &config.tasks);
    let streaks = StreakStore::load(storage);

    let today = Local::now().date_naive();
    let pending_today = tasks
        .due_on(today)
        .iter()
        .filter(|task| !task.completed)
        .count();
    let completed = tasks.tasks().iter().filter(|task| task.completed).count();

    let report = StatusReport {
        tasks: TaskSummary {
            total: tasks.tasks().len(),
            pending_today,
            completed,
        },
        streak: streaks.streak().clone(),
    };

    let mut human = HumanOutput::new("Status");
    human.push_summary("tasks", report.tasks.total.to_string());
    human.push_summary("pending today", report.tasks.pending_today.to_string());
    human.push_summary("completed", report.tasks.completed.to_string());
    push_streak_summary(&mut human, &report.streak);
    if report.tasks.pending_today > 0 {
        human.push_next_step("rb task list --today".to_string());
    }

    emit_success(options, "status", &report, Some(&human))
}

fn push_streak_summary(human: &mut HumanOutput, streak: &Streak) {
    human.push_summary("current streak", format!("{} days", streak.current_streak));
    human.push_summary("longest streak", format!("{} days", streak.longest_streak));
    human.push_summary("total completions", streak.total_completions.to_string());
    let last = streak
        .last_completion_date
        .map(|at| at.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "never".to_string());
    human.push_summary("last completion", last);
}
