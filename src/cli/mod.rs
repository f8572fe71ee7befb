//! Command-line interface for rb
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is implemented in its own submodule.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::storage::Storage;

mod area;
mod mood;
mod streak;
mod task;

/// rb - Routine Buddy
///
/// A local-first daily routine tracker: tasks bucketed by time of day,
/// areas with projects, a mood journal, and completion streaks.
#[derive(Parser, Debug)]
#[command(name = "rb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, global = true, env = "RB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Configuration file (defaults to config.toml in the data directory)
    #[arg(long, global = true, env = "RB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Area and project management
    #[command(subcommand)]
    Area(AreaCommands),

    /// Mood journal
    #[command(subcommand)]
    Mood(MoodCommands),

    /// Show the completion streak
    Streak,

    /// Show a one-pane overview
    Status,
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Time-of-day period: morning, evening, miscellaneous, anytime
        #[arg(long)]
        period: Option<String>,

        /// Priority: low, medium, high
        #[arg(long)]
        priority: Option<String>,

        /// Owning area id
        #[arg(long)]
        area: Option<String>,

        /// Owning project id
        #[arg(long)]
        project: Option<String>,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Scheduled date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,

        /// Display time for the schedule (e.g. "7:30 AM")
        #[arg(long)]
        at: Option<String>,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
    },

    /// List tasks
    List {
        /// Today view: unscheduled tasks plus anything scheduled today
        #[arg(long)]
        today: bool,

        /// Only tasks scheduled on a date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,

        /// Completed tasks only, newest completion first
        #[arg(long)]
        logbook: bool,

        /// Filter by period
        #[arg(long)]
        period: Option<String>,

        /// Filter by area id
        #[arg(long)]
        area: Option<String>,

        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },

    /// Show one task
    Show {
        /// Task id
        id: String,
    },

    /// Edit fields of an existing task
    Edit {
        /// Task id
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,

        /// New period
        #[arg(long)]
        period: Option<String>,

        /// New priority
        #[arg(long)]
        priority: Option<String>,

        /// New owning area id
        #[arg(long)]
        area: Option<String>,

        /// New owning project id
        #[arg(long)]
        project: Option<String>,

        /// New scheduled date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,

        /// New display time for the schedule
        #[arg(long)]
        at: Option<String>,

        /// New deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,

        /// Add a tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Append a subtask (repeatable)
        #[arg(long = "subtask")]
        subtasks: Vec<String>,
    },

    /// Toggle completion state
    Toggle {
        /// Task id
        id: String,
    },

    /// Remove a task
    Rm {
        /// Task id
        id: String,
    },
}

/// Area subcommands
#[derive(Subcommand, Debug)]
pub enum AreaCommands {
    /// List areas and their projects
    List,

    /// Add a new area
    Add {
        /// Area name
        name: String,

        /// Icon name
        #[arg(long, default_value = "star")]
        icon: String,

        /// Display color (hex)
        #[arg(long, default_value = "#007AFF")]
        color: String,
    },

    /// Add a project to an area
    Project {
        /// Area id
        area: String,

        /// Project title
        title: String,
    },
}

/// Mood subcommands
#[derive(Subcommand, Debug)]
pub enum MoodCommands {
    /// Record a mood for right now
    Log {
        /// Emoji for the entry
        emoji: String,

        /// Short label (e.g. Happy, Neutral)
        label: String,

        /// Optional note
        #[arg(long)]
        note: Option<String>,
    },

    /// List journal entries
    List {
        /// Only the entry for a date (YYYY-MM-DD)
        #[arg(long)]
        on: Option<String>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Task(cmd) => match cmd {
                TaskCommands::Add {
                    title,
                    period,
                    priority,
                    area,
                    project,
                    notes,
                    on,
                    at,
                    deadline,
                } => task::run_add(task::AddOptions {
                    title,
                    period,
                    priority,
                    area,
                    project,
                    notes,
                    on,
                    at,
                    deadline,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::List {
                    today,
                    on,
                    logbook,
                    period,
                    area,
                    all,
                } => task::run_list(task::ListOptions {
                    today,
                    on,
                    logbook,
                    period,
                    area,
                    all,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Show { id } => task::run_show(task::ShowOptions {
                    id,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Edit {
                    id,
                    title,
                    notes,
                    period,
                    priority,
                    area,
                    project,
                    on,
                    at,
                    deadline,
                    tags,
                    subtasks,
                } => task::run_edit(task::EditOptions {
                    id,
                    title,
                    notes,
                    period,
                    priority,
                    area,
                    project,
                    on,
                    at,
                    deadline,
                    tags,
                    subtasks,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Toggle { id } => task::run_toggle(task::ToggleOptions {
                    id,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TaskCommands::Rm { id } => task::run_rm(task::RmOptions {
                    id,
                    data_dir: self.data_dir,
                    config: self.config,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Area(cmd) => match cmd {
                AreaCommands::List => area::run_list(area::ListOptions {
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AreaCommands::Add { name, icon, color } => area::run_add(area::AddOptions {
                    name,
                    icon,
                    color,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                AreaCommands::Project { area, title } => {
                    area::run_project(area::ProjectOptions {
                        area,
                        title,
                        data_dir: self.data_dir,
                        json: self.json,
                        quiet: self.quiet,
                    })
                }
            },
            Commands::Mood(cmd) => match cmd {
                MoodCommands::Log { emoji, label, note } => mood::run_log(mood::LogOptions {
                    emoji,
                    label,
                    note,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                MoodCommands::List { on } => mood::run_list(mood::ListOptions {
                    on,
                    data_dir: self.data_dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Streak => streak::run_show(streak::ShowOptions {
                data_dir: self.data_dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Status => streak::run_status(streak::StatusOptions {
                data_dir: self.data_dir,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
        }
    }
}

/// Resolve storage and configuration for a command invocation.
pub(crate) fn open(
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<(Config, Storage)> {
    let storage = Storage::resolve(data_dir);
    let config = match config_path {
        Some(path) => Config::load(&path)?,
        None => Config::load_or_default(&storage.config_file()),
    };
    Ok((config, storage))
}

/// Parse a YYYY-MM-DD argument.
pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
        Error::InvalidArgument(format!("invalid date '{raw}': {err} (expected YYYY-MM-DD)"))
    })
}
