//! rb mood command implementations.

use std::path::PathBuf;

use chrono::Local;

use crate::error::Result;
use crate::mood::{MoodEntry, MoodStore};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

pub struct LogOptions {
    pub emoji: String,
    pub label: String,
    pub note: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub on: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub fn run_log(opts: LogOptions) -> Result<()> {
    let storage = Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = MoodStore::load(storage);
    let entry = store.add(opts.emoji, opts.label, opts.note);

    let mut human = HumanOutput::new(format!("Logged mood {} {}", entry.emoji, entry.label));
    human.push_summary("id", entry.id.clone());

    emit_success(options, "mood log", &entry, Some(&human))
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let storage = Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let store = MoodStore::load(storage);
    let entries: Vec<MoodEntry> = match opts.on.as_deref() {
        Some(raw) => {
            let day = super::parse_date(raw)?;
            store.entry_for(day).cloned().into_iter().collect()
        }
        None => store.entries().to_vec(),
    };

    let mut human = HumanOutput::new("Moods");
    human.push_summary("count", entries.len().to_string());
    for entry in &entries {
        let day = entry.date.with_timezone(&Local).format("%Y-%m-%d");
        match &entry.note {
            Some(note) => human.push_detail(format!("{day}  {} {} - {note}", entry.emoji, entry.label)),
            None => human.push_detail(format!("{day}  {} {}", entry.emoji, entry.label)),
        }
    }

    emit_success(options, "mood list", &entries, Some(&human))
}
