//! rb area command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::area::{Area, AreaStore, Project};
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::Storage;

pub struct ListOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct AddOptions {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ProjectOptions {
    pub area: String,
    pub title: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ProjectReport {
    added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<Project>,
}

pub fn run_list(opts: ListOptions) -> Result<()> {
    let storage = Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let store = AreaStore::load(storage);
    let areas: Vec<Area> = store.areas().to_vec();

    let mut human = HumanOutput::new("Areas");
    human.push_summary("count", areas.len().to_string());
    for area in &areas {
        human.push_detail(format!(
            "{}  {} ({} projects)",
            area.id,
            area.name,
            area.projects.len()
        ));
        for project in &area.projects {
            human.push_detail(format!("    {}  {}", project.id, project.title));
        }
    }

    emit_success(options, "area list", &areas, Some(&human))
}

pub fn run_add(opts: AddOptions) -> Result<()> {
    let storage = Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = AreaStore::load(storage);
    let area = store.add_area(opts.name, opts.icon, opts.color);

    let mut human = HumanOutput::new(format!("Added area '{}'", area.name));
    human.push_summary("id", area.id.clone());
    human.push_summary("color", area.color.clone());

    emit_success(options, "area add", &area, Some(&human))
}

pub fn run_project(opts: ProjectOptions) -> Result<()> {
    let storage = Storage::resolve(opts.data_dir);
    let options = OutputOptions {
        json: opts.json,
        quiet: opts.quiet,
    };

    let mut store = AreaStore::load(storage);
    match store.add_project(&opts.area, opts.title) {
        Some(project) => {
            let mut human = HumanOutput::new(format!("Added project '{}'", project.title));
            human.push_summary("id", project.id.clone());
            human.push_summary("area", project.area_id.clone());
            let report = ProjectReport {
                added: true,
                project: Some(project),
            };
            emit_success(options, "area project", &report, Some(&human))
        }
        None => {
            let mut human = HumanOutput::new("Nothing to add");
            human.push_warning(format!("area not found: {}", opts.area));
            let report = ProjectReport {
                added: false,
                project: None,
            };
            emit_success(options, "area project", &report, Some(&human))
        }
    }
}
