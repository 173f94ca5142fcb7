use super::{default_project_path, Cmd};
use anyhow::Context;
use clap::Parser;
use difftrack::Project;
use std::path::PathBuf;

/// `difftrack init <originating-path> [--project-path PATH]`
#[derive(Parser, Debug)]
pub struct InitOpts {
    /// folder to scan for data files
    pub originating_path: PathBuf,
    /// where to store the project's snapshots (defaults to ./project)
    #[clap(short = 'C', long = "project-path", default_value_os_t = default_project_path())]
    pub project_path: PathBuf,
}

impl Cmd for InitOpts {
    fn exec(self) -> anyhow::Result<()> {
        let project = Project::create(self.project_path.clone(), self.originating_path)
            .with_context(|| format!("failed to create project at {}", self.project_path.display()))?;

        println!("tracking {} file(s) under `{}`", project.tracked_files.len(), project.project_name);
        for name in project.project_folders.keys() {
            println!("  {name}");
        }
        Ok(())
    }
}
