use super::Cmd;
use anyhow::Context;
use clap::Parser;
use difftrack::Project;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// `difftrack watch <project-path> [--once] [--interval-ms N]`
#[derive(Parser, Debug)]
pub struct WatchOpts {
    pub project_path: PathBuf,
    /// run a single tick and exit instead of looping
    #[clap(long)]
    pub once: bool,
    #[clap(long, default_value_t = 1000)]
    pub interval_ms: u64,
}

impl Cmd for WatchOpts {
    fn exec(self) -> anyhow::Result<()> {
        let mut project = Project::load(&self.project_path)
            .with_context(|| format!("failed to load project at {}", self.project_path.display()))?;

        loop {
            let dirty = project.tick().context("watcher tick failed")?;
            if dirty {
                log::info!("new snapshot(s) written, project state persisted");
            }
            if self.once {
                break;
            }
            thread::sleep(Duration::from_millis(self.interval_ms));
        }
        Ok(())
    }
}
