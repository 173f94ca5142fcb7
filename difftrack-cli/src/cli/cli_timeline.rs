use super::render::render_diff_tree;
use super::Cmd;
use anyhow::{Context, bail};
use clap::Parser;
use difftrack::pathfilter::filter_path;
use difftrack::{parser, Node, Project, Timeline};
use std::path::PathBuf;
use std::rc::Rc;

/// `difftrack timeline <project-path> <file> [--path a.b.c]`
#[derive(Parser, Debug)]
pub struct TimelineOpts {
    pub project_path: PathBuf,
    /// the originally tracked source file (used to locate its timeline folder)
    pub file: PathBuf,
    /// dot-separated key path to filter the timeline down to (§4.4)
    #[clap(long)]
    pub path: Option<String>,
}

impl Cmd for TimelineOpts {
    fn exec(self) -> anyhow::Result<()> {
        let project = Project::load(&self.project_path)
            .with_context(|| format!("failed to load project at {}", self.project_path.display()))?;

        let snapshot_paths = project.snapshots_for(&self.file).context("failed to list snapshots")?;
        if snapshot_paths.is_empty() {
            bail!("no snapshots found for `{}` — is it tracked by this project?", self.file.display());
        }

        let snapshots: Vec<Rc<Node>> = snapshot_paths
            .iter()
            .map(|path| parser::parse(path).map(Rc::new))
            .collect::<difftrack::Result<_>>()
            .context("failed to parse a snapshot")?;

        let timeline = Timeline::build_from_snapshots(&snapshots)?;

        match self.path {
            None => {
                let mut out = String::new();
                for version in timeline.iter() {
                    out.push_str(&format!("version {}\n", version.version));
                    render_diff_tree(&version.tree, version.tree.root(), 1, &mut out);
                }
                print!("{out}");
            }
            Some(path) => {
                let key_path: Vec<difftrack::Key> = path.split('.').map(Rc::from).collect();
                let filtered = filter_path(&timeline, &key_path);
                let mut out = String::new();
                for version in filtered.iter() {
                    out.push_str(&format!(
                        "filtered #{} (version {})\n",
                        version.filtered_index, version.original_version
                    ));
                    render_diff_tree(&version.tree, version.node, 1, &mut out);
                }
                print!("{out}");
            }
        }
        Ok(())
    }
}
