use super::render::render_diff_tree;
use super::Cmd;
use anyhow::{bail, Context};
use clap::Parser;
use difftrack::{parser, DiffTree, Project};
use std::path::PathBuf;

/// `difftrack diff <project-path> <file> <version-a> <version-b>` — diff two
/// arbitrary snapshots of a tracked file directly, independent of the
/// version-to-version chain a `Timeline` builds.
#[derive(Parser, Debug)]
pub struct DiffOpts {
    pub project_path: PathBuf,
    pub file: PathBuf,
    pub version_a: usize,
    pub version_b: usize,
}

impl Cmd for DiffOpts {
    fn exec(self) -> anyhow::Result<()> {
        let project = Project::load(&self.project_path)
            .with_context(|| format!("failed to load project at {}", self.project_path.display()))?;

        let snapshot_paths = project.snapshots_for(&self.file).context("failed to list snapshots")?;
        let snapshot_count = snapshot_paths.len();
        let path_a = snapshot_paths
            .get(self.version_a)
            .with_context(|| format!("version {} out of range (have {snapshot_count})", self.version_a))?;
        let path_b = snapshot_paths
            .get(self.version_b)
            .with_context(|| format!("version {} out of range (have {snapshot_count})", self.version_b))?;

        if self.version_a == self.version_b {
            bail!("version-a and version-b are the same snapshot");
        }

        let a = parser::parse(path_a)?;
        let b = parser::parse(path_b)?;
        let tree = DiffTree::compare(Some(&std::rc::Rc::new(a)), Some(&std::rc::Rc::new(b)));

        let mut out = String::new();
        render_diff_tree(&tree, tree.root(), 0, &mut out);
        print!("{out}");
        Ok(())
    }
}
