mod cli_diff;
mod cli_init;
mod cli_timeline;
mod cli_watch;
mod render;

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

pub trait Cmd {
    fn exec(self) -> anyhow::Result<()>;
}

pub fn run<T: Into<OsString> + Clone>(args: impl IntoIterator<Item = T>) -> anyhow::Result<()> {
    let opts = DifftrackCliOpts::parse_from(args);
    match opts.subcmd {
        DifftrackSubCmd::Init(opts) => opts.exec(),
        DifftrackSubCmd::Watch(opts) => opts.exec(),
        DifftrackSubCmd::Timeline(opts) => opts.exec(),
        DifftrackSubCmd::Diff(opts) => opts.exec(),
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "observe structured documents and browse their diff history")]
pub struct DifftrackCliOpts {
    #[clap(subcommand)]
    pub subcmd: DifftrackSubCmd,
}

#[derive(Subcommand, Debug)]
pub enum DifftrackSubCmd {
    /// start tracking every data file under a folder
    Init(cli_init::InitOpts),
    /// run the watcher tick, once or on an interval
    Watch(cli_watch::WatchOpts),
    /// print a tracked file's diff timeline
    Timeline(cli_timeline::TimelineOpts),
    /// diff two arbitrary snapshots of a tracked file directly
    Diff(cli_diff::DiffOpts),
}

pub(crate) fn default_project_path() -> PathBuf {
    PathBuf::from("./project")
}
