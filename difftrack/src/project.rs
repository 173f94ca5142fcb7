//! persisted watcher state for a set of tracked documents (§3.4, §4.6).
//!
//! grounded directly on `examples/original_source/src/main.cpp`'s `Project`
//! struct and its `check_timeline()` tick: same field set, same `.tml`
//! timeline-folder suffix, same `<unix-seconds>.json` snapshot naming, same
//! "missing file hashes as `{}`" leniency, same dirty-flag batched save.

use crate::error::{Error, Result};
use crate::hash::fnv1a_hex;
use crate::parser;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

pub const TIMELINE_SUFFIX: &str = ".tml";
const PROJECT_META_FILE: &str = "project.json";
const SESSION_META_FILE: &str = "difftrack-session.json";

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Project {
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_selected_name")]
    pub selected_name: String,
    #[serde(default)]
    pub selected_path: String,
    #[serde(default)]
    pub project_path: PathBuf,
    #[serde(default)]
    pub originating_path: PathBuf,
    #[serde(default)]
    pub last_file_count: usize,
    #[serde(default)]
    pub tracked_files: BTreeSet<PathBuf>,
    #[serde(default)]
    pub tracked_hashes: BTreeMap<PathBuf, String>,
    #[serde(default)]
    pub project_folders: BTreeMap<String, PathBuf>,
    /// fields this version of the format doesn't know about yet. kept around
    /// and written back untouched on `save()` (§6.1 "unknown fields are
    /// preserved on read and ignored").
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_project_name() -> String {
    "pick a project".to_string()
}

fn default_selected_name() -> String {
    "pick a timeline".to_string()
}

impl Default for Project {
    fn default() -> Self {
        Project {
            project_name: default_project_name(),
            selected_name: default_selected_name(),
            selected_path: String::new(),
            project_path: PathBuf::new(),
            originating_path: PathBuf::new(),
            last_file_count: 0,
            tracked_files: BTreeSet::new(),
            tracked_hashes: BTreeMap::new(),
            project_folders: BTreeMap::new(),
            extra: serde_json::Map::new(),
        }
    }
}

/// recursively enumerate `.json` files under `root`, in a stable order
/// (§4.6 "snapshot ordering" relies on deterministic insertion order for
/// ties, so this walk is sorted by path rather than OS readdir order).
fn find_data_files(root: &Path) -> Vec<PathBuf> {
    use itertools::Itertools;
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("json"))
        .map(|entry| entry.into_path())
        .sorted()
        .collect()
}

fn timeline_name_for(source_path: &Path) -> String {
    let stem = source_path.file_stem().and_then(|s| s.to_str()).unwrap_or("unnamed");
    format!("{stem}{TIMELINE_SUFFIX}")
}

fn read_contents_or_empty(path: &Path) -> Result<Vec<u8>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(b"{}".to_vec()),
        Err(source) => Err(Error::Io { path: path.to_path_buf(), source }),
    }
}

/// nanoseconds since the epoch. whole-second resolution let two snapshots
/// taken within the same second collide on filename and silently overwrite
/// each other; nanoseconds keep the same "zero-padded-free but monotonic"
/// lexicographic-equals-chronological property (§6.1) since the digit count
/// stays fixed for centuries either way, just at a resolution fine enough
/// that a real tick can't produce two equal values.
fn unix_timestamp_nanos_now() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0)
}

/// picks a snapshot path under `folder` for `timestamp`, bumping by one
/// nanosecond if that exact path is already taken (§6.1 "monotonic").
fn unique_snapshot_path(folder: &Path, timestamp: u128) -> PathBuf {
    let mut ts = timestamp;
    loop {
        let candidate = folder.join(format!("{ts}.json"));
        if !candidate.exists() {
            return candidate;
        }
        ts += 1;
    }
}

impl Project {
    /// scaffold a new project rooted at `project_path`, tracking every data
    /// file found recursively under `originating_path` (§4.6 step 1, applied
    /// once up front instead of waiting for the first tick).
    pub fn create(project_path: PathBuf, originating_path: PathBuf) -> Result<Project> {
        std::fs::create_dir_all(&project_path)
            .map_err(|source| Error::Io { path: project_path.clone(), source })?;

        let found = find_data_files(&originating_path);
        let project_name = originating_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(default_project_name);

        let mut project = Project {
            project_name,
            project_path: project_path.clone(),
            originating_path: originating_path.clone(),
            last_file_count: found.len(),
            ..Default::default()
        };

        for path in &found {
            project.begin_tracking(path)?;
            project.snapshot_if_changed(path)?;
        }

        project.save()?;
        log::info!("created project `{}` tracking {} file(s) under {}",
            project.project_name, project.tracked_files.len(), project.originating_path.display());
        Ok(project)
    }

    /// load a project's persisted metadata from `project_path/project.json`.
    /// missing fields default (§4.6 "missing fields take defaults").
    pub fn load(project_path: &Path) -> Result<Project> {
        let meta_path = project_path.join(PROJECT_META_FILE);
        let contents = match std::fs::read_to_string(&meta_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Project::default()),
            Err(source) => return Err(Error::Io { path: meta_path, source }),
        };
        serde_json::from_str(&contents)
            .map_err(|err| Error::InvalidSyntax(meta_path, err.to_string()))
    }

    pub fn save(&self) -> Result<()> {
        let meta_path = self.project_path.join(PROJECT_META_FILE);
        let contents = serde_json::to_string_pretty(self)
            .map_err(|err| Error::InvalidType(meta_path.clone(), err.to_string()))?;
        std::fs::write(&meta_path, contents).map_err(|source| Error::Io { path: meta_path, source })
    }

    fn begin_tracking(&mut self, path: &Path) -> Result<()> {
        let name = timeline_name_for(path);
        let folder = self.project_path.join(&name);
        std::fs::create_dir_all(&folder).map_err(|source| Error::Io { path: folder.clone(), source })?;
        self.tracked_files.insert(path.to_path_buf());
        self.project_folders.insert(name, folder);
        Ok(())
    }

    /// the hashing half of a tick (§4.6 step 2): read, validate, fingerprint,
    /// and snapshot-if-different. returns whether a new snapshot was
    /// written. an invalid document is silently skipped, to be retried next
    /// tick (§4.6 "content validity policy").
    fn snapshot_if_changed(&mut self, path: &Path) -> Result<bool> {
        let name = timeline_name_for(path);
        let Some(folder) = self.project_folders.get(&name).cloned() else { return Ok(false) };

        let contents = read_contents_or_empty(path)?;
        if let Err(err) = parser::parse_str(path, &String::from_utf8_lossy(&contents)) {
            log::debug!("skipping invalid document {}: {err}", path.display());
            return Ok(false);
        }

        let hash = fnv1a_hex(&contents);
        if self.tracked_hashes.get(path) == Some(&hash) {
            return Ok(false);
        }

        let snapshot_path = unique_snapshot_path(&folder, unix_timestamp_nanos_now());
        std::fs::write(&snapshot_path, &contents)
            .map_err(|source| Error::Io { path: snapshot_path, source })?;
        self.tracked_hashes.insert(path.to_path_buf(), hash);
        log::debug!("wrote snapshot {}", snapshot_path.display());
        Ok(true)
    }

    /// one watcher tick (§4.6). returns `true` if anything changed (a new
    /// tracked file, a new snapshot), in which case the caller should
    /// invalidate and rebuild any in-memory timeline built from this
    /// project's folders.
    pub fn tick(&mut self) -> Result<bool> {
        let mut dirty = false;

        if self.originating_path.as_os_str().is_empty() || self.project_path.as_os_str().is_empty() {
            return Ok(false);
        }

        if self.originating_path.is_dir() {
            let found = find_data_files(&self.originating_path);
            if found.len() != self.last_file_count {
                for path in &found {
                    if !self.tracked_files.contains(path) {
                        log::info!("tracking new file {}", path.display());
                        self.begin_tracking(path)?;
                        dirty = true;
                    }
                }
                self.last_file_count = found.len();
            }
        }

        let tracked: Vec<PathBuf> = self.tracked_files.iter().cloned().collect();
        for path in &tracked {
            if self.snapshot_if_changed(path)? {
                dirty = true;
            }
        }

        if dirty {
            self.save()?;
        }
        Ok(dirty)
    }

    /// snapshot files for one tracked source path, in chronological
    /// (lexicographic-by-timestamp) order (§4.6 "snapshot ordering").
    pub fn snapshots_for(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let name = timeline_name_for(path);
        let Some(folder) = self.project_folders.get(&name) else { return Ok(Vec::new()) };
        let mut entries: Vec<PathBuf> = std::fs::read_dir(folder)
            .map_err(|source| Error::Io { path: folder.clone(), source })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
            .collect();
        entries.sort();
        Ok(entries)
    }
}

/// the session file (§6.1): records the last-opened project so the CLI
/// resumes to it without being told again.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Session {
    #[serde(default)]
    pub project_path: PathBuf,
}

impl Session {
    pub fn load(cwd: &Path) -> Result<Session> {
        let path = cwd.join(SESSION_META_FILE);
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| Error::InvalidSyntax(path, err.to_string())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    pub fn save(&self, cwd: &Path) -> Result<()> {
        let path = cwd.join(SESSION_META_FILE);
        let contents = serde_json::to_string_pretty(self)
            .map_err(|err| Error::InvalidType(path.clone(), err.to_string()))?;
        std::fs::write(&path, contents).map_err(|source| Error::Io { path, source })
    }
}
