// src/recent.rs

//! Persistent list of recently unified projects.
//!
//! The list lives as JSON in the per-user data directory and is capped at
//! [`MAX_RECENT_ENTRIES`]. Every I/O or serialization problem is downgraded
//! to a warning: the recent list is a convenience and must never fail a run.

use crate::constants::MAX_RECENT_ENTRIES;
use crate::core_types::{Project, RootKind};
use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// One remembered unification input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentEntry {
    /// Id of the project that produced the entry.
    pub id: String,
    /// Display name at the time it was unified.
    pub name: String,
    /// What kind of root it came from.
    pub kind: RootKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl From<&Project> for RecentEntry {
    fn from(project: &Project) -> Self {
        RecentEntry {
            id: project.id.clone(),
            name: project.name.clone(),
            kind: project.kind,
            timestamp: project.timestamp,
        }
    }
}

/// Loads and saves the capped recent-projects list.
///
/// # Examples
///
/// ```
/// use srcunify::core_types::{Project, RootKind};
/// use srcunify::recent::RecentStore;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = RecentStore::at(dir.path().join("recent.json"));
///
/// store.record(&Project::new("demo", RootKind::Folder));
/// let entries = store.load();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].name, "demo");
/// ```
#[derive(Debug)]
pub struct RecentStore {
    path: Option<PathBuf>,
}

impl RecentStore {
    /// Opens the store at its per-user default location.
    ///
    /// When no home directory can be determined the store still works, it
    /// just loads nothing and saves nowhere.
    pub fn open() -> Self {
        let path =
            ProjectDirs::from("", "", "srcunify").map(|dirs| dirs.data_dir().join("recent.json"));
        if path.is_none() {
            warn!("No home directory found; recent projects will not be remembered");
        }
        RecentStore { path }
    }

    /// Opens a store backed by an explicit file.
    #[doc(hidden)]
    pub fn at(path: PathBuf) -> Self {
        RecentStore { path: Some(path) }
    }

    /// Returns the remembered entries, newest first.
    pub fn load(&self) -> Vec<RecentEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(
                    "Could not read recent projects from '{}': {}",
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Ignoring malformed recent projects file '{}': {}",
                    path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Records `project` at the front of the list, replacing any older entry
    /// with the same id and dropping anything past the cap.
    pub fn record(&self, project: &Project) {
        let mut entries = self.load();
        entries.retain(|entry| entry.id != project.id);
        entries.insert(0, RecentEntry::from(project));
        entries.truncate(MAX_RECENT_ENTRIES);
        self.save(&entries);
    }

    /// Forgets the entry with the given id, if present.
    pub fn remove(&self, id: &str) {
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() != before {
            self.save(&entries);
        }
    }

    fn save(&self, entries: &[RecentEntry]) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("Could not create '{}': {}", parent.display(), e);
                return;
            }
        }
        match serde_json::to_vec_pretty(entries) {
            Ok(json) => {
                if let Err(e) = fs::write(path, json) {
                    warn!(
                        "Could not save recent projects to '{}': {}",
                        path.display(),
                        e
                    );
                } else {
                    debug!("Saved {} recent project(s)", entries.len());
                }
            }
            Err(e) => warn!("Could not serialize recent projects: {}", e),
        }
    }
}
