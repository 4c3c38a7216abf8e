// src/discovery/disk.rs

//! Native filesystem implementations of the entry traits.
//!
//! Directory listing goes through `ignore::WalkBuilder` when gitignore rules
//! are respected (hidden files still listed, `.git` itself skipped) and
//! through `walkdir::WalkDir` when they are not. Either way one directory
//! level is read per `children()` call; recursion stays in the walker.

use super::entry::{ContainerEntry, FsEntry, LeafEntry};
use crate::core_types::OtherSource;
use crate::errors::{io_error_with_path, Result};
use ignore::WalkBuilder;
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A file on disk.
pub struct DiskLeaf {
    path: PathBuf,
}

impl DiskLeaf {
    /// Wraps a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DiskLeaf { path: path.into() }
    }
}

impl LeafEntry for DiskLeaf {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn size(&self) -> Result<u64> {
        fs::metadata(&self.path)
            .map(|md| md.len())
            .map_err(|e| io_error_with_path(e, &self.path))
    }

    fn read(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|e| io_error_with_path(e, &self.path))
    }

    fn promotion_source(&self) -> OtherSource {
        OtherSource::Disk(self.path.clone())
    }
}

/// A directory on disk.
pub struct DiskDir {
    path: PathBuf,
    use_ignore_rules: bool,
}

impl DiskDir {
    /// Wraps a directory path. `use_ignore_rules` controls whether
    /// `.gitignore` files prune the listing.
    pub fn new(path: impl Into<PathBuf>, use_ignore_rules: bool) -> Self {
        DiskDir {
            path: path.into(),
            use_ignore_rules,
        }
    }

    fn list_with_ignore_rules(&self) -> Vec<FsEntry> {
        let mut children = Vec::new();
        let mut builder = WalkBuilder::new(&self.path);
        // Hidden files stay visible (.gitignore itself is classifiable);
        // only ignore-rule pruning is wanted here.
        builder
            .standard_filters(false)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .max_depth(Some(1))
            .sort_by_file_name(|a, b| a.cmp(b));
        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walker error under '{}': {}", self.path.display(), e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue; // the directory itself
            }
            if entry.file_name().to_string_lossy() == ".git" {
                continue;
            }
            match entry.file_type() {
                Some(ft) if ft.is_dir() => children.push(FsEntry::Container(Box::new(
                    DiskDir::new(entry.path(), true),
                ))),
                Some(ft) if ft.is_file() => {
                    children.push(FsEntry::Leaf(Box::new(DiskLeaf::new(entry.path()))))
                }
                _ => {} // symlinks and special files are skipped
            }
        }
        children
    }

    fn list_raw(&self) -> Vec<FsEntry> {
        let mut children = Vec::new();
        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walker error under '{}': {}", self.path.display(), e);
                    continue;
                }
            };
            let ft = entry.file_type();
            if ft.is_dir() {
                children.push(FsEntry::Container(Box::new(DiskDir::new(
                    entry.path(),
                    false,
                ))));
            } else if ft.is_file() {
                children.push(FsEntry::Leaf(Box::new(DiskLeaf::new(entry.path()))));
            }
        }
        children
    }
}

impl ContainerEntry for DiskDir {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn children(self: Box<Self>) -> Result<Vec<FsEntry>> {
        // Surface a completely unreadable directory as one warning upstream.
        fs::read_dir(&self.path).map_err(|e| io_error_with_path(e, &self.path))?;
        Ok(if self.use_ignore_rules {
            self.list_with_ignore_rules()
        } else {
            self.list_raw()
        })
    }
}

/// Adapts a path into the matching entry kind.
pub fn entry_from_path(path: &Path, use_ignore_rules: bool) -> Result<FsEntry> {
    let metadata = fs::metadata(path).map_err(|e| io_error_with_path(e, path))?;
    if metadata.is_dir() {
        Ok(FsEntry::Container(Box::new(DiskDir::new(
            path,
            use_ignore_rules,
        ))))
    } else {
        Ok(FsEntry::Leaf(Box::new(DiskLeaf::new(path))))
    }
}
