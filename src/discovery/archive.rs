// src/discovery/archive.rs

//! Expands ZIP/JAR roots into walk candidates.
//!
//! Archive subtrees are flattened: every internal file entry becomes a
//! candidate whose `relative_path` is the internal archive path, exactly as
//! if it had been dropped from a directory of the same layout. Members are
//! not decompressed until the walker decides to decode them.

use super::entry::{Candidate, LeafEntry};
use crate::core_types::{OtherSource, WalkWarning};
use crate::errors::{io_error_with_path, Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use zip::ZipArchive;

/// True for root names the walker treats as expandable archives.
pub fn is_archive_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".zip") || lower.ends_with(".jar")
}

/// One file entry inside an opened archive. Decompression happens on
/// `read()`, through the shared archive handle.
struct ArchiveMemberLeaf {
    archive_path: PathBuf,
    archive: Arc<Mutex<ZipArchive<File>>>,
    index: usize,
    member: String,
    size: u64,
}

impl LeafEntry for ArchiveMemberLeaf {
    fn name(&self) -> String {
        self.member
            .rsplit('/')
            .next()
            .unwrap_or(&self.member)
            .to_string()
    }

    fn size(&self) -> Result<u64> {
        Ok(self.size)
    }

    fn read(&self) -> Result<Vec<u8>> {
        let mut archive = match self.archive.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut entry = archive.by_index(self.index).map_err(|e| Error::Archive {
            path: self.archive_path.display().to_string(),
            source: e,
        })?;
        let mut bytes = Vec::with_capacity(self.size as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| io_error_with_path(e, format!("{}!{}", self.archive_path.display(), self.member)))?;
        Ok(bytes)
    }

    fn promotion_source(&self) -> OtherSource {
        OtherSource::Archive {
            archive: self.archive_path.clone(),
            member: self.member.clone(),
        }
    }
}

/// Opens `path` and lists every internal file entry as a candidate.
///
/// Returns the candidates plus warnings for individual members that could
/// not be listed (corrupt headers, zip-slip names). Fails only when the
/// archive itself cannot be opened.
pub(crate) fn expand_archive(path: &Path) -> Result<(Vec<Candidate>, Vec<WalkWarning>)> {
    let file = File::open(path).map_err(|e| io_error_with_path(e, path))?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::Archive {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut members = Vec::new();
    let mut warnings = Vec::new();
    for index in 0..archive.len() {
        let entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(e) => {
                warnings.push(WalkWarning::UnreadableEntry {
                    path: format!("{}!#{}", path.display(), index),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if entry.is_dir() {
            continue;
        }
        // Reject names that escape the archive root.
        if entry.enclosed_name().is_none() {
            warnings.push(WalkWarning::UnreadableEntry {
                path: format!("{}!{}", path.display(), entry.name()),
                reason: "unsafe archive path".to_string(),
            });
            continue;
        }
        members.push((index, entry.name().to_string(), entry.size()));
    }

    let shared = Arc::new(Mutex::new(archive));
    let candidates = members
        .into_iter()
        .map(|(index, member, size)| Candidate {
            relative_path: member.clone(),
            leaf: Box::new(ArchiveMemberLeaf {
                archive_path: path.to_path_buf(),
                archive: Arc::clone(&shared),
                index,
                member,
                size,
            }) as Box<dyn LeafEntry>,
        })
        .collect();
    Ok((candidates, warnings))
}

/// Re-opens `archive_path` and decodes one member, for other-file promotion.
pub(crate) fn read_member(archive_path: &Path, member: &str) -> Result<Vec<u8>> {
    let file = File::open(archive_path).map_err(|e| io_error_with_path(e, archive_path))?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::Archive {
        path: archive_path.display().to_string(),
        source: e,
    })?;
    let mut entry = archive.by_name(member).map_err(|e| Error::Archive {
        path: archive_path.display().to_string(),
        source: e,
    })?;
    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| io_error_with_path(e, format!("{}!{}", archive_path.display(), member)))?;
    Ok(bytes)
}
