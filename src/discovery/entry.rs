//! The adapter seam between the walker and its entry sources.
//!
//! Dropped roots arrive as [`FsEntry`] values: a leaf with readable bytes or
//! a container with lazily enumerable children. The walker core never
//! touches `std::fs` directly; disk, archive, and in-memory sources all
//! implement the same two traits, so the walk logic is testable without a
//! filesystem.

use crate::core_types::{OtherSource, WalkWarning};
use crate::errors::Result;
use crossbeam_channel::Sender;
use std::collections::VecDeque;

/// An entry with readable byte content, a name, and a size.
pub trait LeafEntry: Send {
    /// The leaf file name.
    fn name(&self) -> String;
    /// Size in bytes, from metadata (no content read).
    fn size(&self) -> Result<u64>;
    /// Reads the full byte content.
    fn read(&self) -> Result<Vec<u8>>;
    /// How to reach these bytes again if the file is promoted later.
    fn promotion_source(&self) -> OtherSource;
}

/// An entry with children, discovered one batch per call.
///
/// `children` consumes the container: the traversal is finite and not
/// restartable.
pub trait ContainerEntry: Send {
    /// The directory name.
    fn name(&self) -> String;
    /// Enumerates all direct children.
    fn children(self: Box<Self>) -> Result<Vec<FsEntry>>;
}

/// A dropped filesystem entry, opaque beyond its leaf/container capability.
pub enum FsEntry {
    /// A readable file.
    Leaf(Box<dyn LeafEntry>),
    /// A directory.
    Container(Box<dyn ContainerEntry>),
}

impl FsEntry {
    /// The entry's name, independent of its kind.
    pub fn name(&self) -> String {
        match self {
            FsEntry::Leaf(leaf) => leaf.name(),
            FsEntry::Container(dir) => dir.name(),
        }
    }
}

/// A leaf awaiting classification, tagged with its root-relative path.
pub(crate) struct Candidate {
    pub leaf: Box<dyn LeafEntry>,
    pub relative_path: String,
}

impl std::fmt::Debug for Candidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("relative_path", &self.relative_path)
            .finish_non_exhaustive()
    }
}

/// Lazily yields every leaf under a container root, depth-first.
///
/// One `children()` batch is read per directory; all children of a directory
/// are queued before that directory is done. Unreadable directories are
/// reported as warnings and skipped, never aborting the traversal. The
/// sequence is finite and not restartable.
pub(crate) struct CandidateIter {
    // (container, its path relative to the root; empty for the root itself)
    stack: Vec<(Box<dyn ContainerEntry>, String)>,
    pending: VecDeque<Candidate>,
    warn_tx: Sender<WalkWarning>,
}

impl CandidateIter {
    pub(crate) fn new(root: Box<dyn ContainerEntry>, warn_tx: Sender<WalkWarning>) -> Self {
        CandidateIter {
            stack: vec![(root, String::new())],
            pending: VecDeque::new(),
            warn_tx,
        }
    }
}

impl Iterator for CandidateIter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                return Some(candidate);
            }
            let (container, prefix) = self.stack.pop()?;
            let display_path = if prefix.is_empty() {
                container.name()
            } else {
                prefix.clone()
            };
            match container.children() {
                Ok(children) => {
                    for child in children {
                        match child {
                            FsEntry::Leaf(leaf) => {
                                let relative_path = join_relative(&prefix, &leaf.name());
                                self.pending.push_back(Candidate {
                                    leaf,
                                    relative_path,
                                });
                            }
                            FsEntry::Container(dir) => {
                                let child_prefix = join_relative(&prefix, &dir.name());
                                self.stack.push((dir, child_prefix));
                            }
                        }
                    }
                }
                Err(e) => {
                    let warning = WalkWarning::UnreadableEntry {
                        path: display_path,
                        reason: e.to_string(),
                    };
                    log::warn!("{}", warning);
                    let _ = self.warn_tx.send(warning);
                }
            }
        }
    }
}

fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// A leaf whose bytes live in memory. Adapts flat file handles (and test
/// fixtures) to the walker's entry shape.
pub struct MemoryLeaf {
    name: String,
    bytes: Vec<u8>,
}

impl MemoryLeaf {
    /// Wraps a named byte buffer.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        MemoryLeaf {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl LeafEntry for MemoryLeaf {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn size(&self) -> Result<u64> {
        Ok(self.bytes.len() as u64)
    }

    fn read(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn promotion_source(&self) -> OtherSource {
        OtherSource::Buffer(self.bytes.clone())
    }
}

/// An in-memory directory with a fixed child list.
pub struct MemoryDir {
    name: String,
    children: Vec<FsEntry>,
}

impl MemoryDir {
    /// Builds a directory from pre-assembled children.
    pub fn new(name: impl Into<String>, children: Vec<FsEntry>) -> Self {
        MemoryDir {
            name: name.into(),
            children,
        }
    }
}

impl ContainerEntry for MemoryDir {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn children(self: Box<Self>) -> Result<Vec<FsEntry>> {
        Ok(self.children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{io_error_with_path, Result};
    use crossbeam_channel::unbounded;

    struct UnreadableDir;

    impl ContainerEntry for UnreadableDir {
        fn name(&self) -> String {
            "locked".to_string()
        }

        fn children(self: Box<Self>) -> Result<Vec<FsEntry>> {
            Err(io_error_with_path(
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                "locked",
            ))
        }
    }

    fn leaf(name: &str) -> FsEntry {
        FsEntry::Leaf(Box::new(MemoryLeaf::new(name, b"x".to_vec())))
    }

    #[test]
    fn test_iterator_yields_relative_paths() {
        let root = MemoryDir::new(
            "demo",
            vec![
                leaf("a.java"),
                FsEntry::Container(Box::new(MemoryDir::new(
                    "src",
                    vec![
                        leaf("b.java"),
                        FsEntry::Container(Box::new(MemoryDir::new("util", vec![leaf("c.java")]))),
                    ],
                ))),
            ],
        );
        let (tx, rx) = unbounded();
        let mut paths: Vec<String> = CandidateIter::new(Box::new(root), tx)
            .map(|c| c.relative_path)
            .collect();
        paths.sort();
        assert_eq!(paths, vec!["a.java", "src/b.java", "src/util/c.java"]);
        assert!(rx.try_iter().next().is_none());
    }

    #[test]
    fn test_all_children_of_a_directory_are_exhausted() {
        let root = MemoryDir::new(
            "demo",
            vec![leaf("one.txt"), leaf("two.txt"), leaf("three.txt")],
        );
        let (tx, _rx) = unbounded();
        let count = CandidateIter::new(Box::new(root), tx).count();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_unreadable_directory_warns_and_continues() {
        let root = MemoryDir::new(
            "demo",
            vec![
                FsEntry::Container(Box::new(UnreadableDir)),
                leaf("survivor.java"),
            ],
        );
        let (tx, rx) = unbounded();
        let paths: Vec<String> = CandidateIter::new(Box::new(root), tx)
            .map(|c| c.relative_path)
            .collect();
        assert_eq!(paths, vec!["survivor.java"]);

        let warnings: Vec<_> = rx.try_iter().collect();
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            WalkWarning::UnreadableEntry { path, .. } => assert_eq!(path, "locked"),
            other => panic!("unexpected warning: {:?}", other),
        }
    }
}
