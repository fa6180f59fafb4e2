//! Path and symlink primitives used by the install/uninstall engine.
//!
//! Everything here is a thin, path-contextualised wrapper over `std::fs`
//! with two deliberate semantics choices:
//!
//! - existence checks use lstat semantics, so a dangling symlink *exists*;
//! - [`walk`] is a deterministic lazy traversal (lexicographic by file name,
//!   depth-first, parents before children) because link numbering during
//!   install depends on a reproducible order.

use anyhow::{Context as _, Result};
use std::io;
use std::path::{Path, PathBuf};

/// Kind of a directory entry, classified without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Real directory (descended into during a walk).
    Dir,
    /// Symlink, dangling or not.  Never followed.
    Symlink,
    /// Anything else (FIFO, socket, device).  Walked over, never linked.
    Other,
}

/// One entry yielded by [`walk`].
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Path relative to the walk root.
    pub path: PathBuf,
    /// Entry classification.
    pub kind: EntryKind,
}

impl WalkEntry {
    /// True for entries that installation mirrors as symlinks.
    #[must_use]
    pub const fn is_linkable(&self) -> bool {
        matches!(self.kind, EntryKind::File | EntryKind::Symlink)
    }
}

/// Lazy recursive directory traversal created by [`walk`].
///
/// Yields entries in lexicographic depth-first order, parents before
/// children, with the root itself skipped.  The walk root may be a symlink
/// to a directory; it is followed, so yielded relative paths are meaningful
/// within the root's own namespace.
#[derive(Debug)]
pub struct Walk {
    root: PathBuf,
    pending: Vec<WalkEntry>,
    started: bool,
}

impl Walk {
    /// Read the children of `root/rel` onto the pending stack so that the
    /// lexicographically first child is popped next.
    fn push_children(&mut self, rel: &Path) -> Result<()> {
        let dir = self.root.join(rel);
        let mut children = Vec::new();
        for entry in std::fs::read_dir(&dir)
            .with_context(|| format!("reading directory {}", dir.display()))?
        {
            let entry =
                entry.with_context(|| format!("reading entry in {}", dir.display()))?;
            let meta = std::fs::symlink_metadata(entry.path())
                .with_context(|| format!("reading metadata: {}", entry.path().display()))?;
            let file_type = meta.file_type();
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            children.push(WalkEntry {
                path: rel.join(entry.file_name()),
                kind,
            });
        }
        children.sort_by(|a, b| a.path.cmp(&b.path));
        // LIFO: pushed in reverse so siblings pop in ascending order.
        while let Some(child) = children.pop() {
            self.pending.push(child);
        }
        Ok(())
    }
}

impl Iterator for Walk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            if let Err(e) = self.push_children(Path::new("")) {
                return Some(Err(e));
            }
        }
        let entry = self.pending.pop()?;
        if entry.kind == EntryKind::Dir
            && let Err(e) = self.push_children(&entry.path)
        {
            return Some(Err(e));
        }
        Some(Ok(entry))
    }
}

/// Walk the tree rooted at `root` lazily and deterministically.
#[must_use]
pub fn walk(root: &Path) -> Walk {
    Walk {
        root: root.to_path_buf(),
        pending: Vec::new(),
        started: false,
    }
}

/// Whether `path` exists, with lstat semantics: a dangling symlink exists.
///
/// # Errors
///
/// Propagates any error other than not-found.
pub fn exists(path: &Path) -> Result<bool> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("checking existence: {}", path.display()))
        }
    }
}

/// Whether the directory at `path` has zero entries.
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or read.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(path)
        .with_context(|| format!("reading directory {}", path.display()))?;
    Ok(entries.next().is_none())
}

/// Create the directory at `path`, including any missing ancestors.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("creating directory {}", path.display()))
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Create a symlink at `link` whose stored value is `original`.
///
/// # Errors
///
/// Returns an error if the link cannot be created (e.g. `link` already
/// exists).
pub fn symlink(original: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    std::os::unix::fs::symlink(original, link).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            original.display()
        )
    })?;

    #[cfg(windows)]
    {
        let result = if original.is_dir() {
            std::os::windows::fs::symlink_dir(original, link)
        } else {
            std::os::windows::fs::symlink_file(original, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                original.display()
            )
        })?;
    }

    Ok(())
}

/// Read the stored value of the symlink at `path`, literally, never resolved.
///
/// # Errors
///
/// Returns an error if `path` is not a symlink or cannot be read.
pub fn read_link(path: &Path) -> Result<PathBuf> {
    std::fs::read_link(path).with_context(|| format!("reading symlink {}", path.display()))
}

/// Remove the file or symlink at `path`, tolerating a path that is already
/// gone.  Returns whether anything was removed.
///
/// # Errors
///
/// Propagates any removal error other than not-found.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("removing file: {}", path.display())),
    }
}

/// Remove the file or symlink at `path`.
///
/// # Errors
///
/// Returns an error if the path cannot be removed.
pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).with_context(|| format!("removing file: {}", path.display()))
}

/// Remove the empty directory at `path`.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed.
pub fn remove_dir(path: &Path) -> Result<()> {
    std::fs::remove_dir(path)
        .with_context(|| format!("removing directory: {}", path.display()))
}

/// Remove the entry at `path`, whatever it is: rmdir for a real directory,
/// unlink for anything else (symlinks to directories included).
///
/// # Errors
///
/// Returns an error if the entry cannot be removed.
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = std::fs::symlink_metadata(path)
        .with_context(|| format!("reading metadata: {}", path.display()))?;
    if meta.is_dir() {
        remove_dir(path)
    } else {
        remove_file(path)
    }
}

/// Recursively remove the tree at `path`.
///
/// # Errors
///
/// Returns an error if any part of the tree cannot be removed.
pub fn remove_tree(path: &Path) -> Result<()> {
    std::fs::remove_dir_all(path)
        .with_context(|| format!("removing tree: {}", path.display()))
}
