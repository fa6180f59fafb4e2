//! The package install/uninstall engine.
//!
//! A package is one source tree to be symlinked into a target directory.
//! Every installation owns a *state directory* holding all bookkeeping:
//!
//! ```text
//! <state>/source    anchor symlink -> the source tree
//! <state>/target    anchor symlink -> the target directory
//! <state>/links/<n> one numbered anchor per installed link, n = 0,1,2,…
//! ```
//!
//! The state directory existing is the single source of truth for "this
//! package is installed" — the target is never scanned.  All addressing of
//! installed files goes *through* the anchors rather than through the paths
//! supplied at call time, so uninstall removes exactly what install created
//! even if the caller later refers to the source or target by a different
//! (but equivalent) path string.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::error::PackageError;
use crate::exec;
use crate::fs;
use crate::manifest::{self, Manifest};

/// Environment variable carrying the package's source path to hooks.
pub const ENV_SOURCE: &str = "STOWAWAY_SOURCE";
/// Environment variable carrying the package's target path to hooks.
pub const ENV_TARGET: &str = "STOWAWAY_TARGET";
/// Environment variable carrying the package root path to hooks.
pub const ENV_PACKAGE_ROOT: &str = "STOWAWAY_PACKAGE_ROOT";

/// Capability set of an installable package.
///
/// Batch orchestration ([`crate::stow`]) and its tests depend only on this
/// trait, so a mock implementation can stand in for real storage.
pub trait Package {
    /// Display name of the package.
    fn name(&self) -> String;

    /// Whether the package is currently installed (its state directory
    /// exists).
    ///
    /// # Errors
    ///
    /// Propagates any error other than not-found from the existence check.
    fn installed(&self) -> Result<bool>;

    /// Install the package: create the state directory, the anchors, and one
    /// symlink in the target tree per regular file or symlink in the source
    /// tree.
    ///
    /// Not idempotent: fails with [`PackageError::AlreadyInstalled`] when the
    /// state directory exists.  A mid-install failure leaves the state
    /// present; the documented recovery path is an uninstall.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::AlreadyInstalled`] or any filesystem error,
    /// which aborts the walk without rollback.
    fn install(&self) -> Result<()>;

    /// Uninstall the package: remove every recorded link, prune newly-empty
    /// ancestor directories, then remove the whole state tree.
    ///
    /// An installed link that is already gone is treated as cleaned up; all
    /// other errors abort.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::NotInstalled`] when the state directory is
    /// absent, or any filesystem error other than the documented tolerance.
    fn uninstall(&self) -> Result<()>;

    /// Run the named hook script if the package has one, as a no-op success
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the hook cannot be spawned or exits non-zero.
    fn run_hook_if_exists(&self, name: &str) -> Result<()>;
}

/// Resolves a package's on-disk layout into a [`LocalPackage`].
#[derive(Debug, Clone)]
pub struct Loader {
    /// Directory that will hold all bookkeeping for this (target, source)
    /// pair.  Must be unique per pair.
    pub state: PathBuf,
    /// Absolute path to the package root on disk.
    pub source: PathBuf,
    /// Absolute path the mirrored tree is built under.
    pub target: PathBuf,
}

impl Loader {
    /// Load the package at `source`, reading its manifest if one exists.
    ///
    /// Never touches the state or target paths; this is a pure read of the
    /// source tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest exists but cannot be decoded.
    pub fn load(&self) -> Result<LocalPackage> {
        let manifest = Manifest::load(&self.source)?;
        let source = manifest
            .as_ref()
            .map_or_else(|| self.source.clone(), |m| self.source.join(&m.source));

        Ok(LocalPackage {
            source_link: self.state.join("source"),
            target_link: self.state.join("target"),
            links: self.state.join("links"),
            state: self.state.clone(),
            package_root: self.source.clone(),
            target: self.target.clone(),
            source,
            manifest,
        })
    }
}

/// A package backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalPackage {
    // Path where all the package state is stored.
    state: PathBuf,
    // Tree whose contents get symlinked (package root, or the manifest's
    // source subdirectory).
    source: PathBuf,
    // Directory containing every package file.  Same as `source` for a
    // simple package; hooks are located relative to this even when the
    // manifest narrows `source`.
    package_root: PathBuf,
    // Directory all symlinks are created relative to.
    target: PathBuf,
    // Anchor symlink in the state directory pointing to `source`.
    source_link: PathBuf,
    // Anchor symlink in the state directory pointing to `target`.
    target_link: PathBuf,
    // Directory of numbered anchors, one per installed link.
    links: PathBuf,
    // Parsed manifest; `None` means a simple package with no hooks.
    manifest: Option<Manifest>,
}

impl Package for LocalPackage {
    fn name(&self) -> String {
        self.manifest
            .as_ref()
            .map_or_else(|| manifest::basename(&self.source), |m| m.name.clone())
    }

    fn installed(&self) -> Result<bool> {
        fs::exists(&self.state)
    }

    fn install(&self) -> Result<()> {
        if fs::exists(&self.state)? {
            return Err(PackageError::AlreadyInstalled { name: self.name() }.into());
        }

        tracing::debug!(
            "installing '{}' into {}",
            self.name(),
            self.target.display()
        );

        fs::ensure_dir(&self.links)?;
        fs::symlink(&self.source, &self.source_link)?;
        fs::symlink(&self.target, &self.target_link)?;

        // Walk through the source anchor, not the source itself, so every
        // recorded path stays valid for as long as the state directory does.
        let mut count = 0usize;
        for entry in fs::walk(&self.source_link) {
            let entry = entry?;
            if !entry.is_linkable() {
                continue;
            }

            let installed = self.target_link.join(&entry.path);

            // The numbered anchor records where this link went before the
            // link itself exists, so a crashed install is still fully
            // recoverable by a later uninstall.
            fs::symlink(&installed, &self.links.join(count.to_string()))?;
            count += 1;

            fs::ensure_parent_dir(&installed)?;
            fs::symlink(&self.source_link.join(&entry.path), &installed)?;
        }

        tracing::debug!("installed {count} links for '{}'", self.name());
        Ok(())
    }

    fn uninstall(&self) -> Result<()> {
        if !fs::exists(&self.state)? {
            return Err(PackageError::NotInstalled { name: self.name() }.into());
        }

        tracing::debug!("uninstalling '{}'", self.name());

        let mut entries: Vec<PathBuf> = std::fs::read_dir(&self.links)
            .with_context(|| format!("reading links directory {}", self.links.display()))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("reading links directory {}", self.links.display()))?;
        entries.sort();

        for link in entries {
            // The anchor's stored value is the install path recorded at
            // install time; read it literally, never resolved.
            let installed = fs::read_link(&link)?;

            // A user may have removed the installed link by hand before
            // uninstalling; that counts as already-cleaned.
            if !fs::remove_file_if_exists(&installed)? {
                tracing::debug!("already removed: {}", installed.display());
            }

            fs::remove_file(&link)?;

            // Prune newly-empty ancestor directories, nearest first.  An
            // emptiness check that fails stops the climb without failing the
            // uninstall; a non-empty directory ends it.  The climb goes
            // through the recorded path, so the nearest ancestors may be the
            // target anchor itself — remove_path handles the symlink case.
            for ancestor in installed.ancestors().skip(1) {
                match fs::is_empty_dir(ancestor) {
                    Ok(true) => fs::remove_path(ancestor)?,
                    Ok(false) | Err(_) => break,
                }
            }
        }

        fs::remove_tree(&self.state)
    }

    fn run_hook_if_exists(&self, name: &str) -> Result<()> {
        // Simple packages cannot have hooks.
        let Some(manifest) = &self.manifest else {
            return Ok(());
        };

        let executable = self.package_root.join(&manifest.hooks).join(name);
        if !fs::exists(&executable)? {
            return Ok(());
        }

        exec::run_hook(
            &executable,
            name,
            &self.state,
            &[
                (ENV_SOURCE, self.source.as_path()),
                (ENV_TARGET, self.target.as_path()),
                (ENV_PACKAGE_ROOT, self.package_root.as_path()),
            ],
        )?;
        Ok(())
    }
}

impl LocalPackage {
    /// Path of the state directory for this installation.
    #[must_use]
    pub fn state(&self) -> &Path {
        &self.state
    }
}
