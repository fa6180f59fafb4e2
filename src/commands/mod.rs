//! Top-level subcommand orchestration.
//!
//! Every command resolves absolute source/target paths, derives a state
//! directory unique per source, and drives the [`crate::package`] engine
//! through the [`crate::package::Package`] contract.

pub mod install;
pub mod packages;
pub mod stow;
pub mod uninstall;

use anyhow::{Context as _, Result};
use sha2::{Digest, Sha256};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::package::{Loader, LocalPackage};

/// Name of the directory under the target that holds all package state.
pub const STATE_DIR: &str = ".stowaway";

/// Resolve the installation target directory: `--target` absolutised, or the
/// current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_target(global: &GlobalOpts) -> Result<PathBuf> {
    match &global.target {
        Some(target) => absolutize(target),
        None => std::env::current_dir().context("resolving current directory"),
    }
}

/// Make `path` absolute against the current directory, without touching the
/// filesystem or resolving symlinks.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .with_context(|| format!("resolving absolute path: {}", path.display()))
}

/// State directory for installing `source` into `target`.
///
/// Lives under `<target>/.stowaway/` with a short path-derived hash as its
/// name, so each (target, source) pair gets its own bookkeeping.
#[must_use]
pub fn state_dir(target: &Path, source: &Path) -> PathBuf {
    target.join(STATE_DIR).join(short_hash(source))
}

/// Short lowercase-hex SHA-256 digest of a path, stable across runs.
fn short_hash(path: &Path) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_os_str().as_encoded_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{byte:02x}").unwrap_or(());
    }
    hex
}

/// Load the package at `source_arg` for installation under `target`.
///
/// # Errors
///
/// Returns an error if the path cannot be absolutised or the package's
/// manifest cannot be decoded.
pub fn load_package(target: &Path, source_arg: &Path) -> Result<LocalPackage> {
    let source = absolutize(source_arg)?;
    Loader {
        state: state_dir(target, &source),
        source,
        target: target.to_path_buf(),
    }
    .load()
}
