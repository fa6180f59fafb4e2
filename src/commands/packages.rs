//! The `packages` command: list the source paths of installed packages.
//!
//! Reads each state directory's `source` anchor under
//! `<target>/.stowaway/` — the filesystem is the sole durable record of
//! what is installed, so listing is a pure read of the anchors.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, PackagesOpts};
use crate::fs;

/// Collect the absolute source path of every package installed under
/// `target`, sorted, optionally filtered to those under `prefix`
/// (compared component-wise).
///
/// An absent state root yields an empty list: nothing was ever installed
/// there.  Non-directory entries under the state root are skipped.
///
/// # Errors
///
/// Returns an error if the state root cannot be read or a state directory
/// is missing its `source` anchor.
pub fn installed_sources(target: &Path, prefix: Option<&Path>) -> Result<Vec<PathBuf>> {
    let state_root = target.join(super::STATE_DIR);

    // No state root means nothing was ever installed here.
    if !fs::exists(&state_root)? {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(&state_root)
        .with_context(|| format!("reading state root {}", state_root.display()))?
    {
        let entry = entry
            .with_context(|| format!("reading entry in {}", state_root.display()))?;
        if !entry
            .file_type()
            .with_context(|| format!("reading entry type: {}", entry.path().display()))?
            .is_dir()
        {
            continue;
        }

        let source = fs::read_link(&entry.path().join("source"))?;
        if prefix.is_none_or(|p| source.starts_with(p)) {
            sources.push(source);
        }
    }

    sources.sort();
    Ok(sources)
}

/// Run the packages command.
///
/// Prints one absolute source path per installed package, sorted, optionally
/// filtered to those under `--prefix`.
///
/// # Errors
///
/// Returns an error if the state root cannot be read or an anchor is
/// missing.
pub fn run(global: &GlobalOpts, opts: &PackagesOpts) -> Result<()> {
    let target = super::resolve_target(global)?;
    let prefix = opts
        .prefix
        .as_deref()
        .map(super::absolutize)
        .transpose()?;

    for source in installed_sources(&target, prefix.as_deref())? {
        println!("{}", source.display());
    }
    Ok(())
}
