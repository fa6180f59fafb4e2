//! Optional per-package manifest (`stowaway.toml`).
//!
//! A package without a manifest is a *simple package*: its entire root tree
//! is linked and it has no hooks.  A manifest narrows the linked tree to a
//! subdirectory and names the directory that hook scripts live in.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::ManifestError;
use crate::fs;

/// File name of the package manifest, relative to the package root.
pub const MANIFEST_FILE: &str = "stowaway.toml";

/// Raw manifest as it appears on disk; every key is optional.
#[derive(Debug, Deserialize)]
struct RawManifest {
    name: Option<String>,
    source: Option<String>,
    hooks: Option<String>,
}

/// Parsed package manifest with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Display name of the package.  Default: base name of the package root.
    pub name: String,
    /// Subdirectory of the package root that actually gets symlinked.
    /// Default: `"src"`.
    pub source: String,
    /// Subdirectory of the package root containing hook scripts.
    /// Default: `"hooks"`.
    pub hooks: String,
}

impl Manifest {
    /// Load the manifest for the package rooted at `package_root`.
    ///
    /// Returns `Ok(None)` when no manifest file is present (a simple
    /// package).  Absent keys take their documented defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Decode`] for a malformed file, or an I/O
    /// error if the file exists but cannot be read.
    pub fn load(package_root: &Path) -> Result<Option<Self>> {
        let path = package_root.join(MANIFEST_FILE);
        if !fs::exists(&path)? {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading manifest: {}", path.display()))?;
        let raw: RawManifest =
            toml::from_str(&content).map_err(|source| ManifestError::Decode {
                path: path.clone(),
                source,
            })?;

        Ok(Some(Self {
            name: raw.name.unwrap_or_else(|| basename(package_root)),
            source: raw.source.unwrap_or_else(|| "src".to_string()),
            hooks: raw.hooks.unwrap_or_else(|| "hooks".to_string()),
        }))
    }
}

/// Base name of `path` as a display string, falling back to the whole path
/// when it has no final component (e.g. `/`).
#[must_use]
pub fn basename(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}
