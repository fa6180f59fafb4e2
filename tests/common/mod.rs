// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed symlink farm (one package directory,
// one target directory, one state path) so each integration test can set up
// an isolated environment without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use stowaway::package::{Loader, LocalPackage};

/// An isolated symlink farm backed by a [`tempfile::TempDir`].
///
/// Layout: `pkg/` (the package source tree), `home/` (the installation
/// target), and `state/` (the bookkeeping directory, created by install).
/// Everything is deleted when the value is dropped.
pub struct Farm {
    /// Temporary directory containing the whole farm.
    pub tmp: tempfile::TempDir,
}

impl Farm {
    /// Create a farm with an empty package tree and an empty target.
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(tmp.path().join("pkg")).expect("create package dir");
        std::fs::create_dir(tmp.path().join("home")).expect("create target dir");
        Self { tmp }
    }

    /// Path of the package root.
    pub fn package_dir(&self) -> PathBuf {
        self.tmp.path().join("pkg")
    }

    /// Path of the installation target.
    pub fn target_dir(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Path of the state directory.
    pub fn state_dir(&self) -> PathBuf {
        self.tmp.path().join("state")
    }

    /// Write a file at `rel` inside the package tree, creating parents.
    pub fn write_package_file(&self, rel: &str, content: &str) {
        let path = self.package_dir().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create package subdir");
        }
        std::fs::write(path, content).expect("write package file");
    }

    /// Write a file at `rel` inside the target, creating parents.
    pub fn write_target_file(&self, rel: &str, content: &str) {
        let path = self.target_dir().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create target subdir");
        }
        std::fs::write(path, content).expect("write target file");
    }

    /// Write a `stowaway.toml` manifest at the package root.
    pub fn write_manifest(&self, content: &str) {
        std::fs::write(self.package_dir().join("stowaway.toml"), content)
            .expect("write manifest");
    }

    /// Write an executable hook script under `pkg/hooks/<name>`.
    #[cfg(unix)]
    pub fn write_hook(&self, name: &str, body: &str) {
        use std::os::unix::fs::PermissionsExt;

        let hooks = self.package_dir().join("hooks");
        std::fs::create_dir_all(&hooks).expect("create hooks dir");
        let path = hooks.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write hook");
        let mut perms = std::fs::metadata(&path).expect("hook metadata").permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("chmod hook");
    }

    /// A loader for this farm's package, addressed by its canonical paths.
    pub fn loader(&self) -> Loader {
        Loader {
            state: self.state_dir(),
            source: self.package_dir(),
            target: self.target_dir(),
        }
    }

    /// Load the farm's package.
    pub fn load(&self) -> LocalPackage {
        self.loader().load().expect("load package")
    }

    /// Recursive sorted listing of the target's contents as relative path
    /// strings, for before/after comparisons.
    pub fn target_entries(&self) -> Vec<String> {
        let mut entries = Vec::new();
        collect_entries(&self.target_dir(), Path::new(""), &mut entries);
        entries.sort();
        entries
    }
}

fn collect_entries(root: &Path, rel: &Path, out: &mut Vec<String>) {
    let dir = root.join(rel);
    for entry in std::fs::read_dir(&dir).expect("read dir") {
        let entry = entry.expect("read entry");
        let entry_rel = rel.join(entry.file_name());
        out.push(entry_rel.to_string_lossy().replace('\\', "/"));
        let meta = std::fs::symlink_metadata(entry.path()).expect("entry metadata");
        if meta.is_dir() {
            collect_entries(root, &entry_rel, out);
        }
    }
}
