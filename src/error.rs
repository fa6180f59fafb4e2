//! Domain-specific error types for the symlink farm engine.
//!
//! This module provides a structured error taxonomy using [`thiserror`].
//! Internal modules return typed errors wrapped in [`anyhow::Error`] so that
//! callers who need to distinguish a domain condition (for example
//! [`PackageError::AlreadyInstalled`]) can downcast, while command handlers
//! at the CLI boundary simply propagate with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that arise from the package install/uninstall engine.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Install was called while the package's state directory exists.
    ///
    /// Install never silently overwrites; the documented recovery path is an
    /// uninstall followed by a fresh install.
    #[error("package '{name}' is already installed")]
    AlreadyInstalled {
        /// Display name of the package.
        name: String,
    },

    /// Uninstall was called while the package's state directory is absent.
    #[error("package '{name}' is not installed")]
    NotInstalled {
        /// Display name of the package.
        name: String,
    },
}

/// Errors that arise from loading a package manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file exists but is not valid TOML.
    #[error("invalid manifest {path}: {source}")]
    Decode {
        /// Path of the malformed manifest file.
        path: PathBuf,
        /// Underlying TOML decode error.
        source: toml::de::Error,
    },
}

/// Errors that arise from running a lifecycle hook script.
#[derive(Error, Debug)]
pub enum HookError {
    /// The hook executable could not be spawned.
    #[error("hook '{name}' could not be started: {source}")]
    Spawn {
        /// Name of the hook (e.g. `before_install`).
        name: String,
        /// Underlying spawn error.
        source: std::io::Error,
    },

    /// The hook ran but exited with a non-zero status.
    #[error("hook '{name}' failed (exit {code}): {stderr}")]
    Failed {
        /// Name of the hook (e.g. `before_install`).
        name: String,
        /// Exit code, or -1 if the process was terminated by a signal.
        code: i32,
        /// Captured standard error output, trimmed.
        stderr: String,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // PackageError
    // -----------------------------------------------------------------------

    #[test]
    fn package_error_already_installed_display() {
        let e = PackageError::AlreadyInstalled {
            name: "vim".to_string(),
        };
        assert_eq!(e.to_string(), "package 'vim' is already installed");
    }

    #[test]
    fn package_error_not_installed_display() {
        let e = PackageError::NotInstalled {
            name: "vim".to_string(),
        };
        assert_eq!(e.to_string(), "package 'vim' is not installed");
    }

    #[test]
    fn package_error_survives_anyhow_downcast() {
        let e: anyhow::Error = PackageError::AlreadyInstalled {
            name: "vim".to_string(),
        }
        .into();
        assert!(matches!(
            e.downcast_ref::<PackageError>(),
            Some(PackageError::AlreadyInstalled { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // ManifestError
    // -----------------------------------------------------------------------

    #[test]
    fn manifest_error_decode_display() {
        let source = toml::from_str::<toml::Value>("not [valid").unwrap_err();
        let e = ManifestError::Decode {
            path: PathBuf::from("/pkg/stowaway.toml"),
            source,
        };
        assert!(e.to_string().contains("/pkg/stowaway.toml"));
        assert!(e.to_string().starts_with("invalid manifest"));
    }

    // -----------------------------------------------------------------------
    // HookError
    // -----------------------------------------------------------------------

    #[test]
    fn hook_error_spawn_display() {
        let e = HookError::Spawn {
            name: "before_install".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(e.to_string().contains("before_install"));
        assert!(e.to_string().contains("could not be started"));
    }

    #[test]
    fn hook_error_failed_display() {
        let e = HookError::Failed {
            name: "after_install".to_string(),
            code: 2,
            stderr: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "hook 'after_install' failed (exit 2): boom");
    }

    // -----------------------------------------------------------------------
    // Send + Sync bounds
    // -----------------------------------------------------------------------

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<PackageError>();
        assert_send_sync::<ManifestError>();
        assert_send_sync::<HookError>();
    }
}
