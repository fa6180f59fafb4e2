//! Symlink farm manager.
//!
//! Mirrors a package directory tree into a target directory as symlinks, so
//! that every regular file or symlink inside the package appears at the
//! corresponding relative path under the target, while real subdirectories
//! are created to hold them.  Each installation records exactly what it
//! created in a per-package state directory of anchor symlinks, which makes
//! removal exact and tolerant of later source/target relocation.
//!
//! The public API is organised into four layers:
//!
//! - **[`fs`]** — path and symlink primitives (existence, emptiness, walk)
//! - **[`manifest`]** — optional per-package `stowaway.toml` declaration
//! - **[`package`]** — the install/uninstall engine and package loader
//! - **[`stow`]** — batch orchestration with lifecycle hooks
//!
//! [`commands`] wires these layers to the CLI surface in [`cli`].
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod manifest;
pub mod package;
pub mod stow;
