//! Batch orchestration of package installs and uninstalls.
//!
//! A stow run makes three passes over the batch, each completing fully
//! before the next starts and short-circuiting on the first error:
//!
//! 1. the batch-boundary "before" hook for every package;
//! 2. per package: uninstall if present (bracketed by its hooks), then —
//!    unless deleting — a fresh install (bracketed by its hooks);
//! 3. the batch-boundary "after" hook for every package.
//!
//! A previously-installed package that is not being deleted is therefore
//! always reinstalled fresh, picking up any change to its file set since
//! the last install.

use anyhow::Result;

use crate::package::Package;

/// Hook run for every package before a batch install begins.
pub const BEFORE_INSTALL_ALL: &str = "before_install_all";
/// Hook run for every package after a batch install completes.
pub const AFTER_INSTALL_ALL: &str = "after_install_all";
/// Hook run for every package before a batch uninstall begins.
pub const BEFORE_UNINSTALL_ALL: &str = "before_uninstall_all";
/// Hook run for every package after a batch uninstall completes.
pub const AFTER_UNINSTALL_ALL: &str = "after_uninstall_all";
/// Hook run immediately before one package's install.
pub const BEFORE_INSTALL: &str = "before_install";
/// Hook run immediately after one package's install.
pub const AFTER_INSTALL: &str = "after_install";
/// Hook run immediately before one package's uninstall.
pub const BEFORE_UNINSTALL: &str = "before_uninstall";
/// Hook run immediately after one package's uninstall.
pub const AFTER_UNINSTALL: &str = "after_uninstall";

/// Options controlling a stow run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StowOptions {
    /// Uninstall the packages instead of (re)installing them.
    pub delete: bool,
}

/// Run a coordinated install or uninstall across `packages` in argument
/// order.
///
/// # Errors
///
/// Returns the first error from any hook, install, or uninstall; later
/// packages in the failing pass are not processed.
pub fn stow(options: StowOptions, packages: &[Box<dyn Package>]) -> Result<()> {
    let before_all = if options.delete {
        BEFORE_UNINSTALL_ALL
    } else {
        BEFORE_INSTALL_ALL
    };
    for pkg in packages {
        pkg.run_hook_if_exists(before_all)?;
    }

    for pkg in packages {
        if pkg.installed()? {
            pkg.run_hook_if_exists(BEFORE_UNINSTALL)?;
            pkg.uninstall()?;
            pkg.run_hook_if_exists(AFTER_UNINSTALL)?;
            tracing::info!("uninstalled '{}'", pkg.name());
        }

        if !options.delete {
            pkg.run_hook_if_exists(BEFORE_INSTALL)?;
            pkg.install()?;
            pkg.run_hook_if_exists(AFTER_INSTALL)?;
            tracing::info!("installed '{}'", pkg.name());
        }
    }

    let after_all = if options.delete {
        AFTER_UNINSTALL_ALL
    } else {
        AFTER_INSTALL_ALL
    };
    for pkg in packages {
        pkg.run_hook_if_exists(after_all)?;
    }

    Ok(())
}
