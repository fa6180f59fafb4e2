//! The `uninstall` command: direct per-package uninstall, bypassing hooks.

use anyhow::Result;

use crate::cli::{GlobalOpts, UninstallOpts};
use crate::package::Package as _;

/// Run the uninstall command.
///
/// Packages that are not installed are skipped.
///
/// # Errors
///
/// Returns an error from the first package that fails; later packages are
/// not processed.
pub fn run(global: &GlobalOpts, opts: &UninstallOpts) -> Result<()> {
    let target = super::resolve_target(global)?;

    for arg in &opts.packages {
        let pkg = super::load_package(&target, arg)?;
        if pkg.installed()? {
            pkg.uninstall()?;
            tracing::info!("uninstalled '{}'", pkg.name());
        } else {
            tracing::debug!("not installed: '{}'", pkg.name());
        }
    }
    Ok(())
}
