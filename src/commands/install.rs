//! The `install` command: direct per-package install, bypassing hooks.

use anyhow::Result;

use crate::cli::{GlobalOpts, InstallOpts};
use crate::package::Package as _;

/// Run the install command.
///
/// A package that is already installed is uninstalled first, so install
/// always reflects the package's current file set.
///
/// # Errors
///
/// Returns an error from the first package that fails; later packages are
/// not processed.
pub fn run(global: &GlobalOpts, opts: &InstallOpts) -> Result<()> {
    let target = super::resolve_target(global)?;

    for arg in &opts.packages {
        let pkg = super::load_package(&target, arg)?;
        if pkg.installed()? {
            pkg.uninstall()?;
        }
        pkg.install()?;
        tracing::info!("installed '{}'", pkg.name());
    }
    Ok(())
}
