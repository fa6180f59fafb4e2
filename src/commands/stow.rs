//! The `stow` command: batch install/uninstall with lifecycle hooks.

use anyhow::{Context as _, Result, bail};

use crate::cli::{GlobalOpts, StowOpts};
use crate::package::Package;
use crate::stow::{self, StowOptions};

/// Run the stow command.
///
/// # Errors
///
/// Returns an error if any package fails to load, the interactive selection
/// is cancelled or empty, or the batch aborts.
pub fn run(global: &GlobalOpts, opts: &StowOpts) -> Result<()> {
    let target = super::resolve_target(global)?;
    tracing::debug!("target: {}", target.display());

    let mut packages: Vec<Box<dyn Package>> = Vec::with_capacity(opts.packages.len());
    for arg in &opts.packages {
        packages.push(Box::new(super::load_package(&target, arg)?));
    }

    if opts.interactive {
        packages = interactive_filter(packages)?;
    }

    stow::stow(
        StowOptions {
            delete: opts.delete,
        },
        &packages,
    )
}

/// Let the user pick a subset of the batch with a multi-select prompt,
/// preserving argument order.
fn interactive_filter(packages: Vec<Box<dyn Package>>) -> Result<Vec<Box<dyn Package>>> {
    let names: Vec<String> = packages.iter().map(|pkg| pkg.name()).collect();
    let selected = dialoguer::MultiSelect::new()
        .with_prompt("Choose packages to stow")
        .items(&names)
        .interact()
        .context("package selection failed")?;

    keep_selected(packages, &selected)
}

/// Keep the packages at the selected indices, preserving argument order.
/// An empty selection is rejected; a stow needs at least one package.
fn keep_selected(
    packages: Vec<Box<dyn Package>>,
    selected: &[usize],
) -> Result<Vec<Box<dyn Package>>> {
    if selected.is_empty() {
        bail!("no packages selected");
    }

    Ok(packages
        .into_iter()
        .enumerate()
        .filter_map(|(index, pkg)| selected.contains(&index).then_some(pkg))
        .collect())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl Package for Named {
        fn name(&self) -> String {
            self.0.to_string()
        }
        fn installed(&self) -> Result<bool> {
            Ok(false)
        }
        fn install(&self) -> Result<()> {
            Ok(())
        }
        fn uninstall(&self) -> Result<()> {
            Ok(())
        }
        fn run_hook_if_exists(&self, _name: &str) -> Result<()> {
            Ok(())
        }
    }

    fn batch(names: &[&'static str]) -> Vec<Box<dyn Package>> {
        names
            .iter()
            .map(|&name| Box::new(Named(name)) as Box<dyn Package>)
            .collect()
    }

    #[test]
    fn keep_selected_preserves_argument_order() {
        let kept = keep_selected(batch(&["a", "b", "c"]), &[2, 0]).unwrap();
        let names: Vec<String> = kept.iter().map(|pkg| pkg.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let err = keep_selected(batch(&["a", "b"]), &[]).err().unwrap();
        assert!(err.to_string().contains("no packages selected"));
    }

    #[test]
    fn full_selection_keeps_everything() {
        let kept = keep_selected(batch(&["a", "b"]), &[0, 1]).unwrap();
        assert_eq!(kept.len(), 2);
    }
}
