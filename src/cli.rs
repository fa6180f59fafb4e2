//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the symlink farm manager.
#[derive(Parser, Debug)]
#[command(name = "stowaway", about = "Symlink farm manager", version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Installation target directory (default is the current directory)
    #[arg(short, long, global = true)]
    pub target: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install packages as a batch with lifecycle hooks
    Stow(StowOpts),
    /// Install packages directly, reinstalling any that are present
    Install(InstallOpts),
    /// Uninstall packages directly
    Uninstall(UninstallOpts),
    /// List installed packages
    Packages(PackagesOpts),
    /// Print version information
    Version,
}

/// Options for the `stow` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StowOpts {
    /// Package directories to stow
    #[arg(required = true)]
    pub packages: Vec<PathBuf>,

    /// Uninstall the packages instead of installing them
    #[arg(short = 'D', long)]
    pub delete: bool,

    /// Interactively filter the packages before stowing
    #[arg(short, long)]
    pub interactive: bool,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct InstallOpts {
    /// Package directories to install
    #[arg(required = true)]
    pub packages: Vec<PathBuf>,
}

/// Options for the `uninstall` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct UninstallOpts {
    /// Package directories to uninstall
    #[arg(required = true)]
    pub packages: Vec<PathBuf>,
}

/// Options for the `packages` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct PackagesOpts {
    /// Only list packages whose source path starts with this prefix
    #[arg(short, long)]
    pub prefix: Option<PathBuf>,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_stow_with_packages() {
        let cli = Cli::parse_from(["stowaway", "stow", "vim", "zsh"]);
        let Command::Stow(opts) = cli.command else {
            panic!("expected Stow command");
        };
        assert_eq!(
            opts.packages,
            vec![PathBuf::from("vim"), PathBuf::from("zsh")]
        );
        assert!(!opts.delete);
        assert!(!opts.interactive);
    }

    #[test]
    fn parse_stow_requires_a_package() {
        assert!(Cli::try_parse_from(["stowaway", "stow"]).is_err());
    }

    #[test]
    fn parse_stow_delete() {
        let cli = Cli::parse_from(["stowaway", "stow", "-D", "vim"]);
        let Command::Stow(opts) = cli.command else {
            panic!("expected Stow command");
        };
        assert!(opts.delete);
    }

    #[test]
    fn parse_stow_interactive() {
        let cli = Cli::parse_from(["stowaway", "stow", "--interactive", "vim"]);
        let Command::Stow(opts) = cli.command else {
            panic!("expected Stow command");
        };
        assert!(opts.interactive);
    }

    #[test]
    fn parse_target_long() {
        let cli = Cli::parse_from(["stowaway", "stow", "--target", "/home/me", "vim"]);
        assert_eq!(cli.global.target, Some(PathBuf::from("/home/me")));
    }

    #[test]
    fn parse_target_short() {
        let cli = Cli::parse_from(["stowaway", "install", "-t", "/home/me", "vim"]);
        assert_eq!(cli.global.target, Some(PathBuf::from("/home/me")));
    }

    #[test]
    fn parse_install() {
        let cli = Cli::parse_from(["stowaway", "install", "vim"]);
        assert!(matches!(cli.command, Command::Install(_)));
    }

    #[test]
    fn parse_uninstall() {
        let cli = Cli::parse_from(["stowaway", "uninstall", "vim"]);
        assert!(matches!(cli.command, Command::Uninstall(_)));
    }

    #[test]
    fn parse_packages_with_prefix() {
        let cli = Cli::parse_from(["stowaway", "packages", "--prefix", "/src/dotfiles"]);
        let Command::Packages(opts) = cli.command else {
            panic!("expected Packages command");
        };
        assert_eq!(opts.prefix, Some(PathBuf::from("/src/dotfiles")));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["stowaway", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["stowaway", "-v", "stow", "vim"]);
        assert!(cli.verbose);
    }
}
