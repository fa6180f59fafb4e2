//! Binary entry point for the `stowaway` symlink farm manager.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod exec;
mod fs;
mod logging;
mod manifest;
mod package;
mod stow;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    logging::init(args.verbose);

    match args.command {
        cli::Command::Stow(opts) => commands::stow::run(&args.global, &opts),
        cli::Command::Install(opts) => commands::install::run(&args.global, &opts),
        cli::Command::Uninstall(opts) => commands::uninstall::run(&args.global, &opts),
        cli::Command::Packages(opts) => commands::packages::run(&args.global, &opts),
        cli::Command::Version => {
            let version = option_env!("STOWAWAY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("stowaway {version}");
            Ok(())
        }
    }
}
