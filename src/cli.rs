use crate::extract::ExtractBackend;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    version,
    name = "geth-installer",
    about = "Download, verify and install the pinned geth binary for this machine"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config (defaults to ./geth-installer.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Where to write the binary (defaults to ~/.geth/bin/geth)
    #[arg(long, global = true)]
    pub install_path: Option<PathBuf>,

    /// Base URL serving the release archives
    #[arg(long, global = true)]
    pub mirror: Option<String>,

    /// How to unpack the archive
    #[arg(long, value_enum, global = true)]
    pub extractor: Option<ExtractBackend>,

    /// Do not draw the download progress line
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Download (or read), verify and install the binary. Default when no command is given.
    Install {
        /// Install from an already downloaded archive; the checksum is still enforced
        #[arg(long, value_name = "FILE")]
        archive: Option<PathBuf>,
    },
    /// Show the resolved URL, checksum and install path without touching network or disk
    Plan,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_means_install() {
        let cli = Cli::parse_from(["geth-installer"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_progress);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "geth-installer",
            "install",
            "--archive",
            "geth.tar.gz",
            "--extractor",
            "builtin",
            "-vv",
        ]);
        assert_eq!(
            cli.command,
            Some(Commands::Install {
                archive: Some(PathBuf::from("geth.tar.gz"))
            })
        );
        assert_eq!(cli.extractor, Some(ExtractBackend::Builtin));
        assert_eq!(cli.verbose, 2);
    }
}
