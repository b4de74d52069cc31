//! Command-line interface for muxfile.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use crate::loader::DEFAULT_CONFIG;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for muxfile.
///
/// # Examples
///
/// ```bash
/// # Create whatever is missing from ./sessions.conf
/// muxfile
///
/// # Recreate every declared window from another config
/// muxfile --restart ~/work.conf
/// ```
#[derive(Parser, Debug)]
#[command(name = "muxfile")]
#[command(version)]
#[command(about = "Provision tmux sessions and windows from a config file")]
#[command(long_about = "Muxfile reads session blocks from a plain-text config and makes sure\n\
    every declared window exists. Existing windows are left alone unless\n\
    --restart is given, in which case they are killed and recreated.\n\n\
    Config format:\n\n  \
    [session]\n  \
    workdir = ~/src/project\n  \
    - window = command\n  \
    + follow-up command")]
pub struct Cli {
    /// Kill and recreate windows that already exist.
    #[arg(short, long)]
    pub restart: bool,

    /// Session config to apply.
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["muxfile"]).unwrap();
        assert!(!cli.restart);
        assert_eq!(cli.config, PathBuf::from("sessions.conf"));
    }

    #[test]
    fn test_restart_and_path() {
        let cli = Cli::try_parse_from(["muxfile", "-r", "work.conf"]).unwrap();
        assert!(cli.restart);
        assert_eq!(cli.config, PathBuf::from("work.conf"));

        let cli = Cli::try_parse_from(["muxfile", "--restart"]).unwrap();
        assert!(cli.restart);
    }

    #[test]
    fn test_rejects_extra_positional() {
        let err = Cli::try_parse_from(["muxfile", "a.conf", "b.conf"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_rejects_unknown_flag() {
        let err = Cli::try_parse_from(["muxfile", "--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_an_error_exit() {
        let err = Cli::try_parse_from(["muxfile", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
