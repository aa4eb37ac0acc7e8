// SPDX-License-Identifier: MIT
//
// Command-line configuration.
//
// tilde has no config file. Everything it can be told comes in through
// argv: which file to show and, optionally, where to write a debug log.

use std::path::PathBuf;

use clap::Parser;

/// CLI arguments for tilde.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "tilde")]
#[command(version)]
#[command(about = "A minimal screen-oriented terminal text editor", long_about = None)]
pub struct Args {
    /// File to open. Without one, tilde starts on an empty screen.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Write a log to this file (filter with TILDE_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn no_arguments() {
        let args = Args::try_parse_from(["tilde"]).unwrap();
        assert_eq!(args.file, None);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn positional_file() {
        let args = Args::try_parse_from(["tilde", "notes.txt"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn log_file_flag() {
        let args = Args::try_parse_from(["tilde", "--log-file", "/tmp/tilde.log", "a.rs"]).unwrap();
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/tilde.log")));
        assert_eq!(args.file, Some(PathBuf::from("a.rs")));
    }

    #[test]
    fn second_file_is_rejected() {
        assert!(Args::try_parse_from(["tilde", "a", "b"]).is_err());
    }

    #[test]
    fn version_flag() {
        let err = Args::try_parse_from(["tilde", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }
}
