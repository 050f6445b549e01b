use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Keep a channel's video metadata cached locally and export it as a table.
#[derive(Debug, Parser)]
#[command(name = "tubestat", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults to `tubestat.*` in
    /// the platform configuration directory.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fetch as usual, but never write cache files.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// More logging (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bring both caches up to date.
    Sync,
    /// Sync, then write the dataset as CSV.
    ///
    /// Counters the API no longer reports (dislikes, hidden likes) are left
    /// empty, and ratios computed from them are NaN.
    Export {
        /// Output file, or `-` for standard output. Defaults to the configured
        /// `output`.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Show the state of both cache files without contacting the API.
    Status,
}

impl Cli {
    /// Default log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["tubestat", "sync"], "info")]
    #[case(&["tubestat", "-v", "sync"], "debug")]
    #[case(&["tubestat", "sync", "-vvv"], "trace")]
    fn test_verbosity(#[case] args: &[&str], #[case] level: &str) {
        assert_eq!(Cli::try_parse_from(args).unwrap().log_level(), level);
    }

    #[test]
    fn test_export_options() {
        let cli = Cli::try_parse_from(["tubestat", "--dry-run", "export", "-o", "-", "--config", "t.yaml"]).unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.config, Some(PathBuf::from("t.yaml")));
        assert!(matches!(cli.command, Command::Export { output: Some(path) } if path == PathBuf::from("-")));
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["tubestat"]).is_err());
    }
}
