//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// antform: fill Ant Design forms from a declarative spec file
#[derive(Parser, Debug)]
#[command(name = "antform")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a page in Chromium and fill its form
    Fill(FillArgs),

    /// Parse a spec file and list the fields it would fill
    Check(CheckArgs),
}

/// Arguments for the fill command
#[derive(Args, Debug)]
pub struct FillArgs {
    /// Page to open
    #[arg(long)]
    pub url: String,

    /// Spec file (`.json`, otherwise YAML)
    #[arg(long)]
    pub spec: PathBuf,

    /// CSS selector of the form root
    #[arg(long)]
    pub form: Option<String>,

    /// Abort on the first field that fails
    #[arg(long)]
    pub stop_on_error: bool,

    /// Per-action wait budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Show the browser window
    #[arg(long)]
    pub headful: bool,

    /// Chromium executable
    #[arg(long, env = "ANTFORM_CHROMIUM")]
    pub chromium: Option<String>,

    /// Disable the Chromium sandbox (containers, CI)
    #[arg(long)]
    pub no_sandbox: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Spec file (`.json`, otherwise YAML)
    pub spec: PathBuf,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fill_command() {
        let cli = Cli::try_parse_from([
            "antform",
            "fill",
            "--url",
            "http://localhost:3000/form",
            "--spec",
            "fields.yaml",
            "--stop-on-error",
            "--timeout-ms",
            "800",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Fill(args) => {
                assert_eq!(args.url, "http://localhost:3000/form");
                assert_eq!(args.spec, PathBuf::from("fields.yaml"));
                assert!(args.stop_on_error);
                assert_eq!(args.timeout_ms, Some(800));
                assert!(!args.headful);
                assert!(args.form.is_none());
            }
            Commands::Check(_) => panic!("expected fill"),
        }
    }

    #[test]
    fn test_fill_requires_url() {
        assert!(Cli::try_parse_from(["antform", "fill", "--spec", "f.yaml"]).is_err());
    }

    #[test]
    fn test_parse_check_with_json_logs() {
        let cli = Cli::try_parse_from(["antform", "--json-logs", "check", "f.json"]).unwrap();
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Commands::Check(ref a) if a.spec == PathBuf::from("f.json")));
    }
}
