//! antform CLI: fill Ant Design forms from a spec file
//!
//! ## Usage
//!
//! ```bash
//! antform check fields.yaml
//! antform fill --url http://localhost:3000/signup --spec fields.yaml
//! antform -vv fill --url http://localhost:3000/signup --spec fields.json --stop-on-error
//! ```

use antform_cli::{logging, run_check, run_fill, Cli, CliError, CliResult, Commands};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Check(args) => run_check(&args),
        Commands::Fill(args) => {
            let rt = tokio::runtime::Runtime::new()
                .map_err(|e| CliError::config(format!("Failed to create runtime: {e}")))?;
            rt.block_on(run_fill(&args))
        }
    }
}
