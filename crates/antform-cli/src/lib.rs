//! antform CLI Library
//!
//! Command-line front end for the antform form helper: load a spec file,
//! open the page in Chromium and fill the form, or just check the file.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod error;
pub mod logging;
mod runner;
pub mod spec_file;

pub use commands::{CheckArgs, Cli, Commands, FillArgs};
pub use error::{CliError, CliResult};
pub use runner::{effective_config, run_check, run_fill};
pub use spec_file::{SpecFile, SpecFormat};
