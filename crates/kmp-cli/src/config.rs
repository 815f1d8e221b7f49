//! Command-line configuration.
//!
//! Everything is a flag; the log filter can also come from `KMP_LOG`.

use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Dump KMP course files to editable sheets and build them back.
#[derive(Debug, Clone, Parser)]
#[command(name = "kmp", about = "KMP course file converter", version)]
pub struct CliConfig {
    /// Raise the log level (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log filter directives, overriding --verbose (e.g. `kmp_formats=trace`)
    #[arg(long, env = "KMP_LOG", global = true)]
    pub log_filter: Option<String>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Convert a KMP file into a sheet workbook
    Dump {
        /// KMP file to read
        input: PathBuf,
        /// Workbook to write (default: `<KMP>.sheet`)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Replace the output if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Convert a sheet workbook into a KMP file
    Build {
        /// Workbook to read
        input: PathBuf,
        /// KMP file to write
        #[arg(short, long)]
        output: PathBuf,
        /// Replace the output if it already exists
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the container header, offsets and section entry counts
    Inspect {
        /// KMP file to read
        input: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Filter directives for the tracing subscriber
    #[must_use]
    pub fn filter_directives(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
        .to_string()
    }
}

/// Default workbook path for a dumped KMP file: the input name plus `.sheet`
#[must_use]
pub fn default_sheet_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".sheet");
    PathBuf::from(name)
}
