//! CLI parse: clap types for Veepiaci. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veepiaci CLI - verify files against a checksum file
#[derive(Parser)]
#[command(name = "veepiaci")]
#[command(about = "Verify a directory tree against a recorded checksum file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check every file in a directory against a checksum file
    Verify {
        /// Checksum file (Generic or UltraISO format)
        #[arg(long, short = 'c')]
        checksum_file: Option<PathBuf>,
        /// Directory whose files are checked
        #[arg(long, short = 'd')]
        directory: Option<PathBuf>,
        /// Write the verification report to this file
        #[arg(long, short = 'r')]
        result_file: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the format and entries of a checksum file
    Inspect {
        /// Checksum file to read
        checksum_file: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
