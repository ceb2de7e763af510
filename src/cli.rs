pub mod setup;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    Terminal,
    /// JSON, one entry per file
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "regionsort")]
#[command(
    about = "Reorganize Unity C# class members into canonical #region buckets",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// C# files or directories to reorganize
    pub paths: Vec<PathBuf>,

    /// Report files that would change without writing them (exit 1 if any)
    #[arg(long)]
    pub check: bool,

    /// Print the reorganized source instead of writing it back
    #[arg(long, conflicts_with = "check")]
    pub stdout: bool,

    /// Show which bucket every member was assigned to
    #[arg(long)]
    pub explain: bool,

    /// Output format for --explain
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Reorganize classes nested inside other classes as well
    #[arg(long)]
    pub recurse_nested: bool,

    /// Only treat `#if` directives mentioning DEBUG or UNITY_EDITOR as debug guards
    #[arg(long)]
    pub strict_directives: bool,

    /// Configuration file (defaults to the nearest .regionsort.toml)
    #[arg(short, long, env = "REGIONSORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (0 = all cores)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    pub jobs: usize,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Plain output: no colors, no emoji
    #[arg(long)]
    pub plain: bool,
}
