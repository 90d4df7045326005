use std::path::PathBuf;

use clap::Parser;

use crate::models::Dialect;

#[derive(Parser, Debug)]
#[command(
    name = "license-harvest",
    about = "Search source files for license comments and group files by license text",
    version
)]
pub struct Cli {
    /// Glob pattern selecting the files to scan (e.g. "vendor/**/*.js")
    pub pattern: String,

    /// Match the glob pattern case-sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Output path for the HTML report
    #[arg(short, long, value_name = "FILE", default_value = "search-results.html")]
    pub output: PathBuf,

    /// Report format
    #[arg(long, default_value = "html", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Number of files scanned concurrently [default: CPU count minus two]
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Comment dialect to extract (repeatable) [default: all]
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Vec<Dialect>,

    /// Treat a file with no comments at all as a single comment
    #[arg(long)]
    pub whole_file_fallback: bool,

    /// Per-file timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file [default: ./.license-harvest/config.toml, fallback ~/.config/license-harvest/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log every processed file and list skipped files
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Html,
    Terminal,
    Json,
}
