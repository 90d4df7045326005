//! `license-harvest` — find license and copyright comments across a source
//! tree and group the files that share each distinct license text.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config and apply flag overrides ([`config`]).
//! 3. Compile the comment dialects and license patterns ([`scanner`]).
//! 4. Expand the glob into regular files ([`discovery`]).
//! 5. Scan files concurrently and merge the findings ([`engine`]).
//! 6. Render the requested report and the run summary ([`report`]).
//! 7. Shut the runtime down without waiting on reads that outlived their file
//!    timeout, then exit `0` on success, even with no findings; `1` on a fatal
//!    error.

mod cli;
mod config;
mod discovery;
mod engine;
mod error;
mod extract;
mod license;
mod models;
mod report;
mod scanner;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use cli::{Cli, ReportFormat};
use config::load_config;
use discovery::discover_files;
use engine::Engine;
use scanner::FileScanner;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    engine::block_on(run(cli)).context("cannot start the async runtime")?
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = load_config(&cwd, cli.config.as_deref())?.resolve(&cli)?;

    // Pattern errors are fatal before any file is touched
    let scanner = FileScanner::from_settings(
        &settings.dialects,
        settings.whole_file_fallback,
        &settings.extra_patterns,
    )?;

    let files = discover_files(&cli.pattern, cli.case_sensitive)?;
    if files.is_empty() && !cli.quiet {
        eprintln!("  {} no files match {}", "→".yellow(), cli.pattern);
    }

    info!(
        "scanning {} files with {} workers, dialects: {:?}",
        files.len(),
        settings.engine.workers,
        scanner.dialects()
    );

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        pb
    };

    let engine = Engine::new(scanner, settings.engine)?.with_progress(progress);

    let started = Instant::now();
    let outcome = engine.aggregate(files).await?;
    let elapsed = started.elapsed();

    let groups = outcome.groups();

    match cli.report {
        ReportFormat::Html => {
            report::html::render(&groups, engine.scanner().classifier().pattern(), &cli.output)?;
            if !cli.quiet {
                let shown = cli.output.canonicalize().unwrap_or_else(|_| cli.output.clone());
                eprintln!("\n  {} Results reported on {}", "→".cyan(), shown.display());
            }
        }
        ReportFormat::Terminal => {
            report::terminal::render(&groups, &cli.pattern, cli.quiet);
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
    }

    report::summary::render(&outcome, elapsed, cli.verbose, cli.quiet);

    Ok(())
}
