mod commands;
mod logging;
mod progress;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::Ordering;

use chrono::{DateTime, Local};
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use shotreap_core::candidate;
use shotreap_core::disposal::DisposalMode;
use shotreap_core::scheduler;
use shotreap_core::{ReapConfig, ReapScheduler, RunContext};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match shotreap_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Reap {
            folder,
            debug,
            workers,
            root,
            threshold,
        }) => {
            if let Err(err) = run_reap(&config, folder, debug, workers, root, threshold) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Preview { root }) => {
            if let Err(err) = run_preview(&config, root) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn build_context(
    config: &ReapConfig,
    folder: Option<String>,
    debug: bool,
    workers: Option<usize>,
    root: Option<PathBuf>,
    threshold: Option<u32>,
) -> RunContext {
    let mut ctx = RunContext::from_config(config);
    if let Some(root) = root {
        ctx = ctx.with_root(root);
    }
    if let Some(folder) = folder {
        ctx = ctx.with_target(&folder);
    }
    if let Some(workers) = workers {
        ctx = ctx.with_folder_workers(workers);
    }
    if let Some(threshold) = threshold {
        ctx = ctx.with_threshold(threshold);
    }
    if debug {
        ctx = ctx.with_disposal(DisposalMode::Mark);
    }
    ctx
}

fn run_reap(
    config: &ReapConfig,
    folder: Option<String>,
    debug: bool,
    workers: Option<usize>,
    root: Option<PathBuf>,
    threshold: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_context(config, folder, debug, workers, root, threshold);
    if debug {
        info!("Debug disposal: duplicates are renamed, nothing is trashed");
    }

    let scheduler = ReapScheduler::new(ctx);
    let cancel = scheduler.cancel_token();
    ctrlc::set_handler(move || {
        eprintln!("\nStopping after in-flight work finishes...");
        cancel.store(true, Ordering::SeqCst);
    })?;

    hide_cursor();
    let reporter = CliReporter::new();
    let result = scheduler.run(&reporter);
    show_cursor();
    let summary = result?;

    println!();
    info!(
        "{} folder(s) processed, {} duplicate(s) disposed, {} of those in final sweeps",
        format!("{}", summary.outcomes.len()).green(),
        format!("{}", summary.total_disposed() + summary.total_swept()).red(),
        format!("{}", summary.total_swept()).red(),
    );
    if summary.interrupted {
        info!("{}", "Run interrupted before completion".yellow());
    }

    Ok(())
}

fn run_preview(
    config: &ReapConfig,
    root: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = RunContext::from_config(config);
    if let Some(root) = root {
        ctx = ctx.with_root(root);
    }

    let folders = scheduler::discover_folders(&ctx.root, &ctx.exclude_folders)?;
    if folders.is_empty() {
        println!("No folders to process under {}", ctx.root.display());
        return Ok(());
    }

    println!("Folders under {} (newest first):", ctx.root.display());
    for folder in &folders {
        let created: DateTime<Local> = scheduler::folder_timestamp(folder).into();
        let candidates = candidate::list_candidates(folder, &ctx.watch)
            .map(|c| c.len())
            .unwrap_or(0);
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| folder.display().to_string());
        println!(
            "  {}  {:>4} candidate(s)  {}",
            created.format("%Y-%m-%d %H:%M"),
            candidates,
            name
        );
    }

    Ok(())
}

fn hide_cursor() {
    print!("\x1B[?25l");
    let _ = io::stdout().flush();
}

fn show_cursor() {
    print!("\x1B[?25h");
    let _ = io::stdout().flush();
}
