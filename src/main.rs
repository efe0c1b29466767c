// File: main.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log::{error, info};
use simple_logger::SimpleLogger;

use reqsift::capture::CaptureDecoder;
use reqsift::cli::Cli;
use reqsift::export::{export_requests, prepare_directories, write_manifest};
use reqsift::scanner::ScannerRunner;
use reqsift::stats::{human_readable_time, RunStats};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = SimpleLogger::new().with_level(cli.level_filter()).init() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.to_config();
    let mut stats = RunStats::new();
    stats.start();

    let capture = CaptureDecoder::decode_file(&cli.burp_file)
        .with_context(|| format!("reading {}", cli.burp_file.display()))?;
    info!(
        "Burp export {} ({} items)",
        capture.burp_version.as_deref().unwrap_or("unknown version"),
        capture.items.len()
    );

    prepare_directories(&[config.requests_dir().as_path(), config.outputs_dir().as_path()])
        .context("preparing output directories")?;

    let entries = export_requests(capture.items, &config, &mut stats)
        .context("exporting marked requests")?;
    if let Some(path) = write_manifest(&entries, &config)? {
        info!("Manifest written to {}", path.display());
    }
    stats.finish();

    if !config.quiet() {
        print_summary(&stats);
    }

    if config.run_scanner() && stats.written() > 0 {
        ScannerRunner::from_config(&config)?
            .run()
            .await
            .context("running scanner")?;
    } else if config.run_scanner() {
        println!("{} No requests with injection points, scanner not started", "⚠".yellow().bold());
    }

    Ok(())
}

fn print_summary(stats: &RunStats) {
    println!(
        "{} {} exchanges, {} duplicates dropped, {} excluded, {} without parameters, {} unparsable",
        "ℹ".blue().bold(),
        stats.total_exchanges(),
        stats.duplicates(),
        stats.excluded(),
        stats.unmarked(),
        stats.unparsable()
    );
    println!(
        "{} {} request file(s) written with {} injection point(s). Started at {} / Ended at {}. {} ms.",
        "✓".green().bold(),
        stats.written(),
        stats.injection_points(),
        human_readable_time(stats.start_time()),
        human_readable_time(stats.end_time()),
        stats.elapsed_ms()
    );
}
