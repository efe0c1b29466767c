// File: export.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::capture::CapturedExchange;
use crate::config::ConfigParameter;
use crate::dedup::Deduplicator;
use crate::error::{SiftError, SiftResult};
use crate::marker::InjectionMarker;
use crate::report::{ReportEntry, ReportFormat, ReportGenerator};
use crate::stats::RunStats;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Empties each directory, creating it if needed. A path that exists but is
/// not a directory is an error and nothing is removed.
pub fn prepare_directories(dirs: &[&Path]) -> SiftResult<()> {
    for dir in dirs {
        if let Ok(meta) = fs::metadata(dir) {
            if !meta.is_dir() {
                return Err(SiftError::Io(std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    format!("{} is a file path not a directory", dir.display()),
                )));
            }
        }
    }

    for dir in dirs {
        if dir.exists() {
            debug!("Clearing {}", dir.display());
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub fn request_file_name(index: usize) -> String {
    format!("request-{}.req", index)
}

/// De-duplicates the batch, marks what is left and writes one
/// `request-N.req` per exchange with at least one injection point.
pub fn export_requests(
    exchanges: Vec<CapturedExchange>,
    config: &ConfigParameter,
    stats: &mut RunStats,
) -> SiftResult<Vec<ReportEntry>> {
    stats.set_total_exchanges(exchanges.len());
    let retained = Deduplicator::eliminate(exchanges)?;
    stats.set_retained(retained.len());

    let marker = InjectionMarker::new(config.marker());
    let progress = progress_bar(retained.len() as u64, config.quiet());
    let mut entries = Vec::new();

    for entry in retained {
        progress.inc(1);
        let exchange = &entry.exchange;

        if config.is_excluded(&exchange.extension) {
            debug!("Skipping {} (excluded extension {})", exchange.url, exchange.extension);
            stats.add_excluded();
            continue;
        }

        let result = match marker.mark_all(&exchange.request) {
            Ok(result) => result,
            Err(e) if e.is_parse() && !config.strict() => {
                warn!("Skipping unparsable request for {}: {}", exchange.url, e);
                stats.add_unparsable();
                continue;
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        if !result.has_injection_points() {
            debug!("No injection points in {} {}", exchange.method, exchange.url);
            stats.add_unmarked();
            continue;
        }

        let file = request_file_name(stats.written() + 1);
        fs::write(config.requests_dir().join(&file), result.text.as_bytes())?;
        stats.add_written(result.count);
        info!("Wrote {} ({} injection points)", file, result.count);

        entries.push(ReportEntry {
            file,
            method: exchange.method.clone(),
            url: if exchange.url.is_empty() {
                exchange.path.clone()
            } else {
                exchange.url.clone()
            },
            injection_points: result.count,
            parameters: entry.parameters.iter().map(str::to_string).collect(),
            signature: entry.signature.to_string(),
        });
    }

    progress.finish_and_clear();
    Ok(entries)
}

/// Writes the manifest into the requests directory. Returns `None` when the
/// configured format is `none`.
pub fn write_manifest(
    entries: &[ReportEntry],
    config: &ConfigParameter,
) -> SiftResult<Option<PathBuf>> {
    let Some(format) = ReportFormat::from_name(config.manifest_format()) else {
        debug!("Manifest disabled ({})", config.manifest_format());
        return Ok(None);
    };

    let path = config.requests_dir().join(format.file_name());
    ReportGenerator::generate_report(entries, &path, format)?;
    Ok(Some(path))
}

fn progress_bar(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template("[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");
    pb.set_style(style);
    pb
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
