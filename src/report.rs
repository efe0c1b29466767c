// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use serde::Serialize;
use std::fs::File;
use std::io::{Result, Write};
use std::path::Path;

/// One line of the manifest written next to the request files.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub file: String,
    pub method: String,
    pub url: String,
    pub injection_points: usize,
    pub parameters: Vec<String>,
    pub signature: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ReportFormat::Text => "manifest.txt",
            ReportFormat::Json => "manifest.json",
        }
    }
}

pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate_report(
        entries: &[ReportEntry],
        output_path: &Path,
        format: ReportFormat,
    ) -> Result<()> {
        match format {
            ReportFormat::Text => Self::generate_text_report(entries, output_path),
            ReportFormat::Json => Self::generate_json_report(entries, output_path),
        }
    }

    pub fn generate_text_report(entries: &[ReportEntry], output_path: &Path) -> Result<()> {
        let mut file = File::create(output_path)?;
        for entry in entries {
            writeln!(
                file,
                "{} {} {} [{}] {}",
                entry.file,
                entry.method,
                entry.url,
                entry.injection_points,
                entry.parameters.join(", ")
            )?;
        }
        Ok(())
    }

    pub fn generate_json_report(entries: &[ReportEntry], output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let mut file = File::create(output_path)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
