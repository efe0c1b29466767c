// File: config.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::marker::DEFAULT_MARKER;
use std::path::PathBuf;

pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &["js", "css", "gif", "jpg", "png"];

#[derive(Debug, Clone)]
pub struct ConfigParameter {
    requests_dir: PathBuf,
    outputs_dir: PathBuf,
    excluded_extensions: Vec<String>,
    marker: char,
    strict: bool,
    run_scanner: bool,
    scanner_template: Option<PathBuf>,
    scanner_args: Vec<String>,
    manifest_format: String,
    quiet: bool,
}

impl Default for ConfigParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParameter {
    pub fn new() -> Self {
        Self {
            requests_dir: PathBuf::from("./requests"),
            outputs_dir: PathBuf::from("./outputs"),
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            marker: DEFAULT_MARKER,
            strict: false,
            run_scanner: true,
            scanner_template: None,
            scanner_args: Vec::new(),
            manifest_format: "json".to_string(),
            quiet: false,
        }
    }

    pub fn set_requests_dir(&mut self, requests_dir: PathBuf) {
        self.requests_dir = requests_dir;
    }

    pub fn requests_dir(&self) -> &PathBuf {
        &self.requests_dir
    }

    pub fn set_outputs_dir(&mut self, outputs_dir: PathBuf) {
        self.outputs_dir = outputs_dir;
    }

    pub fn outputs_dir(&self) -> &PathBuf {
        &self.outputs_dir
    }

    /// Extensions are compared without a leading dot and case-insensitively.
    pub fn set_excluded_extensions(&mut self, extensions: Vec<String>) {
        self.excluded_extensions = extensions
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
    }

    pub fn excluded_extensions(&self) -> &[String] {
        &self.excluded_extensions
    }

    pub fn is_excluded(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.');
        self.excluded_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    pub fn set_marker(&mut self, marker: char) {
        self.marker = marker;
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    pub fn set_run_scanner(&mut self, run_scanner: bool) {
        self.run_scanner = run_scanner;
    }

    pub fn run_scanner(&self) -> bool {
        self.run_scanner
    }

    pub fn set_scanner_template(&mut self, scanner_template: Option<PathBuf>) {
        self.scanner_template = scanner_template;
    }

    pub fn scanner_template(&self) -> Option<&PathBuf> {
        self.scanner_template.as_ref()
    }

    pub fn set_scanner_args(&mut self, scanner_args: Vec<String>) {
        self.scanner_args = scanner_args;
    }

    pub fn scanner_args(&self) -> &[String] {
        &self.scanner_args
    }

    pub fn set_manifest_format(&mut self, manifest_format: String) {
        self.manifest_format = manifest_format;
    }

    pub fn manifest_format(&self) -> &str {
        &self.manifest_format
    }

    pub fn set_quiet(&mut self, quiet: bool) {
        self.quiet = quiet;
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
