// File: scanner.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::config::ConfigParameter;
use crate::error::{SiftError, SiftResult};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_TEMPLATE: &str = include_str!("../assets/run_scanner.sh");

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").unwrap());

/// Renders the scanner shell script and runs it over the request directory.
#[derive(Debug, Clone)]
pub struct ScannerRunner {
    template: String,
    requests_dir: PathBuf,
    outputs_dir: PathBuf,
    args: Vec<String>,
}

impl ScannerRunner {
    pub fn new(
        template: String,
        requests_dir: PathBuf,
        outputs_dir: PathBuf,
        args: Vec<String>,
    ) -> Self {
        ScannerRunner {
            template,
            requests_dir,
            outputs_dir,
            args,
        }
    }

    pub fn from_config(config: &ConfigParameter) -> SiftResult<Self> {
        let template = match config.scanner_template() {
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                SiftError::Scanner(format!("cannot read template {}: {}", path.display(), e))
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };
        Ok(Self::new(
            template,
            config.requests_dir().clone(),
            config.outputs_dir().clone(),
            config.scanner_args().to_vec(),
        ))
    }

    /// Joins arguments with spaces, double-quoting any that contain
    /// whitespace.
    pub fn quote_args(args: &[String]) -> String {
        args.iter()
            .map(|arg| {
                if WHITESPACE.is_match(arg) {
                    format!("\"{}\"", arg)
                } else {
                    arg.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn render(&self) -> String {
        self.template
            .replace("{{REQS_FOLDER}}", &path_text(&self.requests_dir))
            .replace("{{OUTPUTS_FOLDER}}", &path_text(&self.outputs_dir))
            .replace("{{SCANNER_ARGS}}", &Self::quote_args(&self.args))
    }

    /// Writes the rendered script to a temporary file and runs it with `sh`,
    /// sharing this process's stdio.
    pub async fn run(&self) -> SiftResult<()> {
        let script = self.render();
        debug!("Scanner script:\n{}", script);

        let mut file = tempfile::Builder::new()
            .prefix("scanner.")
            .suffix(".sh")
            .tempfile()?;
        file.write_all(script.as_bytes())?;
        file.flush()?;

        info!("Running scanner script {}", file.path().display());
        let status = Command::new("sh")
            .arg(file.path())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        if !status.success() {
            return Err(SiftError::Scanner(format!("script exited with {}", status)));
        }
        Ok(())
    }
}

fn path_text(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
