// File: cli.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigParameter;

#[derive(Parser, Debug)]
#[command(
    name = env!("CARGO_PKG_NAME"),
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    after_help = "Arguments after `--` are passed to the scanner, e.g.\n  reqsift --burp-file items.xml -- --header \"Cookie: test=1;\" --force-ssl --batch"
)]
pub struct Cli {
    #[arg(short = 'b', long = "burp-file", help = "Burp Suite XML export to read")]
    pub burp_file: PathBuf,

    #[arg(
        short = 'r',
        long = "reqs-dir",
        default_value = "./requests",
        help = "Directory that receives the marked requests"
    )]
    pub reqs_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "outputs-dir",
        default_value = "./outputs",
        help = "Directory handed to the scanner for its output"
    )]
    pub outputs_dir: PathBuf,

    #[arg(
        short = 'x',
        long = "exclude-ext",
        value_delimiter = ',',
        default_value = "js,css,gif,jpg,png",
        help = "Comma-separated file extensions to skip"
    )]
    pub exclude_ext: Vec<String>,

    #[arg(
        short = 'm',
        long = "marker",
        default_value_t = '*',
        help = "Character appended to every injection point"
    )]
    pub marker: char,

    #[arg(long = "strict", help = "Abort on request text that cannot be parsed")]
    pub strict: bool,

    #[arg(long = "no-scan", help = "Only write request files, do not run the scanner")]
    pub no_scan: bool,

    #[arg(long = "scanner-template", help = "Shell script template used to run the scanner")]
    pub scanner_template: Option<PathBuf>,

    #[arg(
        long = "manifest-format",
        default_value = "json",
        value_parser = ["json", "text", "none"]
    )]
    pub manifest_format: String,

    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,

    #[arg(
        short = 'q',
        long = "quiet",
        help = "Reduce output verbosity"
    )]
    pub quiet: bool,

    #[arg(long = "no-color", help = "Disable colored output")]
    pub no_color: bool,

    #[arg(last = true, help = "Extra arguments for the scanner")]
    pub scanner_args: Vec<String>,
}

impl Cli {
    pub fn to_config(&self) -> ConfigParameter {
        let mut config = ConfigParameter::new();
        config.set_requests_dir(self.reqs_dir.clone());
        config.set_outputs_dir(self.outputs_dir.clone());
        config.set_excluded_extensions(self.exclude_ext.clone());
        config.set_marker(self.marker);
        config.set_strict(self.strict);
        config.set_run_scanner(!self.no_scan);
        config.set_scanner_template(self.scanner_template.clone());
        config.set_scanner_args(self.scanner_args.clone());
        config.set_manifest_format(self.manifest_format.clone());
        config.set_quiet(self.quiet);
        config
    }

    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["reqsift", "--burp-file", "items.xml"]).unwrap();
        let config = cli.to_config();

        assert_eq!(cli.burp_file, PathBuf::from("items.xml"));
        assert_eq!(config.requests_dir(), &PathBuf::from("./requests"));
        assert_eq!(config.excluded_extensions(), &["js", "css", "gif", "jpg", "png"]);
        assert_eq!(config.marker(), '*');
        assert!(config.run_scanner());
        assert_eq!(cli.level_filter(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_trailing_scanner_args() {
        let cli = Cli::try_parse_from([
            "reqsift",
            "-b",
            "items.xml",
            "--no-scan",
            "-x",
            "svg,woff",
            "--",
            "--header",
            "Cookie: test=1;",
            "--batch",
        ])
        .unwrap();
        let config = cli.to_config();

        assert!(!config.run_scanner());
        assert_eq!(config.excluded_extensions(), &["svg", "woff"]);
        assert_eq!(
            config.scanner_args(),
            &["--header".to_string(), "Cookie: test=1;".to_string(), "--batch".to_string()]
        );
    }

    #[test]
    fn test_burp_file_is_required() {
        assert!(Cli::try_parse_from(["reqsift"]).is_err());
    }

    #[test]
    fn test_manifest_format_is_validated() {
        assert!(Cli::try_parse_from(["reqsift", "-b", "f.xml", "--manifest-format", "xml"]).is_err());
    }

    #[test]
    fn test_log_level_parsing() {
        let cli = Cli::try_parse_from(["reqsift", "-b", "f", "--log-level", "DEBUG"]).unwrap();
        assert_eq!(cli.level_filter(), log::LevelFilter::Debug);
    }
}
