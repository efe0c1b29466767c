// File: config_tests.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#[cfg(test)]
mod tests {
    use crate::config::ConfigParameter;
    use rstest::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_parameter_default() {
        let config = ConfigParameter::default();

        assert_eq!(config.requests_dir(), &PathBuf::from("./requests"));
        assert_eq!(config.outputs_dir(), &PathBuf::from("./outputs"));
        assert_eq!(config.excluded_extensions(), &["js", "css", "gif", "jpg", "png"]);
        assert_eq!(config.marker(), '*');
        assert_eq!(config.strict(), false);
        assert_eq!(config.run_scanner(), true);
        assert!(config.scanner_template().is_none());
        assert!(config.scanner_args().is_empty());
        assert_eq!(config.manifest_format(), "json");
        assert_eq!(config.quiet(), false);
    }

    #[rstest]
    #[case("js", true)]
    #[case("JS", true)]
    #[case(".png", true)]
    #[case("php", false)]
    #[case("null", false)]
    #[case("", false)]
    fn test_default_exclusions(#[case] extension: &str, #[case] expected: bool) {
        let config = ConfigParameter::new();
        assert_eq!(config.is_excluded(extension), expected);
    }

    #[test]
    fn test_set_excluded_extensions_normalises() {
        let mut config = ConfigParameter::new();
        config.set_excluded_extensions(vec![
            " .SVG ".to_string(),
            "woff".to_string(),
            "".to_string(),
        ]);

        assert_eq!(config.excluded_extensions(), &["svg", "woff"]);
        assert!(config.is_excluded("svg"));
        assert!(!config.is_excluded("js"));
    }

    #[test]
    fn test_empty_exclusion_list_excludes_nothing() {
        let mut config = ConfigParameter::new();
        config.set_excluded_extensions(Vec::new());
        assert!(!config.is_excluded("js"));
    }

    #[test]
    fn test_set_strict() {
        let mut config = ConfigParameter::new();

        config.set_strict(true);
        assert_eq!(config.strict(), true);

        config.set_strict(false);
        assert_eq!(config.strict(), false);
    }

    #[rstest]
    #[case('*')]
    #[case('§')]
    #[case('!')]
    fn test_set_marker(#[case] marker: char) {
        let mut config = ConfigParameter::new();
        config.set_marker(marker);
        assert_eq!(config.marker(), marker);
    }

    #[test]
    fn test_scanner_settings() {
        let mut config = ConfigParameter::new();
        config.set_run_scanner(false);
        config.set_scanner_template(Some(PathBuf::from("custom.sh")));
        config.set_scanner_args(vec!["--batch".to_string()]);

        assert_eq!(config.run_scanner(), false);
        assert_eq!(config.scanner_template(), Some(&PathBuf::from("custom.sh")));
        assert_eq!(config.scanner_args(), &["--batch".to_string()]);
    }

    #[test]
    fn test_config_clone() {
        let mut config = ConfigParameter::new();
        config.set_requests_dir(PathBuf::from("/tmp/reqs"));
        config.set_outputs_dir(PathBuf::from("/tmp/outs"));
        config.set_manifest_format("text".to_string());
        config.set_quiet(true);

        let cloned = config.clone();
        assert_eq!(cloned.requests_dir(), &PathBuf::from("/tmp/reqs"));
        assert_eq!(cloned.outputs_dir(), &PathBuf::from("/tmp/outs"));
        assert_eq!(cloned.manifest_format(), "text");
        assert_eq!(cloned.quiet(), true);
    }
}
