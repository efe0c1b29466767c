// File: common/mod.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine};
use reqsift::config::ConfigParameter;
use std::path::Path;

pub struct Item<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub extension: &'a str,
    pub request: String,
}

pub fn get(path: &str) -> String {
    format!("GET {} HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test\r\n\r\n", path)
}

pub fn post(path: &str, content_type: &str, body: &str) -> String {
    format!(
        "POST {} HTTP/1.1\r\nHost: example.com\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n{}",
        path,
        content_type,
        body.len(),
        body
    )
}

pub fn item<'a>(method: &'a str, path: &'a str, extension: &'a str, request: String) -> Item<'a> {
    Item {
        method,
        path,
        extension,
        request,
    }
}

/// Builds a Burp "Save items" export with base64 encoded requests.
pub fn burp_export(items: &[Item]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\"?>\n<items burpVersion=\"2023.10.3\" exportTime=\"Mon Oct 14 12:00:00 CEST 2024\">\n",
    );
    for item in items {
        xml.push_str(&format!(
            "  <item>\n    <time>Mon Oct 14 11:59:00 CEST 2024</time>\n    \
             <url><![CDATA[https://example.com{path}]]></url>\n    \
             <host ip=\"93.184.216.34\">example.com</host>\n    <port>443</port>\n    \
             <protocol>https</protocol>\n    <method><![CDATA[{method}]]></method>\n    \
             <path><![CDATA[{path}]]></path>\n    <extension>{ext}</extension>\n    \
             <request base64=\"true\"><![CDATA[{request}]]></request>\n    \
             <status>200</status>\n    <responselength>512</responselength>\n    \
             <mimetype>HTML</mimetype>\n    <comment></comment>\n  </item>\n",
            path = item.path,
            method = item.method,
            ext = if item.extension.is_empty() { "null" } else { item.extension },
            request = STANDARD.encode(item.request.as_bytes()),
        ));
    }
    xml.push_str("</items>\n");
    xml
}

pub fn write_export(dir: &Path, items: &[Item]) -> std::path::PathBuf {
    let path = dir.join("items.xml");
    std::fs::write(&path, burp_export(items)).unwrap();
    path
}

pub fn quiet_config(dir: &Path) -> ConfigParameter {
    let mut config = ConfigParameter::new();
    config.set_requests_dir(dir.join("requests"));
    config.set_outputs_dir(dir.join("outputs"));
    config.set_run_scanner(false);
    config.set_quiet(true);
    config
}
