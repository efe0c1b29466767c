// File: request.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::form::ParamMap;

pub const HTTP2_TOKEN: &str = "HTTP/2";
pub const HTTP11_TOKEN: &str = "HTTP/1.1";
pub const HTTP10_TOKEN: &str = "HTTP/1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http10,
    Http11,
    /// The start line said `HTTP/2` and was rewritten to `HTTP/1.1` for
    /// parsing. Serialization restores it.
    DowngradedFromHttp2,
}

impl Protocol {
    /// Token written on the start line before any restoration.
    pub fn parse_token(&self) -> &'static str {
        match self {
            Protocol::Http10 => HTTP10_TOKEN,
            Protocol::Http11 | Protocol::DowngradedFromHttp2 => HTTP11_TOKEN,
        }
    }

    pub fn is_downgraded(&self) -> bool {
        matches!(self, Protocol::DowngradedFromHttp2)
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Protocol::Http10 => write!(f, "{}", HTTP10_TOKEN),
            Protocol::Http11 => write!(f, "{}", HTTP11_TOKEN),
            Protocol::DowngradedFromHttp2 => write!(f, "downgraded-from-{}", HTTP2_TOKEN),
        }
    }
}

/// Header list that keeps the original order and casing of every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value whose name matches case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Replaces the value of every header called `name`, keeping position
    /// and casing. Returns false if no such header exists.
    pub fn set_existing(&mut self, name: &str, value: &str) -> bool {
        let mut found = false;
        for (n, v) in self.entries.iter_mut() {
            if n.eq_ignore_ascii_case(name) {
                *v = value.to_string();
                found = true;
            }
        }
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    method: String,
    target: String,
    headers: Headers,
    body: Vec<u8>,
    protocol: Protocol,
}

impl ParsedRequest {
    pub fn new(
        method: String,
        target: String,
        headers: Headers,
        body: Vec<u8>,
        protocol: Protocol,
    ) -> Self {
        ParsedRequest {
            method,
            target,
            headers,
            body,
            protocol,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request target as written on the start line, query included.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    pub fn raw_query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    pub fn query_params(&self) -> ParamMap {
        self.raw_query()
            .map(ParamMap::parse_lenient)
            .unwrap_or_default()
    }

    /// Swaps the query string verbatim; nothing is percent-encoded.
    pub fn set_query(&mut self, query: &str) {
        let path = self.path().to_string();
        self.target = if query.is_empty() {
            path
        } else {
            format!("{}?{}", path, query)
        };
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replaces the body and keeps an existing `Content-Length` in step.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.headers
            .set_existing("Content-Length", &body.len().to_string());
        self.body = body;
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// POST, PUT and PATCH are the methods whose body is inspected.
    pub fn carries_body(&self) -> bool {
        matches!(self.method.as_str(), "POST" | "PUT" | "PATCH")
    }
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
