// File: form.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    NotUtf8,
    Semicolon(String),
    BadEscape(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUtf8 => write!(f, "form data is not valid UTF-8"),
            Self::Semicolon(segment) => {
                write!(f, "invalid semicolon separator in {:?}", segment)
            }
            Self::BadEscape(segment) => write!(f, "invalid percent escape in {:?}", segment),
        }
    }
}

impl std::error::Error for FormError {}

/// Ordered multi-map of `application/x-www-form-urlencoded` pairs.
///
/// Keys keep the order of their first appearance and every value stays
/// attached to its key in input order, so `a=1&b=2&a=3` iterates as
/// `a=1, a=3, b=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: Vec<(String, Vec<String>)>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a query string. Never fails; undecodable escapes are kept as
    /// literal text.
    pub fn parse_lenient(input: &str) -> Self {
        let mut map = Self::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            map.append(key.into_owned(), value.into_owned());
        }
        map
    }

    /// Decodes a form body, rejecting input that is not UTF-8, uses `;` as a
    /// separator or carries a malformed percent escape.
    pub fn parse_strict(input: &[u8]) -> Result<Self, FormError> {
        let text = std::str::from_utf8(input).map_err(|_| FormError::NotUtf8)?;

        for segment in text.split('&').filter(|s| !s.is_empty()) {
            if segment.contains(';') {
                return Err(FormError::Semicolon(segment.to_string()));
            }
            if !has_valid_escapes(segment) {
                return Err(FormError::BadEscape(segment.to_string()));
            }
        }

        Ok(Self::parse_lenient(text))
    }

    pub fn append(&mut self, key: String, value: String) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).and_then(|values| values.first().map(String::as_str))
    }

    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(|(_, values)| values.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn has_valid_escapes(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1..i + 3);
            match hex {
                Some(h) if h.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
