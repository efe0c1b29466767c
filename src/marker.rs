// File: marker.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::{SiftError, SiftResult};
use crate::form::ParamMap;
use crate::parser::RequestParser;
use crate::request::ParsedRequest;
use crate::serializer::RequestSerializer;
use crate::sniffer::{ContentClassification, ContentSniffer};
use log::{debug, trace};
use serde_json::Value;

pub const DEFAULT_MARKER: char = '*';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionResult {
    pub count: usize,
    pub text: String,
}

impl InjectionResult {
    pub fn has_injection_points(&self) -> bool {
        self.count > 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InjectionMarker {
    marker: char,
}

impl Default for InjectionMarker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl InjectionMarker {
    pub fn new(marker: char) -> Self {
        InjectionMarker { marker }
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    /// Parses, marks and re-serializes one request.
    ///
    /// Unparsable text is reported as [`SiftError::Parse`] so the caller can
    /// tell it apart from a request with nothing to mark.
    pub fn mark_all(&self, raw: &str) -> SiftResult<InjectionResult> {
        let mut request = RequestParser::parse(raw)?;
        let count = self.mark_request(&mut request)?;
        let text = RequestSerializer::serialize(&request)?;

        debug!(
            "Marked {} injection point(s) in {} {}",
            count,
            request.method(),
            request.path()
        );
        Ok(InjectionResult { count, text })
    }

    /// Marks the query always and the body for POST, PUT and PATCH.
    pub fn mark_request(&self, request: &mut ParsedRequest) -> SiftResult<usize> {
        let mut count = self.mark_query(request);

        if request.carries_body() {
            count += match ContentSniffer::classify(request.body()) {
                ContentClassification::JsonObject => self.mark_json_body(request)?,
                ContentClassification::FormEncoded => self.mark_form_body(request)?,
                ContentClassification::Unsupported => {
                    trace!("Leaving unsupported body of {} untouched", request.path());
                    0
                }
            };
        }

        Ok(count)
    }

    /// One marked pair per query value; values are written back undecoded.
    pub fn mark_query(&self, request: &mut ParsedRequest) -> usize {
        let params = request.query_params();
        if params.is_empty() {
            return 0;
        }

        let marked: Vec<String> = params
            .pairs()
            .map(|(key, value)| format!("{}={}{}", key, value, self.marker))
            .collect();
        request.set_query(&marked.join("&"));
        marked.len()
    }

    /// Appends the marker to every top-level string value.
    pub fn mark_json_body(&self, request: &mut ParsedRequest) -> SiftResult<usize> {
        let mut value: Value = serde_json::from_slice(request.body())
            .map_err(|e| SiftError::Parse(format!("JSON body: {}", e)))?;

        let Some(object) = value.as_object_mut() else {
            return Ok(0);
        };

        let mut count = 0;
        for field in object.values_mut() {
            if let Value::String(text) = field {
                text.push(self.marker);
                count += 1;
            }
        }

        let body = serde_json::to_vec(&value)?;
        request.set_body(body);
        Ok(count)
    }

    /// Marks the first value of each distinct key. Repeated values of a key
    /// are not written back.
    pub fn mark_form_body(&self, request: &mut ParsedRequest) -> SiftResult<usize> {
        let form = ParamMap::parse_strict(request.body())
            .map_err(|e| SiftError::Parse(format!("form body: {}", e)))?;
        if form.is_empty() {
            return Ok(0);
        }

        let marked: Vec<String> = form
            .keys()
            .map(|key| {
                format!(
                    "{}={}{}",
                    key,
                    form.first(key).unwrap_or_default(),
                    self.marker
                )
            })
            .collect();
        request.set_body(marked.join("&").into_bytes());
        Ok(marked.len())
    }
}

/// Marks a single request with the default `*` marker.
pub fn mark_all_injection_points(raw: &str) -> SiftResult<InjectionResult> {
    InjectionMarker::default().mark_all(raw)
}

#[cfg(test)]
#[path = "marker_tests.rs"]
mod tests;
