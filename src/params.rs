// File: params.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::form::ParamMap;
use crate::request::ParsedRequest;
use crate::sniffer::{ContentClassification, ContentSniffer};
use log::debug;
use serde_json::Value;
use std::collections::BTreeSet;

/// Parameter names of one request. Iterates in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    names: BTreeSet<String>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sorted names joined with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.iter().collect::<Vec<_>>().join(separator)
    }
}

impl<S: Into<String>> FromIterator<S> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = ParameterSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

pub struct ParameterExtractor;

impl ParameterExtractor {
    /// Sniffs the body when the method carries one, then extracts.
    pub fn extract_from(request: &ParsedRequest) -> ParameterSet {
        let classification = if request.carries_body() {
            ContentSniffer::classify(request.body())
        } else {
            ContentClassification::Unsupported
        };
        Self::extract(request, classification)
    }

    /// Query keys always; body keys only for POST, PUT and PATCH.
    pub fn extract(request: &ParsedRequest, classification: ContentClassification) -> ParameterSet {
        let mut set: ParameterSet = request.query_params().keys().collect();

        if request.carries_body() {
            match classification {
                ContentClassification::JsonObject => {
                    if let Ok(Value::Object(object)) =
                        serde_json::from_slice::<Value>(request.body())
                    {
                        for key in object.keys() {
                            set.insert(key.as_str());
                        }
                    }
                }
                ContentClassification::FormEncoded => {
                    if let Ok(form) = ParamMap::parse_strict(request.body()) {
                        for key in form.keys() {
                            set.insert(key);
                        }
                    }
                }
                ContentClassification::Unsupported => {}
            }
        }

        debug!(
            "{} {} has {} parameter(s): [{}]",
            request.method(),
            request.path(),
            set.len(),
            set.join(", ")
        );
        set
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
