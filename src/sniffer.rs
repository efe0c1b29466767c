// File: sniffer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::form::ParamMap;
use log::trace;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClassification {
    JsonObject,
    FormEncoded,
    Unsupported,
}

impl std::fmt::Display for ContentClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentClassification::JsonObject => write!(f, "JSON-object"),
            ContentClassification::FormEncoded => write!(f, "form-encoded"),
            ContentClassification::Unsupported => write!(f, "unsupported"),
        }
    }
}

pub struct ContentSniffer;

impl ContentSniffer {
    /// Classifies a body from its bytes alone; `Content-Type` is never
    /// consulted.
    ///
    /// JSON is tried before form data. The form decoder accepts almost any
    /// text, so running it first would swallow every JSON body.
    pub fn classify(body: &[u8]) -> ContentClassification {
        let classification = if Self::is_json_object(body) {
            ContentClassification::JsonObject
        } else if ParamMap::parse_strict(body).is_ok() {
            ContentClassification::FormEncoded
        } else {
            ContentClassification::Unsupported
        };

        trace!("Classified {} body bytes as {}", body.len(), classification);
        classification
    }

    fn is_json_object(body: &[u8]) -> bool {
        matches!(serde_json::from_slice::<Value>(body), Ok(Value::Object(_)))
    }
}
