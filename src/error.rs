// File: error.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use std::fmt;

#[derive(Debug)]
pub enum SiftError {
    Parse(String),
    Encode(serde_json::Error),
    Serialization(String),
    Capture(String),
    Io(std::io::Error),
    Scanner(String),
}

impl SiftError {
    /// True when the request text itself could not be read as HTTP.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl fmt::Display for SiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Encode(e) => write!(f, "Encode error: {}", e),
            Self::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            Self::Capture(msg) => write!(f, "Capture error: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Scanner(msg) => write!(f, "Scanner error: {}", msg),
        }
    }
}

impl std::error::Error for SiftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(_) => None,
            Self::Encode(e) => Some(e),
            Self::Serialization(_) => None,
            Self::Capture(_) => None,
            Self::Io(e) => Some(e),
            Self::Scanner(_) => None,
        }
    }
}

impl From<serde_json::Error> for SiftError {
    fn from(error: serde_json::Error) -> Self {
        Self::Encode(error)
    }
}

impl From<std::io::Error> for SiftError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<base64::DecodeError> for SiftError {
    fn from(error: base64::DecodeError) -> Self {
        Self::Capture(format!("invalid base64 payload: {}", error))
    }
}

impl From<httparse::Error> for SiftError {
    fn from(error: httparse::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

pub type SiftResult<T> = Result<T, SiftError>;
