// File: serializer.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::{SiftError, SiftResult};
use crate::request::{ParsedRequest, HTTP11_TOKEN, HTTP2_TOKEN};
use log::trace;

pub struct RequestSerializer;

impl RequestSerializer {
    pub fn serialize_bytes(request: &ParsedRequest) -> Vec<u8> {
        let mut out = Vec::with_capacity(request.body().len() + 256);

        let mut start_line = format!(
            "{} {} {}",
            request.method(),
            request.target(),
            request.protocol().parse_token()
        );
        if request.protocol().is_downgraded() {
            start_line = restore_start_line(&start_line);
        }
        out.extend_from_slice(start_line.as_bytes());
        out.extend_from_slice(b"\r\n");

        for (name, value) in request.headers().iter() {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(request.body());

        trace!("Serialized request to {} bytes", out.len());
        out
    }

    pub fn serialize(request: &ParsedRequest) -> SiftResult<String> {
        String::from_utf8(Self::serialize_bytes(request)).map_err(|e| {
            SiftError::Serialization(format!(
                "request for {} is not valid text: {}",
                request.target(),
                e
            ))
        })
    }
}

/// Puts `HTTP/2` back in place of the trailing `HTTP/1.1` token.
fn restore_start_line(start_line: &str) -> String {
    match start_line.strip_suffix(HTTP11_TOKEN) {
        Some(prefix) => format!("{}{}", prefix, HTTP2_TOKEN),
        None => start_line.to_string(),
    }
}

#[cfg(test)]
#[path = "serializer_tests.rs"]
mod tests;
