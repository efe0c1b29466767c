// File: parser.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::{SiftError, SiftResult};
use crate::request::{Headers, ParsedRequest, Protocol, HTTP11_TOKEN, HTTP2_TOKEN};
use log::{debug, trace};
use std::borrow::Cow;

const MAX_HEADERS: usize = 128;

pub struct RequestParser;

impl RequestParser {
    /// Parses one raw HTTP/1.x request. A start line naming `HTTP/2` is
    /// downgraded first and the fact is kept in the request's protocol.
    pub fn parse(raw: &str) -> SiftResult<ParsedRequest> {
        let (text, downgraded) = downgrade_start_line(raw);
        let text = unfold_headers(&text);
        let bytes = text.as_bytes();

        let mut header_buf = [httparse::EMPTY_HEADER; MAX_HEADERS];
        let mut req = httparse::Request::new(&mut header_buf);

        let header_len = match req.parse(bytes)? {
            httparse::Status::Complete(len) => len,
            httparse::Status::Partial => {
                return Err(SiftError::Parse(
                    "incomplete request: missing blank line after headers".to_string(),
                ))
            }
        };

        let method = req
            .method
            .ok_or_else(|| SiftError::Parse("missing method".to_string()))?
            .to_string();
        let target = req
            .path
            .ok_or_else(|| SiftError::Parse("missing request target".to_string()))?
            .to_string();

        let protocol = match (req.version, downgraded) {
            (_, true) => Protocol::DowngradedFromHttp2,
            (Some(0), false) => Protocol::Http10,
            _ => Protocol::Http11,
        };

        let mut headers = Headers::new();
        for header in req.headers.iter() {
            let value = std::str::from_utf8(header.value).map_err(|_| {
                SiftError::Parse(format!("header {} is not valid text", header.name))
            })?;
            headers.push(header.name, value);
        }

        let remaining = &bytes[header_len..];
        let body = match declared_length(&headers)? {
            Some(len) if len < remaining.len() => {
                trace!("Body truncated to declared length {}", len);
                &remaining[..len]
            }
            _ => remaining,
        };

        debug!(
            "Parsed {} {} ({} headers, {} body bytes, {})",
            method,
            target,
            headers.len(),
            body.len(),
            protocol
        );

        Ok(ParsedRequest::new(
            method,
            target,
            headers,
            body.to_vec(),
            protocol,
        ))
    }
}

/// Rewrites an `HTTP/2` protocol token on the first line to `HTTP/1.1`.
/// Nothing past the first line is touched.
pub(crate) fn downgrade_start_line(raw: &str) -> (Cow<'_, str>, bool) {
    let line_end = raw.find('\n').unwrap_or(raw.len());
    let start_line = raw[..line_end].trim_end();
    let token_start = start_line
        .rfind(char::is_whitespace)
        .map_or(0, |pos| pos + 1);
    let token = &start_line[token_start..];

    if token_start == 0 || !token.starts_with(HTTP2_TOKEN) {
        return (Cow::Borrowed(raw), false);
    }

    let mut text = String::with_capacity(raw.len());
    text.push_str(&raw[..token_start]);
    text.push_str(HTTP11_TOKEN);
    text.push_str(&raw[start_line.len()..]);
    debug!("Downgraded start line protocol {}", token);
    (Cow::Owned(text), true)
}

/// Joins obs-fold continuation lines (a header line starting with a space or
/// tab) onto the previous header with a single space. httparse rejects them.
/// The start line and the body are never touched.
pub(crate) fn unfold_headers(raw: &str) -> Cow<'_, str> {
    let mut lines = raw.split_inclusive('\n');
    let Some(start_line) = lines.next() else {
        return Cow::Borrowed(raw);
    };

    let mut text = String::with_capacity(raw.len());
    text.push_str(start_line);
    let mut consumed = start_line.len();
    let mut folded = 0usize;
    let mut seen_header = false;

    for line in lines {
        if line.trim_end_matches(['\r', '\n']).is_empty() {
            break;
        }
        if seen_header && line.starts_with([' ', '\t']) {
            let kept = text.trim_end_matches(['\r', '\n']).len();
            text.truncate(kept);
            text.push(' ');
            text.push_str(line.trim_start_matches([' ', '\t']));
            folded += 1;
        } else {
            text.push_str(line);
            seen_header = true;
        }
        consumed += line.len();
    }

    if folded == 0 {
        return Cow::Borrowed(raw);
    }
    text.push_str(&raw[consumed..]);
    debug!("Unfolded {} continuation line(s)", folded);
    Cow::Owned(text)
}

fn declared_length(headers: &Headers) -> SiftResult<Option<usize>> {
    match headers.get("Content-Length") {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| SiftError::Parse(format!("invalid Content-Length {:?}", value))),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
