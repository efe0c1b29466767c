// File: capture.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::dedup::Exchange;
use crate::error::{SiftError, SiftResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// One lexical unit of the export. Comments, processing instructions and the
/// DOCTYPE match without a named group and are skipped. CDATA is matched
/// first so markup inside a section is never taken for a tag.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?s)<!\[CDATA\[(?P<cdata>.*?)\]\]>",
        r"|<!--.*?-->",
        r"|<\?.*?\?>",
        r"|<!DOCTYPE(?:[^\[>]|\[.*?\])*>",
        r"|<![A-Za-z][^>]*>",
        r"|</(?P<end>[A-Za-z_][\w.:-]*)\s*>",
        r#"|<(?P<start>[A-Za-z_][\w.:-]*)(?P<attrs>(?:\s+[^\s=/>]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(?P<empty>/?)>"#,
    ))
    .unwrap()
});

static ATTR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_][\w.:-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x[0-9a-fA-F]+|#[0-9]+|lt|gt|amp|quot|apos);").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Base64,
}

/// Request payload as stored in the export, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureBody {
    Raw(String),
    Encoded { encoding: BodyEncoding, text: String },
}

impl CaptureBody {
    pub fn resolve(self) -> SiftResult<String> {
        match self {
            CaptureBody::Raw(text) => Ok(text),
            CaptureBody::Encoded {
                encoding: BodyEncoding::Base64,
                text,
            } => {
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                let bytes = STANDARD.decode(compact)?;
                match String::from_utf8(bytes) {
                    Ok(decoded) => Ok(decoded),
                    Err(e) => {
                        warn!("Request payload is not UTF-8, replacing invalid bytes");
                        Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CapturedExchange {
    pub time: String,
    pub url: String,
    pub host: String,
    pub host_ip: Option<String>,
    pub port: u16,
    pub protocol: String,
    pub method: String,
    pub path: String,
    pub extension: String,
    #[serde(skip)]
    pub request: String,
    pub status: u16,
    pub response_length: u64,
    pub mime_type: String,
    pub comment: String,
}

impl Exchange for CapturedExchange {
    fn raw_request(&self) -> &str {
        &self.request
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaptureFile {
    pub burp_version: Option<String>,
    pub export_time: Option<String>,
    pub items: Vec<CapturedExchange>,
}

/// Child element of an `<item>`. Text arrives in pieces; CDATA pieces are
/// flagged so whitespace around them can be dropped.
struct Element {
    attrs: HashMap<String, String>,
    parts: Vec<(bool, String)>,
}

impl Element {
    fn new(attrs: HashMap<String, String>) -> Self {
        Element {
            attrs,
            parts: Vec::new(),
        }
    }

    /// Consecutive CDATA sections are joined, which undoes the
    /// `]]]]><![CDATA[>` split Burp writes for a literal `]]>`.
    fn into_text(self) -> String {
        let has_cdata = self.parts.iter().any(|(cdata, _)| *cdata);
        self.parts
            .into_iter()
            .filter(|(cdata, text)| *cdata || !has_cdata || !text.trim().is_empty())
            .map(|(_, text)| text)
            .collect()
    }
}

/// Tracks the open elements while the token stream is read. Only
/// `<items>/<item>/<field>` is collected, deeper markup is ignored.
#[derive(Default)]
struct Walker<'a> {
    stack: Vec<&'a str>,
    root_attrs: Option<HashMap<String, String>>,
    item: Option<HashMap<String, Element>>,
    field: Option<(&'a str, Element)>,
    items: Vec<CapturedExchange>,
}

impl<'a> Walker<'a> {
    fn open(&mut self, name: &'a str, attrs: &str) {
        match self.stack.len() {
            0 if name == "items" => self.root_attrs = Some(parse_attrs(attrs)),
            1 if name == "item" && self.stack.first() == Some(&"items") => {
                self.item = Some(HashMap::new())
            }
            2 if self.item.is_some() => self.field = Some((name, Element::new(parse_attrs(attrs)))),
            _ => {}
        }
        self.stack.push(name);
    }

    fn close(&mut self, name: &str) -> SiftResult<()> {
        match self.stack.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(SiftError::Capture(format!(
                    "</{}> does not close <{}>",
                    name, open
                )))
            }
            None => return Err(SiftError::Capture(format!("unexpected </{}>", name))),
        }

        match self.stack.len() {
            2 => {
                if let (Some(item), Some((tag, element))) = (self.item.as_mut(), self.field.take())
                {
                    item.entry(tag.to_string()).or_insert(element);
                }
            }
            1 => {
                if let Some(fields) = self.item.take() {
                    let index = self.items.len() + 1;
                    self.items.push(decode_item(index, fields)?);
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, raw: &str) {
        if let Some((_, element)) = self.field.as_mut() {
            if !raw.is_empty() {
                element.parts.push((false, unescape(raw)));
            }
        }
    }

    fn cdata(&mut self, raw: &str) {
        if let Some((_, element)) = self.field.as_mut() {
            element.parts.push((true, raw.to_string()));
        }
    }

    fn finish(self) -> SiftResult<CaptureFile> {
        if let Some(open) = self.stack.last() {
            return Err(SiftError::Capture(format!("unclosed <{}>", open)));
        }
        let root_attrs = self.root_attrs.ok_or_else(|| {
            SiftError::Capture("no <items> element, not a Burp export".to_string())
        })?;

        info!("Decoded {} captured exchange(s)", self.items.len());
        Ok(CaptureFile {
            burp_version: root_attrs.get("burpVersion").cloned(),
            export_time: root_attrs.get("exportTime").cloned(),
            items: self.items,
        })
    }
}

pub struct CaptureDecoder;

impl CaptureDecoder {
    pub fn decode_file(path: &Path) -> SiftResult<CaptureFile> {
        let xml = std::fs::read_to_string(path)?;
        debug!("Read {} bytes from {}", xml.len(), path.display());
        Self::decode_str(&xml)
    }

    /// Reads a Burp Suite "Save items" XML export.
    pub fn decode_str(xml: &str) -> SiftResult<CaptureFile> {
        let mut walker = Walker::default();
        let mut last = 0;

        for caps in TOKEN_PATTERN.captures_iter(xml) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            walker.text(&xml[last..token.start()]);
            last = token.end();

            if let Some(cdata) = caps.name("cdata") {
                walker.cdata(cdata.as_str());
            } else if let Some(end) = caps.name("end") {
                walker.close(end.as_str())?;
            } else if let Some(start) = caps.name("start") {
                let name = start.as_str();
                walker.open(name, caps.name("attrs").map_or("", |m| m.as_str()));
                if caps.name("empty").is_some_and(|m| !m.as_str().is_empty()) {
                    walker.close(name)?;
                }
            }
        }
        walker.text(&xml[last..]);

        walker.finish()
    }
}

fn decode_item(index: usize, mut fields: HashMap<String, Element>) -> SiftResult<CapturedExchange> {
    let method = fields
        .remove("method")
        .map(Element::into_text)
        .unwrap_or_default();
    if method.is_empty() {
        return Err(SiftError::Capture(format!("item {} has no <method>", index)));
    }

    let request = fields
        .remove("request")
        .ok_or_else(|| SiftError::Capture(format!("item {} has no <request>", index)))?;
    let payload = if request.attrs.get("base64").map(String::as_str) == Some("true") {
        CaptureBody::Encoded {
            encoding: BodyEncoding::Base64,
            text: request.into_text(),
        }
    } else {
        CaptureBody::Raw(request.into_text())
    };

    let host = fields.remove("host");
    let host_ip = host.as_ref().and_then(|h| h.attrs.get("ip").cloned());
    let host = host.map(Element::into_text).unwrap_or_default();

    let mut text = |tag: &str| fields.remove(tag).map(Element::into_text).unwrap_or_default();
    Ok(CapturedExchange {
        time: text("time"),
        url: text("url"),
        host,
        host_ip,
        port: text("port").trim().parse().unwrap_or(0),
        protocol: text("protocol"),
        method,
        path: text("path"),
        extension: text("extension"),
        request: payload.resolve()?,
        status: text("status").trim().parse().unwrap_or(0),
        response_length: text("responselength").trim().parse().unwrap_or(0),
        mime_type: text("mimetype"),
        comment: text("comment"),
    })
}

fn parse_attrs(raw: &str) -> HashMap<String, String> {
    ATTR_PATTERN
        .captures_iter(raw)
        .map(|c| {
            let value = c.get(2).or_else(|| c.get(3)).map_or("", |m| m.as_str());
            (c[1].to_string(), unescape(value))
        })
        .collect()
}

fn unescape(text: &str) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures| match &caps[1] {
            "lt" => "<".to_string(),
            "gt" => ">".to_string(),
            "amp" => "&".to_string(),
            "quot" => "\"".to_string(),
            "apos" => "'".to_string(),
            numeric => {
                let code = match numeric.strip_prefix("#x") {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => numeric[1..].parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_else(|| caps[0].to_string())
            }
        })
        .into_owned()
}

#[cfg(test)]
#[path = "capture_tests.rs"]
mod tests;
