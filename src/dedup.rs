// File: dedup.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2025
// - Volker Schwaberow <volker@schwaberow.de>

use crate::error::SiftResult;
use crate::params::{ParameterExtractor, ParameterSet};
use crate::parser::RequestParser;
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

/// Anything that can hand out the raw text of a captured request.
pub trait Exchange {
    fn raw_request(&self) -> &str;
}

impl Exchange for String {
    fn raw_request(&self) -> &str {
        self
    }
}

impl Exchange for &str {
    fn raw_request(&self) -> &str {
        self
    }
}

/// SHA-256 over `method-path-name1,name2,...` with names sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; 32]);

impl Signature {
    pub fn compute(method: &str, path: &str, parameters: &ParameterSet) -> Self {
        let message = format!("{}-{}-{}", method, path, parameters.join(","));
        let digest = Sha256::digest(message.as_bytes());
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Signature(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Retained<E> {
    pub signature: Signature,
    pub parameters: ParameterSet,
    pub exchange: E,
}

/// First exchange per signature, in the order they were seen.
#[derive(Debug)]
pub struct DedupTable<E> {
    index: HashMap<Signature, usize>,
    entries: Vec<Retained<E>>,
}

impl<E> DedupTable<E> {
    pub fn new() -> Self {
        DedupTable {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Stores the entry unless its signature is already present. The stored
    /// entry is never replaced.
    pub fn insert_if_absent(&mut self, entry: Retained<E>) -> bool {
        if self.index.contains_key(&entry.signature) {
            return false;
        }
        self.index.insert(entry.signature, self.entries.len());
        self.entries.push(entry);
        true
    }

    pub fn get(&self, signature: &Signature) -> Option<&Retained<E>> {
        self.index.get(signature).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_retained(self) -> Vec<Retained<E>> {
        self.entries
    }
}

impl<E> Default for DedupTable<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Deduplicator;

impl Deduplicator {
    /// Keeps the first exchange of every (method, path, parameter names)
    /// shape. Any request that fails to parse aborts the batch.
    pub fn eliminate<E, I>(exchanges: I) -> SiftResult<Vec<Retained<E>>>
    where
        E: Exchange,
        I: IntoIterator<Item = E>,
    {
        let mut table = DedupTable::new();
        let mut seen = 0usize;

        for exchange in exchanges {
            seen += 1;
            let request = RequestParser::parse(exchange.raw_request())?;
            let parameters = ParameterExtractor::extract_from(&request);
            let signature = Signature::compute(request.method(), request.path(), &parameters);

            let kept = table.insert_if_absent(Retained {
                signature,
                parameters,
                exchange,
            });
            if !kept {
                debug!(
                    "Dropping duplicate {} {} ({})",
                    request.method(),
                    request.path(),
                    signature
                );
            }
        }

        info!("Kept {} of {} exchanges after de-duplication", table.len(), seen);
        Ok(table.into_retained())
    }
}

#[cfg(test)]
#[path = "dedup_tests.rs"]
mod tests;
