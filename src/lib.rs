// File: lib.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::new_without_default)]

pub mod capture;
pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod form;
pub mod marker;
pub mod params;
pub mod parser;
pub mod report;
pub mod request;
pub mod scanner;
pub mod serializer;
pub mod sniffer;
pub mod stats;

pub use dedup::{Deduplicator, Exchange, Retained, Signature};
pub use error::{SiftError, SiftResult};
pub use marker::{mark_all_injection_points, InjectionMarker, InjectionResult};
pub use request::{ParsedRequest, Protocol};

/// Keeps the first exchange of every (method, path, parameter names) shape.
pub fn eliminate<E, I>(exchanges: I) -> SiftResult<Vec<Retained<E>>>
where
    E: Exchange,
    I: IntoIterator<Item = E>,
{
    Deduplicator::eliminate(exchanges)
}
