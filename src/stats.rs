// File: stats.rs
// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2023-2025
// - Volker Schwaberow <volker@schwaberow.de>

use chrono::{DateTime, Utc};

/// Counters for one batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    total_exchanges: usize,
    retained: usize,
    excluded: usize,
    unparsable: usize,
    unmarked: usize,
    written: usize,
    injection_points: usize,
    start_time: u64,
    end_time: u64,
}

impl RunStats {
    pub fn new() -> RunStats {
        RunStats::default()
    }

    pub fn set_total_exchanges(&mut self, total: usize) {
        self.total_exchanges = total;
    }

    pub fn total_exchanges(&self) -> usize {
        self.total_exchanges
    }

    pub fn set_retained(&mut self, retained: usize) {
        self.retained = retained;
    }

    pub fn retained(&self) -> usize {
        self.retained
    }

    pub fn duplicates(&self) -> usize {
        self.total_exchanges.saturating_sub(self.retained)
    }

    pub fn add_excluded(&mut self) {
        self.excluded += 1;
    }

    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn add_unparsable(&mut self) {
        self.unparsable += 1;
    }

    pub fn unparsable(&self) -> usize {
        self.unparsable
    }

    pub fn add_unmarked(&mut self) {
        self.unmarked += 1;
    }

    pub fn unmarked(&self) -> usize {
        self.unmarked
    }

    pub fn add_written(&mut self, injection_points: usize) {
        self.written += 1;
        self.injection_points += injection_points;
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn injection_points(&self) -> usize {
        self.injection_points
    }

    pub fn start(&mut self) {
        self.start_time = now_millis();
    }

    pub fn finish(&mut self) {
        self.end_time = now_millis();
    }

    pub fn start_time(&self) -> u64 {
        self.start_time
    }

    pub fn end_time(&self) -> u64 {
        self.end_time
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.end_time.saturating_sub(self.start_time)
    }
}

fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

pub fn human_readable_time(millis: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
