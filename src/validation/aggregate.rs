//! Aggregate state accumulated over a record stream.

use std::collections::{HashMap, HashSet};

use strum::IntoEnumIterator;

use super::classification::Classification;

/// Distinct client addresses per classification, plus every address seen.
///
/// Buckets only grow. An address that receives different outcomes across
/// records stays in every bucket it was ever assigned to, while `seen`
/// counts it once.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    seen: HashSet<String>,
    buckets: HashMap<Classification, HashSet<String>>,
    records: usize,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one classified occurrence of `ip`.
    pub fn record(&mut self, classification: Classification, ip: &str) {
        self.records += 1;
        self.seen.insert(ip.to_string());
        self.buckets
            .entry(classification)
            .or_default()
            .insert(ip.to_string());
    }

    /// Number of `record` calls so far.
    pub fn records_processed(&self) -> usize {
        self.records
    }

    /// Number of distinct addresses seen regardless of outcome.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn seen(&self) -> &HashSet<String> {
        &self.seen
    }

    /// The bucket for `classification`, if anything was ever assigned to it.
    pub fn bucket(&self, classification: Classification) -> Option<&HashSet<String>> {
        self.buckets.get(&classification)
    }

    pub fn bucket_len(&self, classification: Classification) -> usize {
        self.bucket(classification).map_or(0, HashSet::len)
    }

    /// Sum of the sizes of every error bucket.
    ///
    /// An address in two error buckets contributes twice.
    pub fn error_bucket_total(&self) -> usize {
        Classification::iter()
            .filter(Classification::is_error)
            .map(|c| self.bucket_len(c))
            .sum()
    }

    /// `seen − Σ error bucket sizes`.
    ///
    /// Negative when enough addresses carry more than one error outcome.
    pub fn error_free_by_subtraction(&self) -> i64 {
        self.seen_count() as i64 - self.error_bucket_total() as i64
    }

    /// Distinct addresses present in at least one bucket.
    pub fn covered_count(&self) -> usize {
        self.buckets
            .values()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct addresses present in more than one bucket.
    pub fn mixed_outcome_count(&self) -> usize {
        self.seen
            .iter()
            .filter(|ip| self.buckets.values().filter(|b| b.contains(*ip)).count() > 1)
            .count()
    }
}
