//! Record classification.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//!
//! 1. no ground-truth entry for the address → [`Classification::MissingGroundTruth`]
//! 2. empty reported country → [`Classification::MissingReportedCountry`]
//! 3. resolved country ≠ reported country (exact, case-sensitive) →
//!    [`Classification::CountryMismatch`]
//! 4. otherwise [`Classification::NoError`]

use super::aggregate::AggregateState;
use super::classification::Classification;
use crate::error_handling::ResolveError;
use crate::geoip::{Resolution, Resolver};
use crate::records::Record;

/// A classification together with the ground truth it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub classification: Classification,
    /// `None` exactly when the classification is `MissingGroundTruth`.
    pub resolution: Option<Resolution>,
}

/// Resolves `record.client_ip` and applies the classification rules.
///
/// # Errors
///
/// Propagates resolver failures other than a missing entry.
pub fn evaluate<R: Resolver + ?Sized>(
    record: &Record,
    resolver: &R,
) -> Result<Outcome, ResolveError> {
    let Some(resolution) = resolver.resolve(&record.client_ip)? else {
        return Ok(Outcome {
            classification: Classification::MissingGroundTruth,
            resolution: None,
        });
    };

    let classification = if record.reported_country_code.is_empty() {
        Classification::MissingReportedCountry
    } else if resolution.country_code() != record.reported_country_code {
        Classification::CountryMismatch
    } else {
        Classification::NoError
    };

    Ok(Outcome {
        classification,
        resolution: Some(resolution),
    })
}

/// Classification only; see [`evaluate`].
pub fn classify<R: Resolver + ?Sized>(
    record: &Record,
    resolver: &R,
) -> Result<Classification, ResolveError> {
    evaluate(record, resolver).map(|outcome| outcome.classification)
}

/// Owns a resolver and the aggregate state for one run.
pub struct ValidationEngine<R> {
    resolver: R,
    state: AggregateState,
}

impl<R: Resolver> ValidationEngine<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            state: AggregateState::new(),
        }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Classifies `record` without touching the aggregate state.
    pub fn classify(&self, record: &Record) -> Result<Classification, ResolveError> {
        classify(record, &self.resolver)
    }

    /// Adds `record`'s address to the seen set and to `classification`'s bucket.
    pub fn record_ip(&mut self, record: &Record, classification: Classification) {
        self.state.record(classification, &record.client_ip);
    }

    /// Classifies `record` and records the result.
    ///
    /// On error the aggregate state is left unchanged.
    pub fn process(&mut self, record: &Record) -> Result<Outcome, ResolveError> {
        let outcome = evaluate(record, &self.resolver)?;
        self.record_ip(record, outcome.classification);
        log::trace!("{} -> {:?}", record.client_ip, outcome.classification);
        Ok(outcome)
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    pub fn into_state(self) -> AggregateState {
        self.state
    }
}
