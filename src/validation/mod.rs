//! Geolocation validation engine.
//!
//! Compares each record's reported country with the resolver's ground truth,
//! assigns exactly one [`Classification`], and accumulates distinct addresses
//! per classification in an [`AggregateState`].

mod aggregate;
mod classification;
mod engine;

// Re-export public API
pub use aggregate::AggregateState;
pub use classification::Classification;
pub use engine::{classify, evaluate, Outcome, ValidationEngine};
