//! Error handling.
//!
//! Typed errors for initialization, resolver lookups, and record validation.
//! The binary wraps these with `anyhow` context; the library returns them
//! directly so callers can match on the failing record or resource.

mod types;

// Re-export public API
pub use types::{InitializationError, ResolveError, ValidationError};
