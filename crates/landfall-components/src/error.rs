//! Error types for the `landfall-components` crate.
//!
//! Decoding failures ([`DecodeError`]) and operator misuse ([`DomainError`])
//! are kept apart: the first means the input data is bad, the second means
//! the caller asked for something the operators cannot do.

use landfall_types::UnknownName;

/// Errors raised while decoding a component from a vector or a record.
///
/// Decoding builds a fresh value; nothing is modified when it fails.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The vector does not have the component's fixed length.
    #[error("{component} vector must hold {expected} values, got {actual}")]
    LengthMismatch {
        /// Component being decoded.
        component: &'static str,
        /// Required length.
        expected: usize,
        /// Length received.
        actual: usize,
    },

    /// The record is missing a key or has a value of the wrong shape.
    #[error("malformed {component} record: {source}")]
    Record {
        /// Component being decoded.
        component: &'static str,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },

    /// A field decoded but lies outside the component's domain.
    #[error("{component}.{field} = {value} is out of domain: expected {expected}")]
    OutOfDomain {
        /// Component being decoded.
        component: &'static str,
        /// Offending field.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Description of the legal domain.
        expected: &'static str,
    },

    /// A categorical field names no known variant.
    #[error("{component} record: {source}")]
    UnknownName {
        /// Component being decoded.
        component: &'static str,
        /// The parse failure.
        source: UnknownName,
    },
}

/// Errors raised when a genetic operator is misused.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// A crossover parent encoded to an empty vector.
    #[error("cannot cross over empty {component} vectors")]
    EmptyVector {
        /// Component being recombined.
        component: &'static str,
    },

    /// The two crossover parents encode to different lengths.
    #[error("cannot cross over {component} vectors of lengths {left} and {right}")]
    LengthMismatch {
        /// Component being recombined.
        component: &'static str,
        /// Length of the first parent's vector.
        left: usize,
        /// Length of the second parent's vector.
        right: usize,
    },

    /// The mutation rate is not a probability.
    #[error("mutation rate {rate} is not within [0, 1]")]
    InvalidRate {
        /// The rejected rate.
        rate: f64,
    },

    /// A recombined vector failed to decode back into a component.
    #[error("recombined {component} vector did not decode: {source}")]
    Recombination {
        /// Component being recombined.
        component: &'static str,
        /// The decoding failure.
        source: DecodeError,
    },
}
