//! Error types for the `landfall-scenario` crate.

use landfall_components::{DecodeError, DomainError};

/// Errors raised while building, decoding, or persisting a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// A component failed to decode.
    #[error("scenario decode failed: {source}")]
    Decode {
        /// The underlying decode error.
        #[from]
        source: DecodeError,
    },

    /// A genetic operator was misused.
    #[error("scenario operator failed: {source}")]
    Domain {
        /// The underlying operator error.
        #[from]
        source: DomainError,
    },

    /// Reading or writing a scenario file failed.
    #[error("scenario file I/O failed: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A scenario file is not valid JSON.
    #[error("scenario file is not valid JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Errors raised when the generator is given an unusable configuration.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// The sampling radius is not a positive finite number.
    #[error("sampling radius must be positive and finite, got {radius}")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// A sampling range is inverted or not finite.
    #[error("{axis} range [{min}, {max}] is empty or not finite")]
    InvalidRegion {
        /// Which axis the range covers.
        axis: &'static str,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// The drone clearance above ground is negative or not finite.
    #[error("drone clearance must be non-negative and finite, got {clearance}")]
    InvalidClearance {
        /// The rejected clearance.
        clearance: f64,
    },

    /// The fixed reach descent is not a positive finite number.
    #[error("reach descent must be positive and finite, got {descent}")]
    InvalidDescent {
        /// The rejected descent.
        descent: f64,
    },

    /// The shared weather ceiling is outside `[0, 1]`.
    #[error("weather ceiling must lie within [0, 1], got {max}")]
    InvalidWeatherCeiling {
        /// The rejected ceiling.
        max: f64,
    },
}
