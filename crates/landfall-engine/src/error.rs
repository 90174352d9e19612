//! Error types for the driver binary.
//!
//! [`EngineError`] wraps every failure mode of a run so `main` can propagate
//! with `?`.

/// Top-level error for the driver binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: landfall_scenario::ConfigError,
    },

    /// The generator rejected its configuration.
    #[error("generator error: {source}")]
    Generator {
        /// The underlying generator error.
        #[from]
        source: landfall_scenario::GeneratorError,
    },

    /// A variation operator failed.
    #[error("variation error: {source}")]
    Domain {
        /// The underlying operator error.
        #[from]
        source: landfall_components::DomainError,
    },

    /// Placement, loading or running against the world failed.
    #[error("placement error: {source}")]
    Placement {
        /// The underlying placement error.
        #[from]
        source: landfall_placement::PlacementError,
    },

    /// Writing a scenario file failed.
    #[error("scenario error: {source}")]
    Scenario {
        /// The underlying scenario error.
        #[from]
        source: landfall_scenario::ScenarioError,
    },

    /// Creating the output directory or writing the manifest failed.
    #[error("output I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The manifest could not be serialized.
    #[error("manifest serialization failed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// No scenario in a population slot could be placed.
    #[error("population slot {slot} could not be placed after {draws} draws")]
    Exhausted {
        /// Index of the slot.
        slot: usize,
        /// Scenarios drawn for it.
        draws: u32,
    },
}
