//! Configuration loading and typed config structures for Landfall.
//!
//! The canonical configuration lives in `landfall-config.yaml` at the project
//! root. Every field has a default, so a partial (or empty) file is valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::scenario::{ACTOR_MUTATION_RATE, ActorGrowth, MutationPolicy, TargetMarkerCrossover};

/// Environment variable that overrides `engine.output_dir`.
pub const OUTPUT_DIR_ENV: &str = "LANDFALL_OUTPUT_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `landfall-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LandfallConfig {
    /// Scenario sampling parameters.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Variation operator parameters.
    #[serde(default)]
    pub mutation: MutationConfig,

    /// Placement validation parameters.
    #[serde(default)]
    pub placement: PlacementConfig,

    /// Driver parameters.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl LandfallConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `LANDFALL_OUTPUT_DIR` overrides `engine.output_dir` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.engine.apply_env_overrides();
        Ok(config)
    }
}

/// How the generator fills in the weather.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMode {
    /// One intensity drawn from `[0, weather_max]`, copied to every channel.
    #[default]
    Shared,
    /// Every channel at zero.
    Calm,
}

/// Scenario sampling parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeneratorConfig {
    /// Range the target marker's x is drawn from.
    #[serde(default = "default_x_range")]
    pub x_range: [f64; 2],

    /// Range the target marker's y is drawn from.
    #[serde(default = "default_y_range")]
    pub y_range: [f64; 2],

    /// Radius of the disk around the marker holding the reach pose and decoys.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Fixed height of the reach pose above ground. Drawn from `[5, 30]` when unset.
    #[serde(default)]
    pub descent: Option<f64>,

    /// Snap the drone start to this height above the ground at the origin.
    #[serde(default)]
    pub drone_clearance: Option<f64>,

    /// How weather is sampled.
    #[serde(default)]
    pub weather: WeatherMode,

    /// Ceiling for the shared weather intensity.
    #[serde(default = "default_weather_max")]
    pub weather_max: f64,

    /// Decoy markers per scenario.
    #[serde(default)]
    pub decoy_count: usize,

    /// Actors per scenario.
    #[serde(default)]
    pub actor_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            x_range: default_x_range(),
            y_range: default_y_range(),
            radius: default_radius(),
            descent: None,
            drone_clearance: None,
            weather: WeatherMode::Shared,
            weather_max: default_weather_max(),
            decoy_count: 0,
            actor_count: 0,
        }
    }
}

/// Variation operator parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MutationConfig {
    /// Per-trigger mutation probability applied to offspring.
    #[serde(default = "default_mutation_rate")]
    pub rate: f64,

    /// What happens when structural mutation asks for more actors.
    #[serde(default)]
    pub actor_growth: ActorGrowth,

    /// Rate applied to actors that survive a structural mutation.
    #[serde(default = "default_actor_mutation_rate")]
    pub actor_rate: f64,

    /// How the target marker is recombined.
    #[serde(default)]
    pub target_marker: TargetMarkerCrossover,
}

impl MutationConfig {
    /// The policy handed to [`Scenario::mutate_with`](crate::Scenario::mutate_with).
    pub const fn policy(&self) -> MutationPolicy {
        MutationPolicy {
            actor_growth: self.actor_growth,
            actor_rate: self.actor_rate,
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            rate: default_mutation_rate(),
            actor_growth: ActorGrowth::Keep,
            actor_rate: default_actor_mutation_rate(),
            target_marker: TargetMarkerCrossover::SelfCross,
        }
    }
}

/// Placement validation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PlacementConfig {
    /// Attempts per marker before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Milliseconds to let physics settle after each placement.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Largest accepted gap between a marker and the ground under it.
    #[serde(default = "default_height_threshold")]
    pub height_threshold: f64,

    /// Mutation rate applied to a marker that failed to settle.
    #[serde(default = "default_placement_mutation_rate")]
    pub mutation_rate: f64,

    /// Smallest accepted horizontal gap between a decoy and any accepted marker.
    #[serde(default = "default_decoy_separation")]
    pub decoy_separation: f64,

    /// Largest accepted depth spread under a marker. Unchecked when unset.
    #[serde(default)]
    pub flatness_tolerance: Option<f64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            settle_ms: default_settle_ms(),
            height_threshold: default_height_threshold(),
            mutation_rate: default_placement_mutation_rate(),
            decoy_separation: default_decoy_separation(),
            flatness_tolerance: None,
        }
    }
}

/// Driver parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Seed for every random draw the driver makes.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Scenarios in the population.
    #[serde(default = "default_population_size")]
    pub population_size: usize,

    /// Variation rounds to run.
    #[serde(default = "default_generations")]
    pub generations: u32,

    /// Directory scenario files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl EngineConfig {
    /// Override values from environment variables.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(val);
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            population_size: default_population_size(),
            generations: default_generations(),
            output_dir: default_output_dir(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_x_range() -> [f64; 2] {
    [-30.0, 30.0]
}

const fn default_y_range() -> [f64; 2] {
    [-30.0, 30.0]
}

const fn default_radius() -> f64 {
    10.0
}

const fn default_weather_max() -> f64 {
    0.2
}

const fn default_mutation_rate() -> f64 {
    0.3
}

const fn default_actor_mutation_rate() -> f64 {
    ACTOR_MUTATION_RATE
}

const fn default_max_attempts() -> u32 {
    20
}

const fn default_settle_ms() -> u64 {
    3000
}

const fn default_height_threshold() -> f64 {
    1.0
}

const fn default_placement_mutation_rate() -> f64 {
    0.3
}

const fn default_decoy_separation() -> f64 {
    2.0
}

const fn default_seed() -> u64 {
    42
}

const fn default_population_size() -> usize {
    8
}

const fn default_generations() -> u32 {
    5
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("scenarios")
}
