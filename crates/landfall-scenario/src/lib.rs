//! Scenario aggregate, generator and configuration for the Landfall engine.
//!
//! # Modules
//!
//! - [`scenario`] -- [`Scenario`] with its record and vector forms and the
//!   whole-scenario mutation and crossover operators.
//! - [`generator`] -- [`ScenarioGenerator`], turning sampled ground heights
//!   into random scenarios.
//! - [`geometry`] -- disk sampling, planar distance and yaw helpers.
//! - [`config`] -- [`LandfallConfig`], loaded from `landfall-config.yaml`.
//! - [`error`] -- [`ScenarioError`] and [`GeneratorError`].

pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod scenario;

pub use config::{
    ConfigError, EngineConfig, GeneratorConfig, LandfallConfig, MutationConfig, PlacementConfig,
    WeatherMode,
};
pub use error::{GeneratorError, ScenarioError};
pub use generator::{ScenarioGenerator, Site, sample_actor, sample_decoy};
pub use scenario::{
    ACTOR_MUTATION_RATE, ActorGrowth, MutationPolicy, Scenario, ScenarioVectors,
    TargetMarkerCrossover,
};
