//! Simulator capability surface, placement validation and scenario loading.
//!
//! The workspace never talks to a simulator directly. Everything here goes
//! through the [`SimBackend`] trait, so the same orchestration runs against a
//! real transport or the in-memory [`FlatWorld`].
//!
//! # Modules
//!
//! - [`backend`] -- [`SimBackend`] trait, [`ObjectKind`] and [`BackendError`].
//! - [`orchestrator`] -- the marker place / settle / check loop, scenario
//!   loading and running, and backend-assisted generation.
//! - [`flat_world`] -- [`FlatWorld`], flat terrain with box obstacles that
//!   records every call made to it.
//! - [`error`] -- [`PlacementError`].

pub mod backend;
pub mod error;
pub mod flat_world;
pub mod orchestrator;

pub use backend::{BackendError, DRONE_NAME, ObjectKind, SimBackend};
pub use error::PlacementError;
pub use flat_world::{Call, FlatWorld, Obstacle, WorldObject};
pub use orchestrator::{
    AcceptedMarker, LoadedScenario, PlacementReport, SpawnedActor, depth_spread,
    generate_scenario, load_scenario, marker_object_name, run_scenario, validate_scenario,
};
