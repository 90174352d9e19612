//! Shared type definitions for the Landfall scenario engine.
//!
//! Every crate in the workspace speaks in these types: the pose primitive
//! embedded by all spatial components, the discrete actor enumerations, and
//! the validated marker identifier.
//!
//! # Modules
//!
//! - [`pose`] -- [`Position`], [`Orientation`] and [`Pose`] in the simulator's
//!   NED frame (z grows downward).
//! - [`enums`] -- [`ActorKind`] and [`MoveMode`] with their stable names and
//!   positional indices.
//! - [`ids`] -- [`MarkerId`], restricted to the marker variants the world ships.

pub mod enums;
pub mod ids;
pub mod pose;

// Re-export all public types at crate root for convenience.
pub use enums::{ActorKind, MoveMode, UnknownName};
pub use ids::{InvalidMarkerId, MarkerId};
pub use pose::{Orientation, Pose, Position};
