//! Scenario components for the Landfall engine.
//!
//! Every element of a scenario (poses, markers, weather, time of day and
//! actors) implements the [`Component`] contract: a lossless flat vector for
//! genetic search, a named-key JSON record for storage, and the mutation and
//! crossover operators that keep values inside their legal domains.
//!
//! # Modules
//!
//! - [`component`] -- the [`Component`] trait and the shared single-point
//!   crossover.
//! - [`pose`] -- [`Pose`](landfall_types::Pose) as a component.
//! - [`marker`] -- [`Marker`]: target and decoy markers.
//! - [`weather`] -- [`Weather`]: nine intensity channels.
//! - [`time_of_day`] -- [`TimeOfDay`]: hour and minute fractions.
//! - [`actor`] -- [`Actor`]: people, birds and movable markers.
//! - [`error`] -- [`DecodeError`] and [`DomainError`].

pub mod actor;
pub mod component;
pub mod error;
pub mod marker;
pub mod pose;
pub mod time_of_day;
pub mod weather;

pub use actor::Actor;
pub use component::{Component, check_rate, fires, split_point_crossover};
pub use error::{DecodeError, DomainError};
pub use marker::Marker;
pub use pose::nudge_position;
pub use time_of_day::TimeOfDay;
pub use weather::{CHANNEL_NAMES, Weather};
