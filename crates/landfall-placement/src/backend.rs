//! The capability surface the placement code needs from a simulator.
//!
//! Nothing in the workspace talks to a real simulator. [`SimBackend`] is the
//! seam: a transport crate implements it against its RPC client, and tests
//! and the offline driver use [`FlatWorld`](crate::FlatWorld).

use landfall_components::Actor;
use landfall_types::{ActorKind, MarkerId, Pose};

/// Name of the drone vehicle in the world.
pub const DRONE_NAME: &str = "Copter";

/// Errors reported by a simulator backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The simulator could not be reached.
    #[error("simulator unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// No object with this name exists.
    #[error("no object named `{name}`")]
    UnknownObject {
        /// The requested object name.
        name: String,
    },

    /// The simulator refused an operation.
    #[error("simulator rejected {operation}: {message}")]
    Rejected {
        /// The operation that was refused.
        operation: &'static str,
        /// Description of the refusal.
        message: String,
    },
}

/// What the backend should create when an object does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    /// The drone itself; only ever moved, never spawned.
    Vehicle,
    /// An object built from the named blueprint.
    Blueprint(String),
}

impl ObjectKind {
    /// Blueprint for a marker of the given variant.
    pub fn marker(id: MarkerId) -> Self {
        Self::Blueprint(format!("bp_marker{id}"))
    }

    /// Blueprint for an actor.
    pub fn actor(actor: &Actor) -> Self {
        let blueprint = match actor.kind {
            ActorKind::Person => "bp_man",
            ActorKind::Bird => "bp_bird",
            ActorKind::Marker => "bp_marker0",
        };
        Self::Blueprint(blueprint.to_owned())
    }
}

/// Simulator operations used by placement and scenario loading.
///
/// Every call may suspend; every failure is reported as a [`BackendError`]
/// and is never retried by the caller.
#[allow(async_fn_in_trait)]
pub trait SimBackend {
    /// Move the object called `name` to `pose`, spawning it from `kind` if it
    /// does not exist. Returns whether the simulator accepted the request.
    async fn spawn_or_place(
        &mut self,
        name: &str,
        kind: &ObjectKind,
        pose: &Pose,
    ) -> Result<bool, BackendError>;

    /// Remove the object called `name`. Returns whether it existed.
    async fn remove_object(&mut self, name: &str) -> Result<bool, BackendError>;

    /// Current pose of the object called `name`.
    async fn query_pose(&mut self, name: &str) -> Result<Pose, BackendError>;

    /// Ground height (NED z) under the point `(x, y)`.
    async fn query_ground_height(&mut self, x: f64, y: f64) -> Result<f64, BackendError>;

    /// Apply weather intensities in channel order.
    async fn set_weather(&mut self, channels: [f64; 9]) -> Result<(), BackendError>;

    /// Set the wall-clock time of day.
    async fn set_time_of_day(&mut self, hour: u8, minute: u8) -> Result<(), BackendError>;

    /// Depth image rows looking straight down from `pose`.
    async fn query_depth_patch(&mut self, pose: &Pose) -> Result<Vec<Vec<f64>>, BackendError>;

    /// Command the object called `name` to travel to `pose` at `speed`.
    async fn move_to(&mut self, name: &str, pose: &Pose, speed: f64) -> Result<(), BackendError>;
}

#[cfg(test)]
mod tests {
    use landfall_types::{MoveMode, Position};

    use super::*;

    #[test]
    fn blueprints() {
        assert_eq!(
            ObjectKind::marker(MarkerId::TARGET),
            ObjectKind::Blueprint("bp_marker0".to_owned())
        );
        let bird = Actor::new(
            ActorKind::Bird,
            MoveMode::Loop,
            Pose::at(Position::ORIGIN),
            Pose::at(Position::ORIGIN),
            0.0,
        );
        assert_eq!(
            ObjectKind::actor(&bird),
            ObjectKind::Blueprint("bp_bird".to_owned())
        );
    }
}
