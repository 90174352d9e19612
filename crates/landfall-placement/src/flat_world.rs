//! An in-memory backend with flat terrain and box obstacles.
//!
//! Markers dropped into the world settle onto whatever surface is under
//! them: the ground, or the top of an obstacle. Everything else stays where
//! it is put. Every call is recorded so tests can check what was asked of
//! the world and in which order.

use std::collections::{BTreeMap, BTreeSet};

use landfall_types::{Pose, Position};

use crate::backend::{BackendError, ObjectKind, SimBackend};

/// Half-width, in world units, of the square sampled by a depth query.
pub const DEPTH_PATCH_HALF_WIDTH: f64 = 1.0;

/// Samples per side of a depth patch.
pub const DEPTH_PATCH_SIZE: usize = 3;

/// An axis-aligned box standing on the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    /// Lower x bound.
    pub x_min: f64,
    /// Upper x bound.
    pub x_max: f64,
    /// Lower y bound.
    pub y_min: f64,
    /// Upper y bound.
    pub y_max: f64,
    /// How far the top sits above the ground.
    pub height: f64,
}

impl Obstacle {
    fn covers(&self, x: f64, y: f64) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

/// One object known to the world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    /// How the object was created.
    pub kind: ObjectKind,
    /// Where it is now.
    pub pose: Pose,
}

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `spawn_or_place` for the named object.
    Place(String),
    /// `remove_object` for the named object.
    Remove(String),
    /// `query_pose` for the named object.
    QueryPose(String),
    /// `query_ground_height` at a point.
    GroundHeight(f64, f64),
    /// `set_weather`.
    Weather([f64; 9]),
    /// `set_time_of_day`.
    Time(u8, u8),
    /// `query_depth_patch`.
    Depth,
    /// `move_to` for the named object.
    MoveTo(String, Pose, f64),
}

/// Flat terrain at a fixed height, optionally dotted with obstacles.
#[derive(Debug, Clone, Default)]
pub struct FlatWorld {
    ground_z: f64,
    obstacles: Vec<Obstacle>,
    objects: BTreeMap<String, WorldObject>,
    refused: BTreeSet<String>,
    weather: Option<[f64; 9]>,
    time: Option<(u8, u8)>,
    calls: Vec<Call>,
}

impl FlatWorld {
    /// An empty world whose ground sits at `ground_z`.
    pub fn new(ground_z: f64) -> Self {
        Self {
            ground_z,
            ..Self::default()
        }
    }

    /// Add an obstacle.
    #[must_use]
    pub fn with_obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    /// Make every `spawn_or_place` for `name` report failure.
    #[must_use]
    pub fn refusing(mut self, name: &str) -> Self {
        self.refused.insert(name.to_owned());
        self
    }

    /// Height of whatever surface is under `(x, y)`.
    pub fn surface_z(&self, x: f64, y: f64) -> f64 {
        self.obstacles
            .iter()
            .filter(|o| o.covers(x, y))
            .map(|o| self.ground_z - o.height)
            .fold(self.ground_z, f64::min)
    }

    /// The object called `name`, if it exists.
    pub fn object(&self, name: &str) -> Option<&WorldObject> {
        self.objects.get(name)
    }

    /// Every object, by name.
    pub const fn objects(&self) -> &BTreeMap<String, WorldObject> {
        &self.objects
    }

    /// The last weather applied.
    pub const fn weather(&self) -> Option<[f64; 9]> {
        self.weather
    }

    /// The last time of day applied.
    pub const fn time_of_day(&self) -> Option<(u8, u8)> {
        self.time
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    fn settles(kind: &ObjectKind) -> bool {
        matches!(kind, ObjectKind::Blueprint(bp) if bp.starts_with("bp_marker"))
    }
}

impl SimBackend for FlatWorld {
    async fn spawn_or_place(
        &mut self,
        name: &str,
        kind: &ObjectKind,
        pose: &Pose,
    ) -> Result<bool, BackendError> {
        self.calls.push(Call::Place(name.to_owned()));
        if self.refused.contains(name) {
            return Ok(false);
        }
        let mut pose = *pose;
        if Self::settles(kind) {
            pose.position.z = self.surface_z(pose.position.x, pose.position.y);
        }
        self.objects.insert(
            name.to_owned(),
            WorldObject {
                kind: kind.clone(),
                pose,
            },
        );
        Ok(true)
    }

    async fn remove_object(&mut self, name: &str) -> Result<bool, BackendError> {
        self.calls.push(Call::Remove(name.to_owned()));
        Ok(self.objects.remove(name).is_some())
    }

    async fn query_pose(&mut self, name: &str) -> Result<Pose, BackendError> {
        self.calls.push(Call::QueryPose(name.to_owned()));
        self.objects
            .get(name)
            .map(|o| o.pose)
            .ok_or_else(|| BackendError::UnknownObject {
                name: name.to_owned(),
            })
    }

    async fn query_ground_height(&mut self, x: f64, y: f64) -> Result<f64, BackendError> {
        self.calls.push(Call::GroundHeight(x, y));
        Ok(self.ground_z)
    }

    async fn set_weather(&mut self, channels: [f64; 9]) -> Result<(), BackendError> {
        self.calls.push(Call::Weather(channels));
        self.weather = Some(channels);
        Ok(())
    }

    async fn set_time_of_day(&mut self, hour: u8, minute: u8) -> Result<(), BackendError> {
        self.calls.push(Call::Time(hour, minute));
        self.time = Some((hour, minute));
        Ok(())
    }

    async fn query_depth_patch(&mut self, pose: &Pose) -> Result<Vec<Vec<f64>>, BackendError> {
        self.calls.push(Call::Depth);
        let Position { x, y, z } = pose.position;
        let offsets = patch_offsets();
        Ok(offsets
            .iter()
            .map(|dy| {
                offsets
                    .iter()
                    .map(|dx| self.surface_z(x + dx, y + dy) - z)
                    .collect()
            })
            .collect())
    }

    async fn move_to(&mut self, name: &str, pose: &Pose, speed: f64) -> Result<(), BackendError> {
        self.calls.push(Call::MoveTo(name.to_owned(), *pose, speed));
        let object = self
            .objects
            .get_mut(name)
            .ok_or_else(|| BackendError::UnknownObject {
                name: name.to_owned(),
            })?;
        object.pose = *pose;
        Ok(())
    }
}

/// Evenly spaced offsets spanning `[-DEPTH_PATCH_HALF_WIDTH, DEPTH_PATCH_HALF_WIDTH]`.
fn patch_offsets() -> Vec<f64> {
    let steps = DEPTH_PATCH_SIZE.saturating_sub(1).max(1);
    let step = 2.0 * DEPTH_PATCH_HALF_WIDTH / f64::from(u32::try_from(steps).unwrap_or(1));
    (0..DEPTH_PATCH_SIZE)
        .map(|i| f64::from(u32::try_from(i).unwrap_or(0)).mul_add(step, -DEPTH_PATCH_HALF_WIDTH))
        .collect()
}
