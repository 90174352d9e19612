//! The pose primitive as a component.
//!
//! Vector layout (7): `[x, y, z, qx, qy, qz, qw]`.
//!
//! Mutation moves the position only. All three axes share one trigger; each
//! axis then moves by an independent draw from `U[-1, 1]` and is clamped to
//! `[-100, 100]`. The orientation is never mutated.

use landfall_types::{Orientation, Pose, Position};
use rand::Rng;
use serde_json::json;

use crate::component::{Component, check_rate, finite, fires, fixed, record};
use crate::error::{DecodeError, DomainError};

/// Largest per-axis position change applied by one mutation.
pub const POSITION_STEP: f64 = 1.0;

/// Position coordinates are clamped to `[-POSITION_LIMIT, POSITION_LIMIT]` after mutation.
pub const POSITION_LIMIT: f64 = 100.0;

const FIELDS: [&str; 7] = [
    "position.x",
    "position.y",
    "position.z",
    "orientation.x",
    "orientation.y",
    "orientation.z",
    "orientation.w",
];

/// Move a pose's position by `delta` and clamp each axis to the legal box.
pub fn nudge_position(pose: &mut Pose, delta: [f64; 3]) {
    let [dx, dy, dz] = delta;
    let p = &mut pose.position;
    p.x = (p.x + dx).clamp(-POSITION_LIMIT, POSITION_LIMIT);
    p.y = (p.y + dy).clamp(-POSITION_LIMIT, POSITION_LIMIT);
    p.z = (p.z + dz).clamp(-POSITION_LIMIT, POSITION_LIMIT);
}

pub(crate) const fn pose_slots(pose: &Pose) -> [f64; 7] {
    let Pose {
        position: p,
        orientation: q,
    } = *pose;
    [p.x, p.y, p.z, q.x, q.y, q.z, q.w]
}

pub(crate) fn pose_from_slots(component: &'static str, slots: [f64; 7]) -> Result<Pose, DecodeError> {
    let [x, y, z, qx, qy, qz, qw] = slots;
    validate_pose(
        component,
        Pose::new(Position::new(x, y, z), Orientation::new(qx, qy, qz, qw)),
    )
}

pub(crate) fn validate_pose(component: &'static str, pose: Pose) -> Result<Pose, DecodeError> {
    for (field, value) in FIELDS.into_iter().zip(pose_slots(&pose)) {
        finite(component, field, value)?;
    }
    Ok(pose)
}

pub(crate) fn pose_record(pose: &Pose) -> serde_json::Value {
    let [x, y, z, qx, qy, qz, qw] = pose_slots(pose);
    json!({
        "position": { "x": x, "y": y, "z": z },
        "orientation": { "x": qx, "y": qy, "z": qz, "w": qw },
    })
}

pub(crate) fn mutate_pose(pose: &mut Pose, rate: f64, rng: &mut impl Rng) {
    if fires(rate, rng) {
        let delta = [
            rng.random_range(-POSITION_STEP..=POSITION_STEP),
            rng.random_range(-POSITION_STEP..=POSITION_STEP),
            rng.random_range(-POSITION_STEP..=POSITION_STEP),
        ];
        nudge_position(pose, delta);
    }
}

impl Component for Pose {
    const NAME: &'static str = "pose";
    const VECTOR_LEN: usize = 7;

    fn to_vector(&self) -> Vec<f64> {
        pose_slots(self).to_vec()
    }

    fn from_vector(values: &[f64]) -> Result<Self, DecodeError> {
        pose_from_slots(Self::NAME, fixed(Self::NAME, values)?)
    }

    fn to_record(&self) -> serde_json::Value {
        pose_record(self)
    }

    fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        validate_pose(Self::NAME, record(Self::NAME, value)?)
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        check_rate(rate)?;
        mutate_pose(self, rate, rng);
        Ok(())
    }
}
