//! Ground markers: the landing target and its decoys.
//!
//! Vector layout (9): `[id, material, x, y, z, qx, qy, qz, qw]`.
//!
//! Record layout: `{id, material, position, orientation}` with the pose
//! flattened next to the identifier.

use landfall_types::{MarkerId, Pose};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Deserializer};

use crate::component::{Component, check_rate, fires, fixed, record, whole};
use crate::error::{DecodeError, DomainError};
use crate::pose::{mutate_pose, pose_from_slots, pose_record, pose_slots, validate_pose};

/// A placed marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Which marker variant the world spawns.
    pub id: MarkerId,
    /// Material index applied to the marker surface.
    pub material: u32,
    /// Where the marker sits.
    pub pose: Pose,
}

#[derive(Deserialize)]
struct MarkerRecord {
    id: MarkerId,
    #[serde(default, deserialize_with = "null_as_zero")]
    material: u32,
    #[serde(flatten)]
    pose: Pose,
}

/// Older records write an unset material as `null`.
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Option::<u32>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Marker {
    /// Create a marker.
    pub const fn new(id: MarkerId, material: u32, pose: Pose) -> Self {
        Self { id, material, pose }
    }

    /// Name of the world object backing this marker as the target.
    pub fn object_name(&self) -> String {
        format!("cube_marker{}", self.id)
    }

    /// Name of the world object backing this marker as decoy number `slot`.
    ///
    /// Distinct slots never share a name, whatever their ids, and no decoy
    /// name equals a target name.
    pub fn decoy_object_name(&self, slot: usize) -> String {
        format!("cube_marker{}_{slot}", self.id)
    }
}

impl Component for Marker {
    const NAME: &'static str = "marker";
    const VECTOR_LEN: usize = 9;

    fn to_vector(&self) -> Vec<f64> {
        [f64::from(self.id.get()), f64::from(self.material)]
            .into_iter()
            .chain(pose_slots(&self.pose))
            .collect()
    }

    fn from_vector(values: &[f64]) -> Result<Self, DecodeError> {
        let [id, material, x, y, z, qx, qy, qz, qw] = fixed(Self::NAME, values)?;
        let raw = whole(Self::NAME, "id", id, u32::from(MarkerId::MAX), "a marker id in 0..=7")?;
        let id = u8::try_from(raw)
            .ok()
            .and_then(|raw| MarkerId::new(raw).ok())
            .ok_or(DecodeError::OutOfDomain {
                component: Self::NAME,
                field: "id",
                value: id,
                expected: "a marker id in 0..=7",
            })?;
        let material = whole(Self::NAME, "material", material, u32::MAX, "a non-negative integer")?;
        let pose = pose_from_slots(Self::NAME, [x, y, z, qx, qy, qz, qw])?;
        Ok(Self::new(id, material, pose))
    }

    fn to_record(&self) -> serde_json::Value {
        let mut value = pose_record(&self.pose);
        if let Some(map) = value.as_object_mut() {
            map.insert("id".to_owned(), self.id.get().into());
            map.insert("material".to_owned(), self.material.into());
        }
        value
    }

    fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        let MarkerRecord { id, material, pose } = record(Self::NAME, value)?;
        Ok(Self::new(id, material, validate_pose(Self::NAME, pose)?))
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        check_rate(rate)?;
        mutate_pose(&mut self.pose, rate, rng);
        if fires(rate, rng) {
            self.id = MarkerId::ALL.choose(rng).copied().unwrap_or(self.id);
        }
        Ok(())
    }
}
