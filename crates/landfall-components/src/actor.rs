//! Moving (or static) actors placed around the landing site.
//!
//! Vector layout (16): `[kind + 3 * mode, start pose (7), end pose (7), speed]`.
//!
//! The leading slot packs both categorical fields so a vector decodes back to
//! the exact actor it came from.

use landfall_types::{ActorKind, MoveMode, Pose};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use serde_json::json;

use crate::component::{Component, check_rate, finite, fires, fixed, record, whole};
use crate::error::{DecodeError, DomainError};
use crate::pose::{mutate_pose, pose_from_slots, pose_record, pose_slots, validate_pose};

/// Altitude band a bird is moved into when an actor turns into one.
pub const BIRD_ALTITUDE: std::ops::RangeInclusive<f64> = 3.0..=8.0;

const KIND_COUNT: u8 = 3;

/// An actor travelling from a start pose to an end pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    /// What the actor is.
    pub kind: ActorKind,
    /// How the actor moves.
    pub mode: MoveMode,
    /// Where the actor spawns.
    pub start_pose: Pose,
    /// Where the actor heads once the scenario runs.
    pub end_pose: Pose,
    /// Travel speed, `>= 0`.
    pub speed: f64,
}

#[derive(Deserialize)]
struct ActorRecord {
    #[serde(rename = "type")]
    kind: String,
    mode: String,
    start_pose: Pose,
    end_pose: Pose,
    speed: f64,
}

impl Actor {
    /// Create an actor.
    pub const fn new(
        kind: ActorKind,
        mode: MoveMode,
        start_pose: Pose,
        end_pose: Pose,
        speed: f64,
    ) -> Self {
        Self {
            kind,
            mode,
            start_pose,
            end_pose,
            speed,
        }
    }

    /// Name of the world object spawned for the actor at `index`.
    pub fn object_name(&self, index: usize) -> String {
        format!("{}_{index}", self.kind)
    }

    fn packed_slot(&self) -> f64 {
        f64::from(self.kind.index()) + 3.0 * f64::from(self.mode.index())
    }

    fn unpack_slot(value: f64) -> Result<(ActorKind, MoveMode), DecodeError> {
        let packed = whole(Self::NAME, "kind", value, 8, "a packed kind/mode index in 0..=8")?;
        let packed = u8::try_from(packed).ok();
        packed
            .and_then(|p| {
                let kind = ActorKind::from_index(p.checked_rem(KIND_COUNT)?)?;
                let mode = MoveMode::from_index(p.checked_div(KIND_COUNT)?)?;
                Some((kind, mode))
            })
            .ok_or(DecodeError::OutOfDomain {
                component: Self::NAME,
                field: "kind",
                value,
                expected: "a packed kind/mode index in 0..=8",
            })
    }

    fn validate_speed(speed: f64) -> Result<f64, DecodeError> {
        let speed = finite(Self::NAME, "speed", speed)?;
        if speed >= 0.0 {
            Ok(speed)
        } else {
            Err(DecodeError::OutOfDomain {
                component: Self::NAME,
                field: "speed",
                value: speed,
                expected: "a non-negative speed",
            })
        }
    }
}

impl Component for Actor {
    const NAME: &'static str = "actor";
    const VECTOR_LEN: usize = 16;

    fn to_vector(&self) -> Vec<f64> {
        std::iter::once(self.packed_slot())
            .chain(pose_slots(&self.start_pose))
            .chain(pose_slots(&self.end_pose))
            .chain(std::iter::once(self.speed))
            .collect()
    }

    fn from_vector(values: &[f64]) -> Result<Self, DecodeError> {
        let [packed, s0, s1, s2, s3, s4, s5, s6, e0, e1, e2, e3, e4, e5, e6, speed] =
            fixed(Self::NAME, values)?;
        let (kind, mode) = Self::unpack_slot(packed)?;
        let start_pose = pose_from_slots(Self::NAME, [s0, s1, s2, s3, s4, s5, s6])?;
        let end_pose = pose_from_slots(Self::NAME, [e0, e1, e2, e3, e4, e5, e6])?;
        Ok(Self::new(
            kind,
            mode,
            start_pose,
            end_pose,
            Self::validate_speed(speed)?,
        ))
    }

    fn to_record(&self) -> serde_json::Value {
        json!({
            "type": self.kind.name(),
            "mode": self.mode.name(),
            "start_pose": pose_record(&self.start_pose),
            "end_pose": pose_record(&self.end_pose),
            "speed": self.speed,
        })
    }

    fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        let raw: ActorRecord = record(Self::NAME, value)?;
        let unknown = |source| DecodeError::UnknownName {
            component: Self::NAME,
            source,
        };
        let kind = raw.kind.parse::<ActorKind>().map_err(unknown)?;
        let mode = raw.mode.parse::<MoveMode>().map_err(unknown)?;
        Ok(Self::new(
            kind,
            mode,
            validate_pose(Self::NAME, raw.start_pose)?,
            validate_pose(Self::NAME, raw.end_pose)?,
            Self::validate_speed(raw.speed)?,
        ))
    }

    fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        check_rate(rate)?;
        mutate_pose(&mut self.start_pose, rate, rng);
        mutate_pose(&mut self.end_pose, rate, rng);

        if fires(rate, rng) {
            self.kind = ActorKind::ALL.choose(rng).copied().unwrap_or(self.kind);
            if self.kind == ActorKind::Bird {
                let altitude = rng.random_range(BIRD_ALTITUDE);
                self.start_pose.position.z = altitude;
                self.end_pose.position.z = altitude;
            }
        }
        if fires(rate, rng) {
            self.speed = rng.random::<f64>();
        }
        if fires(rate, rng) {
            self.mode = MoveMode::ALL.choose(rng).copied().unwrap_or(self.mode);
        }
        Ok(())
    }
}
