//! Position, orientation and pose primitives.
//!
//! Coordinates follow the simulator's NED convention: `x` north, `y` east,
//! `z` down. A point "above" the ground therefore has a smaller `z` than the
//! ground height beneath it.
//!
//! Field names serialize as `x`, `y`, `z` (and `w`); the legacy `x_val`
//! spellings written by older tooling are accepted on input.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// North coordinate.
    #[serde(alias = "x_val")]
    pub x: f64,
    /// East coordinate.
    #[serde(alias = "y_val")]
    pub y: f64,
    /// Down coordinate.
    #[serde(alias = "z_val")]
    pub z: f64,
}

impl Position {
    /// The world origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a position from its three coordinates.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance between two positions, ignoring altitude.
    pub fn distance_2d(&self, other: &Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Whether every coordinate is finite.
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A rotation quaternion.
///
/// Unit norm is expected but not enforced; mutation never touches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Vector part, x.
    #[serde(alias = "x_val")]
    pub x: f64,
    /// Vector part, y.
    #[serde(alias = "y_val")]
    pub y: f64,
    /// Vector part, z.
    #[serde(alias = "z_val")]
    pub z: f64,
    /// Scalar part.
    #[serde(alias = "w_val")]
    pub w: f64,
}

impl Orientation {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Create a quaternion from its components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Build a quaternion from Euler angles in radians.
    pub fn from_euler(pitch: f64, roll: f64, yaw: f64) -> Self {
        let (sy, cy) = (yaw * 0.5).sin_cos();
        let (sr, cr) = (roll * 0.5).sin_cos();
        let (sp, cp) = (pitch * 0.5).sin_cos();

        Self {
            w: cy.mul_add(cr * cp, sy * sr * sp),
            x: cy.mul_add(sr * cp, -(sy * cr * sp)),
            y: cy.mul_add(cr * sp, sy * sr * cp),
            z: sy.mul_add(cr * cp, -(cy * sr * sp)),
        }
    }

    /// A pure heading rotation about the down axis, in radians.
    pub fn from_yaw(yaw: f64) -> Self {
        Self::from_euler(0.0, 0.0, yaw)
    }

    /// Quaternion norm.
    pub fn norm(&self) -> f64 {
        self.w
            .mul_add(self.w, self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)))
            .sqrt()
    }

    /// Whether every component is finite.
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A position with an orientation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// Where the object is.
    pub position: Position,
    /// How the object is rotated.
    pub orientation: Orientation,
}

impl Pose {
    /// Create a pose from a position and an orientation.
    pub const fn new(position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// A pose at `position` with the identity orientation.
    pub const fn at(position: Position) -> Self {
        Self::new(position, Orientation::IDENTITY)
    }

    /// Whether every coordinate is finite.
    pub const fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn default_pose_is_origin_with_identity() {
        let pose = Pose::default();
        assert_eq!(pose.position, Position::ORIGIN);
        assert_eq!(pose.orientation, Orientation::IDENTITY);
    }

    #[test]
    fn distance_ignores_altitude() {
        let a = Position::new(0.0, 0.0, -50.0);
        let b = Position::new(3.0, 4.0, 10.0);
        assert!((a.distance_2d(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn yaw_quaternion_is_unit_and_about_down_axis() {
        let q = Orientation::from_yaw(FRAC_PI_2);
        assert!((q.norm() - 1.0).abs() < 1e-12);
        assert!(q.x.abs() < 1e-12);
        assert!(q.y.abs() < 1e-12);
        assert!((q.z - (FRAC_PI_2 * 0.5).sin()).abs() < 1e-12);
        assert!((q.w - (FRAC_PI_2 * 0.5).cos()).abs() < 1e-12);
    }

    #[test]
    fn zero_yaw_is_identity() {
        assert_eq!(Orientation::from_yaw(0.0), Orientation::IDENTITY);
    }

    #[test]
    fn pose_accepts_legacy_field_names() {
        let json = r#"{
            "position": {"x_val": 1.0, "y_val": 2.0, "z_val": 3.0},
            "orientation": {"x_val": 0.0, "y_val": 0.0, "z_val": 0.0, "w_val": 1.0}
        }"#;
        let pose: Pose = serde_json::from_str(json).unwrap();
        assert_eq!(pose.position, Position::new(1.0, 2.0, 3.0));
        assert_eq!(pose.orientation, Orientation::IDENTITY);
    }

    #[test]
    fn pose_serializes_short_field_names() {
        let pose = Pose::at(Position::new(1.0, -2.0, 0.5));
        let value = serde_json::to_value(pose).unwrap();
        assert_eq!(value["position"]["x"], 1.0);
        assert_eq!(value["position"]["y"], -2.0);
        assert_eq!(value["orientation"]["w"], 1.0);
    }

    #[test]
    fn non_finite_pose_is_detected() {
        let pose = Pose::at(Position::new(f64::NAN, 0.0, 0.0));
        assert!(!pose.is_finite());
        assert!(Pose::default().is_finite());
    }
}
