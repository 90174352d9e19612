//! Planar sampling helpers used by the generator and the placement rules.

use std::f64::consts::TAU;

use landfall_types::{Orientation, Position};
use rand::Rng;

/// Largest yaw, in degrees, given to a sampled reach pose (either direction).
pub const MAX_YAW_DEGREES: f64 = 90.0;

/// Sample a point in the disk of `radius` around `center`.
///
/// The distance from the center is drawn uniformly from `[0, radius]` and the
/// angle uniformly from `[0, 2pi)`, so points cluster towards the middle.
/// Returns the `(x, y)` pair; the caller decides the height.
pub fn sample_in_disk(center: &Position, radius: f64, rng: &mut impl Rng) -> (f64, f64) {
    let r = if radius > 0.0 {
        rng.random_range(0.0..=radius)
    } else {
        0.0
    };
    let theta = rng.random_range(0.0..TAU);
    let (sin, cos) = theta.sin_cos();
    (r.mul_add(cos, center.x), r.mul_add(sin, center.y))
}

/// Horizontal distance between two positions, ignoring height.
pub fn distance_2d(a: &Position, b: &Position) -> f64 {
    a.distance_2d(b)
}

/// Quaternion for a heading of `degrees` about the vertical axis.
pub fn yaw_quaternion(degrees: f64) -> Orientation {
    Orientation::from_yaw(degrees.to_radians())
}

/// A heading drawn uniformly from `[-90, 90]` degrees.
pub fn random_yaw(rng: &mut impl Rng) -> Orientation {
    yaw_quaternion(rng.random_range(-MAX_YAW_DEGREES..=MAX_YAW_DEGREES))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn disk_samples_stay_inside() {
        let mut rng = SmallRng::seed_from_u64(5);
        let center = Position::new(10.0, -4.0, -2.0);
        for _ in 0..1000 {
            let (x, y) = sample_in_disk(&center, 7.5, &mut rng);
            let d = distance_2d(&center, &Position::new(x, y, 0.0));
            assert!(d <= 7.5 + 1e-9, "sample {d} outside radius");
        }
    }

    #[test]
    fn zero_radius_returns_center() {
        let mut rng = SmallRng::seed_from_u64(5);
        let center = Position::new(3.0, 4.0, 0.0);
        let (x, y) = sample_in_disk(&center, 0.0, &mut rng);
        assert!((x - 3.0).abs() < 1e-12);
        assert!((y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, -100.0);
        assert_eq!(distance_2d(&a, &b), 5.0);
    }

    #[test]
    fn yaw_quaternion_rotates_about_vertical() {
        let q = yaw_quaternion(90.0);
        assert!(q.x.abs() < 1e-12);
        assert!(q.y.abs() < 1e-12);
        assert!((q.z - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((q.w - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn random_yaw_is_unit_and_forward_facing() {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..500 {
            let q = random_yaw(&mut rng);
            assert!((q.norm() - 1.0).abs() < 1e-9);
            // |yaw| <= 90 degrees keeps w >= cos(45 degrees).
            assert!(q.w >= std::f64::consts::FRAC_1_SQRT_2 - 1e-9);
        }
    }
}
