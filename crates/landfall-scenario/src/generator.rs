//! Random scenario construction.
//!
//! The generator is pure: everything it needs from the world (ground heights)
//! arrives in a [`Site`], and every random draw comes from the caller's RNG.
//! Querying the world for those heights is the placement crate's job.

use std::ops::RangeInclusive;

use landfall_components::actor::BIRD_ALTITUDE;
use landfall_components::{Actor, Marker, TimeOfDay, Weather};
use landfall_types::{ActorKind, MarkerId, MoveMode, Pose, Position};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::config::{GeneratorConfig, WeatherMode};
use crate::error::GeneratorError;
use crate::geometry::{random_yaw, sample_in_disk};
use crate::scenario::Scenario;

/// Height band the reach pose is placed above ground when no descent is fixed.
pub const DESCENT_RANGE: RangeInclusive<f64> = 5.0..=30.0;

/// Radius around the anchor that sampled actors start in.
pub const GROWTH_RADIUS: f64 = 5.0;

/// Largest horizontal offset between a dynamic actor's start and end poses.
pub const ACTOR_TRAVEL: f64 = 10.0;

/// Ground heights for one sampled marker site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    /// Marker x.
    pub x: f64,
    /// Marker y.
    pub y: f64,
    /// Ground height under the marker.
    pub ground_z: f64,
    /// Ground height under the origin, used when the drone start is snapped.
    pub origin_ground_z: f64,
}

/// Builds random scenarios from a validated [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    config: GeneratorConfig,
}

impl ScenarioGenerator {
    /// Validate `config` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError`] for a non-positive radius, an inverted or
    /// non-finite range, a negative clearance, a non-positive fixed descent,
    /// or a weather ceiling outside `[0, 1]`.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        if !(config.radius.is_finite() && config.radius > 0.0) {
            return Err(GeneratorError::InvalidRadius {
                radius: config.radius,
            });
        }
        check_range("x", config.x_range)?;
        check_range("y", config.y_range)?;
        if let Some(clearance) = config
            .drone_clearance
            .filter(|c| !(c.is_finite() && *c >= 0.0))
        {
            return Err(GeneratorError::InvalidClearance { clearance });
        }
        if let Some(descent) = config.descent.filter(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(GeneratorError::InvalidDescent { descent });
        }
        if !(0.0..=1.0).contains(&config.weather_max) {
            return Err(GeneratorError::InvalidWeatherCeiling {
                max: config.weather_max,
            });
        }
        Ok(Self { config })
    }

    /// The validated configuration.
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Whether [`build`](Self::build) reads [`Site::origin_ground_z`].
    pub const fn snaps_drone(&self) -> bool {
        self.config.drone_clearance.is_some()
    }

    /// Draw the target marker's `(x, y)` from the configured rectangle.
    pub fn sample_site(&self, rng: &mut impl Rng) -> (f64, f64) {
        let [x_min, x_max] = self.config.x_range;
        let [y_min, y_max] = self.config.y_range;
        (
            rng.random_range(x_min..=x_max),
            rng.random_range(y_min..=y_max),
        )
    }

    /// Assemble a scenario around `site`.
    pub fn build(&self, site: &Site, rng: &mut impl Rng) -> Scenario {
        let marker_position = Position::new(site.x, site.y, site.ground_z);
        let tp_marker = Marker::new(MarkerId::TARGET, 0, Pose::at(marker_position));

        let (gps_x, gps_y) = sample_in_disk(&marker_position, self.config.radius, rng);
        let descent = self
            .config
            .descent
            .unwrap_or_else(|| rng.random_range(DESCENT_RANGE));
        let gps_pose = Pose::new(
            Position::new(gps_x, gps_y, site.ground_z - descent),
            random_yaw(rng),
        );

        let drone_start_pose = self.config.drone_clearance.map_or_else(Pose::default, |c| {
            Pose::at(Position::new(0.0, 0.0, site.origin_ground_z - c))
        });

        let weather = match self.config.weather {
            WeatherMode::Shared => Weather::uniform(rng.random_range(0.0..=self.config.weather_max)),
            WeatherMode::Calm => Weather::CALM,
        };
        let time = TimeOfDay::new(rng.random_range(0.0..=1.0), rng.random_range(0.0..=1.0));

        let fp_markers = (0..self.config.decoy_count)
            .map(|_| sample_decoy(&marker_position, self.config.radius, rng))
            .collect();

        let anchor = Position::new(gps_pose.position.x, gps_pose.position.y, site.ground_z);
        let actors = (0..self.config.actor_count)
            .map(|_| {
                let dynamic = rng.random_bool(0.5);
                sample_actor(&anchor, GROWTH_RADIUS, dynamic, rng)
            })
            .collect();

        Scenario {
            tp_marker,
            fp_markers,
            drone_start_pose,
            gps_pose,
            radius: self.config.radius,
            actors,
            weather,
            time,
        }
    }
}

/// A decoy marker somewhere in the disk of `radius` around `center`.
///
/// Decoys use marker variant 1 or 2, material 0, and sit at `center`'s height.
pub fn sample_decoy(center: &Position, radius: f64, rng: &mut impl Rng) -> Marker {
    let id = MarkerId::ALL
        .get(1..=2)
        .and_then(|ids| ids.choose(rng))
        .copied()
        .unwrap_or(MarkerId::TARGET);
    let (x, y) = sample_in_disk(center, radius, rng);
    Marker::new(id, 0, Pose::at(Position::new(x, y, center.z)))
}

/// An actor of random kind starting within `radius` of `anchor`.
///
/// Birds start in the bird altitude band; everything else starts at the
/// anchor's height. A static actor ends where it starts with speed 0. A
/// dynamic one heads up to 10 units away on each axis at a speed in `[0, 1)`.
pub fn sample_actor(anchor: &Position, radius: f64, dynamic: bool, rng: &mut impl Rng) -> Actor {
    let kind = ActorKind::ALL.choose(rng).copied().unwrap_or(ActorKind::Person);
    let mode = MoveMode::ALL.choose(rng).copied().unwrap_or(MoveMode::Straight);
    let (x, y) = sample_in_disk(anchor, radius, rng);
    let z = if kind == ActorKind::Bird {
        rng.random_range(BIRD_ALTITUDE)
    } else {
        anchor.z
    };
    let start_pose = Pose::at(Position::new(x, y, z));

    if !dynamic {
        return Actor::new(kind, mode, start_pose, start_pose, 0.0);
    }
    let end_pose = Pose::at(Position::new(
        x + rng.random_range(-ACTOR_TRAVEL..=ACTOR_TRAVEL),
        y + rng.random_range(-ACTOR_TRAVEL..=ACTOR_TRAVEL),
        z,
    ));
    Actor::new(kind, mode, start_pose, end_pose, rng.random::<f64>())
}

fn check_range(axis: &'static str, range: [f64; 2]) -> Result<(), GeneratorError> {
    let [min, max] = range;
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(GeneratorError::InvalidRegion { axis, min, max })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use landfall_components::Component;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    const SITE: Site = Site {
        x: 0.0,
        y: 0.0,
        ground_z: -2.0,
        origin_ground_z: -1.0,
    };

    fn generator(config: GeneratorConfig) -> ScenarioGenerator {
        ScenarioGenerator::new(config).unwrap()
    }

    #[test]
    fn rejects_bad_radius() {
        for radius in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let config = GeneratorConfig {
                radius,
                ..GeneratorConfig::default()
            };
            assert!(matches!(
                ScenarioGenerator::new(config),
                Err(GeneratorError::InvalidRadius { .. })
            ));
        }
    }

    #[test]
    fn rejects_inverted_region() {
        let config = GeneratorConfig {
            y_range: [5.0, -5.0],
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            ScenarioGenerator::new(config),
            Err(GeneratorError::InvalidRegion { axis: "y", .. })
        ));
    }

    #[test]
    fn rejects_negative_clearance() {
        let config = GeneratorConfig {
            drone_clearance: Some(-0.5),
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            ScenarioGenerator::new(config),
            Err(GeneratorError::InvalidClearance { .. })
        ));
    }

    #[test]
    fn rejects_weather_ceiling_above_one() {
        let config = GeneratorConfig {
            weather_max: 1.5,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            ScenarioGenerator::new(config),
            Err(GeneratorError::InvalidWeatherCeiling { .. })
        ));
    }

    #[test]
    fn site_comes_from_rectangle() {
        let g = generator(GeneratorConfig {
            x_range: [2.0, 3.0],
            y_range: [-8.0, -7.0],
            ..GeneratorConfig::default()
        });
        let mut rng = SmallRng::seed_from_u64(4);
        for _ in 0..200 {
            let (x, y) = g.sample_site(&mut rng);
            assert!((2.0..=3.0).contains(&x));
            assert!((-8.0..=-7.0).contains(&y));
        }
    }

    #[test]
    fn default_build_matches_sampling_rules() {
        let g = generator(GeneratorConfig::default());
        for seed in 0..100_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let s = g.build(&SITE, &mut rng);

            assert_eq!(s.tp_marker.id, MarkerId::TARGET);
            assert_eq!(s.tp_marker.material, 0);
            assert_eq!(s.tp_marker.pose.position, Position::new(0.0, 0.0, -2.0));

            let reach = s.gps_pose.position;
            assert!(reach.distance_2d(&s.tp_marker.pose.position) <= 10.0 + 1e-9);
            assert!(DESCENT_RANGE.contains(&(SITE.ground_z - reach.z)));
            assert!((s.gps_pose.orientation.norm() - 1.0).abs() < 1e-9);

            assert_eq!(s.drone_start_pose, Pose::default());
            let channels = s.weather.channels();
            let shared = channels.first().copied().unwrap();
            assert!(channels.iter().all(|c| *c == shared));
            assert!((0.0..=0.2).contains(&shared));
            assert!((0.0..=1.0).contains(&s.time.hour));
            assert!(s.fp_markers.is_empty());
            assert!(s.actors.is_empty());
            assert_eq!(s.radius, 10.0);
        }
    }

    #[test]
    fn fixed_descent_and_snapped_drone() {
        let g = generator(GeneratorConfig {
            descent: Some(12.0),
            drone_clearance: Some(0.5),
            weather: WeatherMode::Calm,
            ..GeneratorConfig::default()
        });
        assert!(g.snaps_drone());
        let mut rng = SmallRng::seed_from_u64(8);
        let s = g.build(&SITE, &mut rng);
        assert_eq!(s.gps_pose.position.z, -14.0);
        assert_eq!(s.drone_start_pose.position, Position::new(0.0, 0.0, -1.5));
        assert_eq!(s.weather, Weather::CALM);
    }

    #[test]
    fn decoys_and_actors_are_sampled_on_request() {
        let g = generator(GeneratorConfig {
            decoy_count: 3,
            actor_count: 4,
            ..GeneratorConfig::default()
        });
        let mut rng = SmallRng::seed_from_u64(21);
        let s = g.build(&SITE, &mut rng);
        assert_eq!(s.fp_markers.len(), 3);
        assert_eq!(s.actors.len(), 4);
        for decoy in &s.fp_markers {
            assert!(matches!(decoy.id.get(), 1 | 2));
            assert_eq!(decoy.pose.position.z, SITE.ground_z);
            assert!(decoy.pose.position.distance_2d(&s.tp_marker.pose.position) <= 10.0 + 1e-9);
        }
        assert!(Scenario::from_record(&s.to_record()).is_ok());
    }

    #[test]
    fn static_actor_stays_put() {
        let mut rng = SmallRng::seed_from_u64(2);
        let anchor = Position::new(5.0, 5.0, -1.0);
        for _ in 0..50 {
            let a = sample_actor(&anchor, GROWTH_RADIUS, false, &mut rng);
            assert_eq!(a.start_pose, a.end_pose);
            assert_eq!(a.speed, 0.0);
            if a.kind == ActorKind::Bird {
                assert!(BIRD_ALTITUDE.contains(&a.start_pose.position.z));
            } else {
                assert_eq!(a.start_pose.position.z, -1.0);
            }
        }
    }

    #[test]
    fn dynamic_actor_travels_bounded_distance() {
        let mut rng = SmallRng::seed_from_u64(3);
        let anchor = Position::ORIGIN;
        for _ in 0..50 {
            let a = sample_actor(&anchor, GROWTH_RADIUS, true, &mut rng);
            assert!((a.end_pose.position.x - a.start_pose.position.x).abs() <= ACTOR_TRAVEL);
            assert!((a.end_pose.position.y - a.start_pose.position.y).abs() <= ACTOR_TRAVEL);
            assert_eq!(a.end_pose.position.z, a.start_pose.position.z);
            assert!((0.0..1.0).contains(&a.speed));
            assert!(Actor::from_vector(&a.to_vector()).is_ok());
        }
    }
}
