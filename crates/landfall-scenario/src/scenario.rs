//! The scenario aggregate.
//!
//! A [`Scenario`] owns every component describing one landing test: the
//! target marker, decoy markers, the drone's start pose, the reach (GPS) pose,
//! the sampling radius, actors, weather and time of day.
//!
//! It has two serialized forms: a JSON record for storage (see
//! [`Scenario::to_record`]) and a [`ScenarioVectors`] set holding one flat
//! vector per component for genetic search.

use std::path::Path;

use landfall_components::{
    Actor, Component, DecodeError, DomainError, Marker, TimeOfDay, Weather, check_rate, fires,
};
use landfall_types::{Pose, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::error::ScenarioError;
use crate::generator::{GROWTH_RADIUS, sample_actor};

/// Largest radius change applied by one mutation.
pub const RADIUS_STEP: f64 = 3.0;

/// Largest change in actor count asked for by one structural mutation.
pub const ACTOR_COUNT_STEP: i64 = 2;

/// Rate at which surviving actors mutate, whatever the scenario rate.
pub const ACTOR_MUTATION_RATE: f64 = 0.3;

const COMPONENT: &str = "scenario";

/// What structural mutation does when it asks for more actors than exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorGrowth {
    /// Keep the existing actors; nothing is added.
    #[default]
    Keep,
    /// Append freshly sampled actors around the reach pose.
    Sample,
}

/// How the target marker is recombined by [`Scenario::crossover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMarkerCrossover {
    /// Cross the first parent's marker with itself, so both children inherit it.
    #[default]
    SelfCross,
    /// Cross the first parent's marker with the second parent's.
    CrossParent,
}

/// Knobs for [`Scenario::mutate_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationPolicy {
    /// Behaviour when the actor list should grow.
    pub actor_growth: ActorGrowth,
    /// Rate applied to each actor that survives a resize.
    pub actor_rate: f64,
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self {
            actor_growth: ActorGrowth::Keep,
            actor_rate: ACTOR_MUTATION_RATE,
        }
    }
}

/// One complete landing scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// The marker the drone must land on.
    pub tp_marker: Marker,
    /// Decoy markers, in placement order.
    pub fp_markers: Vec<Marker>,
    /// Where the drone starts.
    pub drone_start_pose: Pose,
    /// The approximate pose the drone is guided to before searching.
    pub gps_pose: Pose,
    /// Radius the reach pose and decoys were sampled in. Any finite real.
    pub radius: f64,
    /// Actors, in spawn order.
    pub actors: Vec<Actor>,
    /// Ambient weather.
    pub weather: Weather,
    /// Time of day.
    pub time: TimeOfDay,
}

/// Flat vectors for every component of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVectors {
    /// Target marker vector.
    pub tp_marker: Vec<f64>,
    /// Drone start pose vector.
    pub drone_start_pose: Vec<f64>,
    /// Reach pose vector.
    pub gps_pose: Vec<f64>,
    /// Sampling radius.
    pub radius: f64,
    /// Weather vector.
    pub weather: Vec<f64>,
    /// Time-of-day vector.
    pub time: Vec<f64>,
    /// One vector per decoy marker.
    pub fp_markers: Vec<Vec<f64>>,
    /// One vector per actor.
    pub actors: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct ScenarioRecord {
    tp_marker: serde_json::Value,
    drone_start_pose: serde_json::Value,
    gps_pose: serde_json::Value,
    radius: f64,
    weather: serde_json::Value,
    time: serde_json::Value,
    fp_markers: Vec<serde_json::Value>,
    actors: Vec<serde_json::Value>,
}

impl Scenario {
    /// Structured record in the persisted layout.
    pub fn to_record(&self) -> serde_json::Value {
        json!({
            "tp_marker": self.tp_marker.to_record(),
            "drone_start_pose": self.drone_start_pose.to_record(),
            "gps_pose": self.gps_pose.to_record(),
            "radius": self.radius,
            "weather": self.weather.to_record(),
            "time": self.time.to_record(),
            "fp_markers": self.fp_markers.iter().map(Component::to_record).collect::<Vec<_>>(),
            "actors": self.actors.iter().map(Component::to_record).collect::<Vec<_>>(),
        })
    }

    /// Inverse of [`to_record`](Self::to_record).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if a key is missing, a value has the wrong
    /// shape, or any field is outside its domain.
    pub fn from_record(value: &serde_json::Value) -> Result<Self, DecodeError> {
        let raw = ScenarioRecord::deserialize(value).map_err(|source| DecodeError::Record {
            component: COMPONENT,
            source,
        })?;
        Ok(Self {
            tp_marker: Marker::from_record(&raw.tp_marker)?,
            fp_markers: raw
                .fp_markers
                .iter()
                .map(Marker::from_record)
                .collect::<Result<_, _>>()?,
            drone_start_pose: Pose::from_record(&raw.drone_start_pose)?,
            gps_pose: Pose::from_record(&raw.gps_pose)?,
            radius: check_radius(raw.radius)?,
            actors: raw
                .actors
                .iter()
                .map(Actor::from_record)
                .collect::<Result<_, _>>()?,
            weather: Weather::from_record(&raw.weather)?,
            time: TimeOfDay::from_record(&raw.time)?,
        })
    }

    /// Write the record to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ScenarioError> {
        let text = serde_json::to_string_pretty(&self.to_record())?;
        std::fs::write(path, text)?;
        debug!(path = %path.display(), "Scenario saved");
        Ok(())
    }

    /// Read a scenario written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if the file cannot be read, is not JSON, or
    /// does not decode.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        let scenario = Self::from_record(&value)?;
        debug!(path = %path.display(), decoys = scenario.fp_markers.len(), "Scenario loaded");
        Ok(scenario)
    }

    /// Flatten every component.
    pub fn to_vectors(&self) -> ScenarioVectors {
        ScenarioVectors {
            tp_marker: self.tp_marker.to_vector(),
            drone_start_pose: self.drone_start_pose.to_vector(),
            gps_pose: self.gps_pose.to_vector(),
            radius: self.radius,
            weather: self.weather.to_vector(),
            time: self.time.to_vector(),
            fp_markers: self.fp_markers.iter().map(Component::to_vector).collect(),
            actors: self.actors.iter().map(Component::to_vector).collect(),
        }
    }

    /// Inverse of [`to_vectors`](Self::to_vectors).
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if any vector has the wrong length or holds an
    /// out-of-domain value.
    pub fn from_vectors(vectors: &ScenarioVectors) -> Result<Self, DecodeError> {
        Ok(Self {
            tp_marker: Marker::from_vector(&vectors.tp_marker)?,
            fp_markers: vectors
                .fp_markers
                .iter()
                .map(|v| Marker::from_vector(v))
                .collect::<Result<_, _>>()?,
            drone_start_pose: Pose::from_vector(&vectors.drone_start_pose)?,
            gps_pose: Pose::from_vector(&vectors.gps_pose)?,
            radius: check_radius(vectors.radius)?,
            actors: vectors
                .actors
                .iter()
                .map(|v| Actor::from_vector(v))
                .collect::<Result<_, _>>()?,
            weather: Weather::from_vector(&vectors.weather)?,
            time: TimeOfDay::from_vector(&vectors.time)?,
        })
    }

    /// Mutate with the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRate`] if `rate` is outside `[0, 1]`;
    /// the scenario is untouched in that case.
    pub fn mutate(&mut self, rate: f64, rng: &mut impl Rng) -> Result<(), DomainError> {
        self.mutate_with(rate, MutationPolicy::default(), rng)
    }

    /// Mutate every component in place, then mutate the actor list's length.
    ///
    /// Order: target marker, drone start pose, reach pose, weather, time,
    /// radius (`U[-3, 3]`, unclamped), each decoy, then the actors.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRate`] if `rate` or the policy's actor
    /// rate is outside `[0, 1]`; the scenario is untouched in that case.
    pub fn mutate_with(
        &mut self,
        rate: f64,
        policy: MutationPolicy,
        rng: &mut impl Rng,
    ) -> Result<(), DomainError> {
        check_rate(rate)?;
        check_rate(policy.actor_rate)?;

        self.tp_marker.mutate(rate, rng)?;
        self.drone_start_pose.mutate(rate, rng)?;
        self.gps_pose.mutate(rate, rng)?;
        self.weather.mutate(rate, rng)?;
        self.time.mutate(rate, rng)?;
        if fires(rate, rng) {
            self.radius += rng.random_range(-RADIUS_STEP..=RADIUS_STEP);
        }
        for marker in &mut self.fp_markers {
            marker.mutate(rate, rng)?;
        }

        let delta = if fires(rate, rng) {
            rng.random_range(-ACTOR_COUNT_STEP..=ACTOR_COUNT_STEP)
        } else {
            0
        };
        self.resize_actors(delta, policy, rng)
    }

    /// Move the actor count by `delta`, then mutate the surviving actors at
    /// the policy's actor rate.
    ///
    /// A target count of zero or less empties the list. A smaller count
    /// truncates from the end. A larger count keeps every actor and, under
    /// [`ActorGrowth::Sample`], appends new ones around the reach pose.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidRate`] if the actor rate is outside `[0, 1]`.
    pub fn resize_actors(
        &mut self,
        delta: i64,
        policy: MutationPolicy,
        rng: &mut impl Rng,
    ) -> Result<(), DomainError> {
        check_rate(policy.actor_rate)?;

        let len = i64::try_from(self.actors.len()).unwrap_or(i64::MAX);
        let target = len.saturating_add(delta);
        let Ok(target) = usize::try_from(target) else {
            self.actors.clear();
            return Ok(());
        };
        if target == 0 {
            self.actors.clear();
            return Ok(());
        }

        self.actors.truncate(target);
        for actor in &mut self.actors {
            actor.mutate(policy.actor_rate, rng)?;
        }

        if policy.actor_growth == ActorGrowth::Sample {
            let anchor = self.actor_anchor();
            while self.actors.len() < target {
                let dynamic = rng.random_bool(0.5);
                self.actors
                    .push(sample_actor(&anchor, GROWTH_RADIUS, dynamic, rng));
            }
        }
        Ok(())
    }

    /// Where new actors are centred: under the reach pose, at marker height.
    pub const fn actor_anchor(&self) -> Position {
        Position::new(
            self.gps_pose.position.x,
            self.gps_pose.position.y,
            self.tp_marker.pose.position.z,
        )
    }

    /// Every marker in placement order: the target first, then the decoys.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        std::iter::once(&self.tp_marker).chain(&self.fp_markers)
    }

    /// Recombine two scenarios into two children.
    ///
    /// Poses, weather and time use split-point crossover. The radius and the
    /// decoy and actor lists are swapped whole: the first child takes the
    /// second parent's, and vice versa. The target marker follows `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if a component's recombined vector fails to
    /// decode.
    pub fn crossover(
        first: &Self,
        second: &Self,
        target: TargetMarkerCrossover,
    ) -> Result<(Self, Self), DomainError> {
        let (tp_1, tp_2) = match target {
            TargetMarkerCrossover::SelfCross => {
                Marker::crossover(&first.tp_marker, &first.tp_marker)?
            }
            TargetMarkerCrossover::CrossParent => {
                Marker::crossover(&first.tp_marker, &second.tp_marker)?
            }
        };
        let (start_1, start_2) = Pose::crossover(&first.drone_start_pose, &second.drone_start_pose)?;
        let (gps_1, gps_2) = Pose::crossover(&first.gps_pose, &second.gps_pose)?;
        let (weather_1, weather_2) = Weather::crossover(&first.weather, &second.weather)?;
        let (time_1, time_2) = TimeOfDay::crossover(&first.time, &second.time)?;

        Ok((
            Self {
                tp_marker: tp_1,
                fp_markers: second.fp_markers.clone(),
                drone_start_pose: start_1,
                gps_pose: gps_1,
                radius: second.radius,
                actors: second.actors.clone(),
                weather: weather_1,
                time: time_1,
            },
            Self {
                tp_marker: tp_2,
                fp_markers: first.fp_markers.clone(),
                drone_start_pose: start_2,
                gps_pose: gps_2,
                radius: first.radius,
                actors: first.actors.clone(),
                weather: weather_2,
                time: time_2,
            },
        ))
    }
}

fn check_radius(radius: f64) -> Result<f64, DecodeError> {
    if radius.is_finite() {
        Ok(radius)
    } else {
        Err(DecodeError::OutOfDomain {
            component: COMPONENT,
            field: "radius",
            value: radius,
            expected: "a finite number",
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use landfall_types::{ActorKind, MarkerId, MoveMode, Orientation};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn marker(id: u8, x: f64, y: f64) -> Marker {
        Marker::new(MarkerId::new(id).unwrap(), 0, Pose::at(Position::new(x, y, -0.5)))
    }

    fn actor(kind: ActorKind, x: f64) -> Actor {
        Actor::new(
            kind,
            MoveMode::Straight,
            Pose::at(Position::new(x, 1.0, -0.5)),
            Pose::at(Position::new(x + 5.0, 1.0, -0.5)),
            0.5,
        )
    }

    fn scenario(actors: usize) -> Scenario {
        Scenario {
            tp_marker: marker(0, 10.0, -12.0),
            fp_markers: vec![marker(1, 12.0, -10.0), marker(2, 7.0, -15.0)],
            drone_start_pose: Pose::default(),
            gps_pose: Pose::new(Position::new(8.0, -9.0, -20.0), Orientation::from_yaw(0.5)),
            radius: 6.0,
            actors: (0..actors)
                .map(|i| actor(ActorKind::Person, f64::from(u32::try_from(i).unwrap())))
                .collect(),
            weather: Weather::uniform(0.1),
            time: TimeOfDay::new(0.4, 0.6),
        }
    }

    fn frozen_actors() -> MutationPolicy {
        MutationPolicy {
            actor_rate: 0.0,
            ..MutationPolicy::default()
        }
    }

    fn other() -> Scenario {
        Scenario {
            tp_marker: marker(5, -3.0, 4.0),
            fp_markers: vec![marker(1, 0.0, 0.0)],
            drone_start_pose: Pose::at(Position::new(1.0, 2.0, -3.0)),
            gps_pose: Pose::at(Position::new(-1.0, 3.0, -15.0)),
            radius: 2.5,
            actors: vec![actor(ActorKind::Bird, 40.0)],
            weather: Weather::CALM,
            time: TimeOfDay::new(0.9, 0.1),
        }
    }

    #[test]
    fn record_keys_follow_persisted_layout() {
        let record = scenario(1).to_record();
        for key in [
            "tp_marker",
            "drone_start_pose",
            "gps_pose",
            "radius",
            "weather",
            "time",
            "fp_markers",
            "actors",
        ] {
            assert!(record.get(key).is_some(), "missing {key}");
        }
        assert_eq!(record["fp_markers"].as_array().unwrap().len(), 2);
        assert_eq!(record["actors"][0]["type"], "person");
    }

    #[test]
    fn record_round_trip() {
        let s = scenario(3);
        assert_eq!(Scenario::from_record(&s.to_record()).unwrap(), s);
    }

    #[test]
    fn record_missing_key_is_rejected() {
        let mut record = scenario(0).to_record();
        record.as_object_mut().unwrap().remove("gps_pose");
        assert!(matches!(
            Scenario::from_record(&record),
            Err(DecodeError::Record { component: "scenario", .. })
        ));
    }

    #[test]
    fn record_with_bad_nested_marker_is_rejected() {
        let mut record = scenario(0).to_record();
        record["fp_markers"][1]["id"] = json!(9);
        assert!(Scenario::from_record(&record).is_err());
    }

    #[test]
    fn vectors_round_trip() {
        let s = scenario(2);
        let vectors = s.to_vectors();
        assert_eq!(vectors.fp_markers.len(), 2);
        assert_eq!(vectors.actors.len(), 2);
        assert!(vectors.actors.iter().all(|v| v.len() == Actor::VECTOR_LEN));
        assert_eq!(Scenario::from_vectors(&vectors).unwrap(), s);
    }

    #[test]
    fn vectors_serialize() {
        let vectors = scenario(1).to_vectors();
        let text = serde_json::to_string(&vectors).unwrap();
        let back: ScenarioVectors = serde_json::from_str(&text).unwrap();
        assert_eq!(back, vectors);
    }

    #[test]
    fn non_finite_radius_is_rejected() {
        let mut vectors = scenario(0).to_vectors();
        vectors.radius = f64::NAN;
        assert!(matches!(
            Scenario::from_vectors(&vectors),
            Err(DecodeError::OutOfDomain { field: "radius", .. })
        ));
    }

    #[test]
    fn shrinking_past_zero_empties_actors() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(3);
        s.resize_actors(-5, MutationPolicy::default(), &mut rng)
            .unwrap();
        assert!(s.actors.is_empty());
    }

    #[test]
    fn shrinking_truncates_from_the_end() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(3);
        s.resize_actors(-1, frozen_actors(), &mut rng).unwrap();
        assert_eq!(s.actors, scenario(3).actors.into_iter().take(2).collect::<Vec<_>>());
    }

    #[test]
    fn growing_keeps_list_by_default() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(1);
        s.resize_actors(2, frozen_actors(), &mut rng).unwrap();
        assert_eq!(s.actors, scenario(1).actors);
    }

    #[test]
    fn growing_samples_when_asked() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(1);
        let policy = MutationPolicy {
            actor_growth: ActorGrowth::Sample,
            actor_rate: 0.0,
        };
        s.resize_actors(2, policy, &mut rng).unwrap();
        assert_eq!(s.actors.len(), 3);
        assert_eq!(s.actors.first(), scenario(1).actors.first());
        let anchor = s.actor_anchor();
        for a in s.actors.iter().skip(1) {
            assert!(a.start_pose.position.distance_2d(&anchor) <= GROWTH_RADIUS + 1e-9);
        }
    }

    #[test]
    fn empty_list_stays_empty_without_growth() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(0);
        s.resize_actors(2, MutationPolicy::default(), &mut rng)
            .unwrap();
        assert!(s.actors.is_empty());
    }

    #[test]
    fn survivors_mutate_at_the_actor_rate() {
        let changed = (0..50_u64)
            .filter(|seed| {
                let mut rng = SmallRng::seed_from_u64(*seed);
                let mut s = scenario(3);
                s.mutate_with(0.0, MutationPolicy::default(), &mut rng)
                    .unwrap();
                assert_eq!(s.actors.len(), 3);
                assert_eq!(s.fp_markers, scenario(3).fp_markers);
                s.actors != scenario(3).actors
            })
            .count();
        assert!(changed > 0);
    }

    #[test]
    fn zero_actor_rate_freezes_survivors() {
        for seed in 0..50_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut s = scenario(3);
            s.mutate_with(1.0, frozen_actors(), &mut rng).unwrap();
            let survivors = s.actors.len();
            let expected: Vec<_> = scenario(3).actors.into_iter().take(survivors).collect();
            assert_eq!(s.actors, expected);
        }
    }

    #[test]
    fn invalid_actor_rate_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(2);
        let policy = MutationPolicy {
            actor_rate: 2.0,
            ..MutationPolicy::default()
        };
        assert!(matches!(
            s.mutate_with(0.3, policy, &mut rng),
            Err(DomainError::InvalidRate { .. })
        ));
        assert_eq!(s, scenario(2));
    }

    #[test]
    fn invalid_rate_leaves_scenario_untouched() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = scenario(2);
        assert!(matches!(
            s.mutate(-0.5, &mut rng),
            Err(DomainError::InvalidRate { .. })
        ));
        assert_eq!(s, scenario(2));
    }

    #[test]
    fn mutation_keeps_scenario_decodable() {
        for seed in 0..100_u64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut s = scenario(3);
            for _ in 0..10 {
                s.mutate(1.0, &mut rng).unwrap();
            }
            assert!(s.actors.len() <= 3);
            assert!(s.tp_marker.pose.position.x.abs() <= 100.0);
            assert!(s.weather.channels().iter().all(|c| (0.0..=0.5).contains(c)));
            assert_eq!(Scenario::from_vectors(&s.to_vectors()).unwrap(), s);
        }
    }

    #[test]
    fn zero_rate_mutation_is_identity() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut s = scenario(2);
        s.mutate(0.0, &mut rng).unwrap();
        assert_eq!(s, scenario(2));
    }

    #[test]
    fn crossover_swaps_lists_and_radius() {
        let a = scenario(2);
        let b = other();
        let (c1, c2) = Scenario::crossover(&a, &b, TargetMarkerCrossover::SelfCross).unwrap();

        assert_eq!(c1.fp_markers, b.fp_markers);
        assert_eq!(c1.actors, b.actors);
        assert_eq!(c1.radius, b.radius);
        assert_eq!(c2.fp_markers, a.fp_markers);
        assert_eq!(c2.actors, a.actors);
        assert_eq!(c2.radius, a.radius);

        // Self-cross keeps the first parent's target in both children.
        assert_eq!(c1.tp_marker, a.tp_marker);
        assert_eq!(c2.tp_marker, a.tp_marker);

        let (t1, t2) = TimeOfDay::crossover(&a.time, &b.time).unwrap();
        assert_eq!((c1.time, c2.time), (t1, t2));
    }

    #[test]
    fn crossover_can_mix_target_markers() {
        let a = scenario(0);
        let b = other();
        let (c1, c2) = Scenario::crossover(&a, &b, TargetMarkerCrossover::CrossParent).unwrap();
        let (m1, m2) = Marker::crossover(&a.tp_marker, &b.tp_marker).unwrap();
        assert_eq!(c1.tp_marker, m1);
        assert_eq!(c2.tp_marker, m2);
        assert_eq!(c1.tp_marker.id, a.tp_marker.id);
        assert_eq!(c2.tp_marker.id, b.tp_marker.id);
    }

    #[test]
    fn crossover_leaves_parents_alone() {
        let a = scenario(1);
        let b = other();
        let _children = Scenario::crossover(&a, &b, TargetMarkerCrossover::CrossParent).unwrap();
        assert_eq!(a, scenario(1));
        assert_eq!(b, other());
    }

    #[test]
    fn markers_lists_target_first() {
        let s = scenario(0);
        let ids: Vec<u8> = s.markers().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
