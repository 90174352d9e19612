//! Putting scenarios into the world.
//!
//! [`validate_scenario`] runs the place / settle / check loop for every
//! marker, mutating markers that land badly until they settle or the attempt
//! budget runs out. [`load_scenario`] and [`run_scenario`] stage an accepted
//! scenario and set its actors moving. [`generate_scenario`] samples a fresh
//! scenario using the world's ground heights.

use std::fmt;
use std::time::Duration;

use landfall_components::{Actor, Component, Marker};
use landfall_scenario::{PlacementConfig, Scenario, ScenarioGenerator, Site};
use landfall_types::Position;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::backend::{DRONE_NAME, ObjectKind, SimBackend};
use crate::error::PlacementError;

/// A marker that passed every placement check.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedMarker {
    /// Object name in the world.
    pub name: String,
    /// Where the marker came to rest.
    pub position: Position,
    /// Attempts it took, counting the successful one.
    pub attempts: u32,
}

/// Outcome of [`validate_scenario`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementReport {
    /// Accepted markers, target first.
    pub accepted: Vec<AcceptedMarker>,
}

impl PlacementReport {
    /// Attempts spent across every marker.
    pub fn total_attempts(&self) -> u32 {
        self.accepted
            .iter()
            .fold(0_u32, |sum, m| sum.saturating_add(m.attempts))
    }
}

/// An actor that the world agreed to spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedActor {
    /// Object name in the world.
    pub name: String,
    /// The actor as loaded.
    pub actor: Actor,
}

/// Outcome of [`load_scenario`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedScenario {
    /// Actors that were spawned, in scenario order.
    pub actors: Vec<SpawnedActor>,
    /// Names of objects the world refused to place.
    pub refused: Vec<String>,
}

enum Rejection {
    Refused,
    NotGrounded { gap: f64 },
    TooClose { distance: f64 },
    NotFlat { spread: Option<f64> },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refused => write!(f, "placement refused"),
            Self::NotGrounded { gap } => write!(f, "resting {gap:.2} from the ground"),
            Self::TooClose { distance } => write!(f, "{distance:.2} from an accepted marker"),
            Self::NotFlat { spread: Some(spread) } => write!(f, "depth spread {spread:.2}"),
            Self::NotFlat { spread: None } => write!(f, "no depth readings"),
        }
    }
}

/// Name of the world object backing a marker: the target when `slot` is
/// `None`, otherwise decoy number `slot`.
pub fn marker_object_name(marker: &Marker, slot: Option<usize>) -> String {
    slot.map_or_else(|| marker.object_name(), |slot| marker.decoy_object_name(slot))
}

/// Settle every marker of `scenario` in the world.
///
/// The target marker goes first, then each decoy in order. Every marker has
/// its own world object (see [`marker_object_name`]), so accepting one never
/// moves another. A marker is placed at its pose and given `settle_ms` to
/// come to rest. It is accepted
/// when it rests within `height_threshold` of the ground under it, when (for
/// decoys) it is more than `decoy_separation` from every marker accepted
/// before it, and when the depth spread under it is within
/// `flatness_tolerance` (if one is set). A rejected marker is mutated at
/// `mutation_rate` and tried again; if the mutation changes its id, the
/// object placed under the old name is removed first.
///
/// # Errors
///
/// Returns [`PlacementError::PlacementFailed`] when a marker exhausts
/// `max_attempts`, and passes backend and mutation failures through.
pub async fn validate_scenario<B: SimBackend>(
    backend: &mut B,
    scenario: &mut Scenario,
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<PlacementReport, PlacementError> {
    let mut report = PlacementReport::default();

    let target = settle_marker(backend, &mut scenario.tp_marker, None, &[], config, rng).await?;
    report.accepted.push(target);

    for (slot, decoy) in scenario.fp_markers.iter_mut().enumerate() {
        let placed: Vec<Position> = report.accepted.iter().map(|m| m.position).collect();
        let accepted = settle_marker(backend, decoy, Some(slot), &placed, config, rng).await?;
        report.accepted.push(accepted);
    }

    info!(
        markers = report.accepted.len(),
        attempts = report.total_attempts(),
        "Scenario placement validated"
    );
    Ok(report)
}

async fn settle_marker<B: SimBackend>(
    backend: &mut B,
    marker: &mut Marker,
    slot: Option<usize>,
    placed: &[Position],
    config: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<AcceptedMarker, PlacementError> {
    let settle = Duration::from_millis(config.settle_ms);
    let separation = slot.map(|_| config.decoy_separation);
    let mut name = marker_object_name(marker, slot);

    for attempt in 1..=config.max_attempts {
        match try_marker(backend, marker, &name, placed, separation, config, settle).await? {
            Ok(position) => {
                debug!(marker = %name, attempt, "Marker accepted");
                return Ok(AcceptedMarker {
                    name,
                    position,
                    attempts: attempt,
                });
            }
            Err(rejection) => {
                debug!(marker = %name, attempt, %rejection, "Marker rejected");
                marker.mutate(config.mutation_rate, rng)?;
                let renamed = marker_object_name(marker, slot);
                if renamed != name {
                    backend.remove_object(&name).await?;
                    name = renamed;
                }
            }
        }
    }

    warn!(marker = %name, attempts = config.max_attempts, "Marker placement failed");
    Err(PlacementError::PlacementFailed {
        name,
        attempts: config.max_attempts,
    })
}

async fn try_marker<B: SimBackend>(
    backend: &mut B,
    marker: &Marker,
    name: &str,
    placed: &[Position],
    separation: Option<f64>,
    config: &PlacementConfig,
    settle: Duration,
) -> Result<Result<Position, Rejection>, PlacementError> {
    if !backend
        .spawn_or_place(name, &ObjectKind::marker(marker.id), &marker.pose)
        .await?
    {
        return Ok(Err(Rejection::Refused));
    }
    tokio::time::sleep(settle).await;

    let pose = backend.query_pose(name).await?;
    let position = pose.position;
    let ground = backend
        .query_ground_height(position.x, position.y)
        .await?;

    let gap = (position.z - ground).abs();
    let grounded = gap <= config.height_threshold;
    if !grounded {
        return Ok(Err(Rejection::NotGrounded { gap }));
    }

    if let Some(min_distance) = separation {
        let nearest = placed
            .iter()
            .map(|p| p.distance_2d(&position))
            .fold(f64::INFINITY, f64::min);
        let clear = nearest > min_distance;
        if !clear {
            return Ok(Err(Rejection::TooClose { distance: nearest }));
        }
    }

    if let Some(tolerance) = config.flatness_tolerance {
        let patch = backend.query_depth_patch(&pose).await?;
        let spread = depth_spread(&patch);
        if !spread.is_some_and(|s| s <= tolerance) {
            return Ok(Err(Rejection::NotFlat { spread }));
        }
    }

    Ok(Ok(position))
}

/// `max - min` over the finite depths of a patch, or `None` if it has none.
pub fn depth_spread(patch: &[Vec<f64>]) -> Option<f64> {
    let (min, max) = patch
        .iter()
        .flatten()
        .copied()
        .filter(|d| d.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        });
    (min <= max).then(|| max - min)
}

/// Stage an accepted scenario in the world.
///
/// Places the drone at its start pose, then the target and decoy markers
/// under the names [`validate_scenario`] uses,
/// applies weather (each channel capped at 1) and time of day, and spawns
/// every actor at its start pose as `{kind}_{index}`.
///
/// # Errors
///
/// Passes backend failures through. Objects the world refuses are listed in
/// [`LoadedScenario::refused`] instead.
pub async fn load_scenario<B: SimBackend>(
    backend: &mut B,
    scenario: &Scenario,
) -> Result<LoadedScenario, PlacementError> {
    let mut loaded = LoadedScenario::default();

    if !backend
        .spawn_or_place(DRONE_NAME, &ObjectKind::Vehicle, &scenario.drone_start_pose)
        .await?
    {
        warn!(object = DRONE_NAME, "World refused placement");
        loaded.refused.push(DRONE_NAME.to_owned());
    }

    let slots = std::iter::once(None).chain((0..scenario.fp_markers.len()).map(Some));
    for (marker, slot) in scenario.markers().zip(slots) {
        let name = marker_object_name(marker, slot);
        if !backend
            .spawn_or_place(&name, &ObjectKind::marker(marker.id), &marker.pose)
            .await?
        {
            warn!(object = %name, "World refused placement");
            loaded.refused.push(name);
        }
    }

    backend
        .set_weather(scenario.weather.channels().map(|c| c.min(1.0)))
        .await?;
    let (hour, minute) = scenario.time.clock_time();
    backend.set_time_of_day(hour, minute).await?;

    for (index, actor) in scenario.actors.iter().enumerate() {
        let name = actor.object_name(index);
        if backend
            .spawn_or_place(&name, &ObjectKind::actor(actor), &actor.start_pose)
            .await?
        {
            loaded.actors.push(SpawnedActor {
                name,
                actor: *actor,
            });
        } else {
            warn!(object = %name, "World refused placement");
            loaded.refused.push(name);
        }
    }

    info!(
        actors = loaded.actors.len(),
        refused = loaded.refused.len(),
        hour,
        minute,
        "Scenario loaded"
    );
    Ok(loaded)
}

/// Send every spawned person and bird towards its end pose.
///
/// Marker-kind actors stay where they are. Returns how many actors were
/// commanded.
///
/// # Errors
///
/// Passes backend failures through.
pub async fn run_scenario<B: SimBackend>(
    backend: &mut B,
    loaded: &LoadedScenario,
) -> Result<usize, PlacementError> {
    let mut moved: usize = 0;
    for spawned in loaded.actors.iter().filter(|s| s.actor.kind.is_mobile()) {
        backend
            .move_to(&spawned.name, &spawned.actor.end_pose, spawned.actor.speed)
            .await?;
        moved = moved.saturating_add(1);
    }
    info!(moved, "Scenario running");
    Ok(moved)
}

/// Sample a scenario using the world's ground heights.
///
/// Draws the marker site, asks the world for the ground height there (and at
/// the origin when the drone start is snapped), then builds the scenario.
///
/// # Errors
///
/// Passes backend failures through.
pub async fn generate_scenario<B: SimBackend>(
    backend: &mut B,
    generator: &ScenarioGenerator,
    rng: &mut impl Rng,
) -> Result<Scenario, PlacementError> {
    let (x, y) = generator.sample_site(rng);
    let ground_z = backend.query_ground_height(x, y).await?;
    let origin_ground_z = if generator.snaps_drone() {
        backend.query_ground_height(0.0, 0.0).await?
    } else {
        0.0
    };

    let scenario = generator.build(
        &Site {
            x,
            y,
            ground_z,
            origin_ground_z,
        },
        rng,
    );
    debug!(
        x,
        y,
        ground_z,
        decoys = scenario.fp_markers.len(),
        actors = scenario.actors.len(),
        "Scenario generated"
    );
    Ok(scenario)
}
