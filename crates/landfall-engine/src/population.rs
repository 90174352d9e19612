//! Population seeding, variation rounds and rehearsal.
//!
//! Every scenario is placed in its own fresh [`FlatWorld`], so one scenario's
//! markers never interfere with another's.

use landfall_components::DomainError;
use landfall_placement::{
    FlatWorld, PlacementError, generate_scenario, load_scenario, run_scenario, validate_scenario,
};
use landfall_scenario::{MutationConfig, PlacementConfig, Scenario, ScenarioGenerator};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::error::EngineError;

/// Ground height of the offline world.
pub const WORLD_GROUND_Z: f64 = 0.0;

/// Scenarios drawn for one population slot before the run gives up.
pub const MAX_DRAWS_PER_SLOT: u32 = 10;

/// Result of placing, loading and running one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rehearsal {
    /// Placement attempts across all markers.
    pub attempts: u32,
    /// Actors sent moving.
    pub moved: usize,
}

/// Generate `size` scenarios whose markers all pass placement.
///
/// A scenario that fails placement is discarded and a new one drawn, up to
/// [`MAX_DRAWS_PER_SLOT`] times per slot.
pub async fn seed_population(
    generator: &ScenarioGenerator,
    placement: &PlacementConfig,
    size: usize,
    rng: &mut impl Rng,
) -> Result<Vec<Scenario>, EngineError> {
    let mut population = Vec::with_capacity(size);
    for slot in 0..size {
        population.push(seed_slot(slot, generator, placement, rng).await?);
    }
    Ok(population)
}

async fn seed_slot(
    slot: usize,
    generator: &ScenarioGenerator,
    placement: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<Scenario, EngineError> {
    for draw in 1..=MAX_DRAWS_PER_SLOT {
        let mut world = FlatWorld::new(WORLD_GROUND_Z);
        let mut scenario = generate_scenario(&mut world, generator, rng).await?;
        match validate_scenario(&mut world, &mut scenario, placement, rng).await {
            Ok(report) => {
                debug!(
                    slot,
                    draw,
                    attempts = report.total_attempts(),
                    "Population slot filled"
                );
                return Ok(scenario);
            }
            Err(PlacementError::PlacementFailed { name, attempts }) => {
                warn!(slot, draw, marker = %name, attempts, "Scenario rejected, drawing again");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(EngineError::Exhausted {
        slot,
        draws: MAX_DRAWS_PER_SLOT,
    })
}

/// One variation round.
///
/// Parents are shuffled and paired off; each pair yields two children by
/// crossover. An unpaired last parent passes through unchanged. Every child
/// is then mutated at the configured rate and policy, so the population keeps
/// its size.
pub fn vary(
    mut parents: Vec<Scenario>,
    mutation: &MutationConfig,
    rng: &mut impl Rng,
) -> Result<Vec<Scenario>, DomainError> {
    parents.shuffle(rng);

    let mut children = Vec::with_capacity(parents.len());
    for pair in parents.chunks(2) {
        match pair {
            [first, second] => {
                let (c1, c2) = Scenario::crossover(first, second, mutation.target_marker)?;
                children.push(c1);
                children.push(c2);
            }
            [single] => children.push(single.clone()),
            _ => {}
        }
    }

    for child in &mut children {
        child.mutate_with(mutation.rate, mutation.policy(), rng)?;
    }
    Ok(children)
}

/// Place, load and run `scenario` in a fresh world.
///
/// Returns `None` when a marker cannot be placed. Markers that are moved to
/// pass placement stay moved in `scenario`.
pub async fn rehearse(
    scenario: &mut Scenario,
    placement: &PlacementConfig,
    rng: &mut impl Rng,
) -> Result<Option<Rehearsal>, PlacementError> {
    let mut world = FlatWorld::new(WORLD_GROUND_Z);
    let report = match validate_scenario(&mut world, scenario, placement, rng).await {
        Ok(report) => report,
        Err(PlacementError::PlacementFailed { name, attempts }) => {
            warn!(marker = %name, attempts, "Rehearsal placement failed");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    let loaded = load_scenario(&mut world, scenario).await?;
    let moved = run_scenario(&mut world, &loaded).await?;
    Ok(Some(Rehearsal {
        attempts: report.total_attempts(),
        moved,
    }))
}
