//! Offline driver for the Landfall scenario engine.
//!
//! Seeds a population of placed scenarios, evolves it through the
//! configured number of variation rounds, rehearses every survivor against an
//! in-memory world and writes the results out as JSON.
//!
//! # Run Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `landfall-config.yaml`
//! 3. Seed the random source from `engine.seed`
//! 4. Generate and place the initial population
//! 5. Run the variation rounds
//! 6. Rehearse and write every scenario, then the manifest

mod error;
mod output;
mod population;

use std::path::Path;

use chrono::Utc;
use landfall_scenario::{LandfallConfig, ScenarioGenerator};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::output::{Manifest, ManifestEntry, write_manifest, write_scenario};

/// Application entry point for the driver.
///
/// # Errors
///
/// Returns an error if configuration, placement, variation or output fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("landfall-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        seed = config.engine.seed,
        population_size = config.engine.population_size,
        generations = config.engine.generations,
        output_dir = %config.engine.output_dir.display(),
        "Configuration loaded"
    );

    run(&config).await?;
    Ok(())
}

async fn run(config: &LandfallConfig) -> Result<(), EngineError> {
    let engine = &config.engine;
    let generator = ScenarioGenerator::new(config.generator.clone())?;

    // 3. Seed the random source.
    let mut rng = SmallRng::seed_from_u64(engine.seed);

    // 4. Initial population.
    let mut scenarios = population::seed_population(
        &generator,
        &config.placement,
        engine.population_size,
        &mut rng,
    )
    .await?;
    info!(scenarios = scenarios.len(), "Initial population placed");

    // 5. Variation rounds.
    for generation in 1..=engine.generations {
        scenarios = population::vary(scenarios, &config.mutation, &mut rng)?;
        let actors: usize = scenarios.iter().map(|s| s.actors.len()).sum();
        info!(generation, actors, "Variation round complete");
    }

    // 6. Rehearse and write.
    std::fs::create_dir_all(&engine.output_dir)?;
    let mut entries = Vec::with_capacity(scenarios.len());
    for (index, scenario) in scenarios.iter_mut().enumerate() {
        let rehearsal = population::rehearse(scenario, &config.placement, &mut rng).await?;
        let file = write_scenario(&engine.output_dir, index, scenario)?;
        entries.push(ManifestEntry::new(file, scenario, rehearsal));
    }

    let placed = entries.iter().filter(|e| e.placed).count();
    let manifest = Manifest {
        generated_at: Utc::now(),
        seed: engine.seed,
        population_size: scenarios.len(),
        generations: engine.generations,
        scenarios: entries,
    };
    write_manifest(&engine.output_dir, &manifest)?;

    info!(
        written = manifest.scenarios.len(),
        placed,
        output_dir = %engine.output_dir.display(),
        "Run complete"
    );
    Ok(())
}

/// Load configuration from `landfall-config.yaml`, falling back to
/// defaults when the file does not exist.
fn load_config() -> Result<LandfallConfig, EngineError> {
    let config_path = Path::new("landfall-config.yaml");
    if config_path.exists() {
        let config = LandfallConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(LandfallConfig::parse("{}")?)
    }
}
