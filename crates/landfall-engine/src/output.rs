//! Scenario files and the run manifest.

use std::path::Path;

use chrono::{DateTime, Utc};
use landfall_scenario::{Scenario, ScenarioError};
use serde::Serialize;

use crate::error::EngineError;
use crate::population::Rehearsal;

/// Name of the manifest written next to the scenario files.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of one driver run.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Seed every random draw came from.
    pub seed: u64,
    /// Scenarios in the final population.
    pub population_size: usize,
    /// Variation rounds run.
    pub generations: u32,
    /// One entry per written scenario, in file order.
    pub scenarios: Vec<ManifestEntry>,
}

/// One written scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    /// File name inside the output directory.
    pub file: String,
    /// Decoy markers in the scenario.
    pub decoys: usize,
    /// Actors in the scenario.
    pub actors: usize,
    /// Whether every marker passed placement in the final rehearsal.
    pub placed: bool,
    /// Placement attempts spent in the final rehearsal.
    pub placement_attempts: u32,
    /// Actors sent moving in the final rehearsal.
    pub moved_actors: usize,
}

impl ManifestEntry {
    /// Describe `scenario` as written to `file`.
    pub fn new(file: String, scenario: &Scenario, rehearsal: Option<Rehearsal>) -> Self {
        Self {
            file,
            decoys: scenario.fp_markers.len(),
            actors: scenario.actors.len(),
            placed: rehearsal.is_some(),
            placement_attempts: rehearsal.map_or(0, |r| r.attempts),
            moved_actors: rehearsal.map_or(0, |r| r.moved),
        }
    }
}

/// `scenario_{index:03}.json`.
pub fn scenario_file_name(index: usize) -> String {
    format!("scenario_{index:03}.json")
}

/// Save `scenario` into `dir` and return the file name used.
pub fn write_scenario(dir: &Path, index: usize, scenario: &Scenario) -> Result<String, ScenarioError> {
    let file = scenario_file_name(index);
    scenario.save(&dir.join(&file))?;
    Ok(file)
}

/// Write `manifest` into `dir` as pretty-printed JSON.
pub fn write_manifest(dir: &Path, manifest: &Manifest) -> Result<(), EngineError> {
    let text = serde_json::to_string_pretty(manifest)?;
    std::fs::write(dir.join(MANIFEST_FILE), text)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::path::PathBuf;

    use landfall_scenario::{GeneratorConfig, ScenarioGenerator, Site};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("landfall-engine-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sample() -> Scenario {
        let generator = ScenarioGenerator::new(GeneratorConfig {
            decoy_count: 2,
            actor_count: 1,
            ..GeneratorConfig::default()
        })
        .unwrap();
        let site = Site {
            x: 3.0,
            y: -4.0,
            ground_z: 0.0,
            origin_ground_z: 0.0,
        };
        generator.build(&site, &mut SmallRng::seed_from_u64(1))
    }

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(scenario_file_name(0), "scenario_000.json");
        assert_eq!(scenario_file_name(42), "scenario_042.json");
        assert_eq!(scenario_file_name(1234), "scenario_1234.json");
    }

    #[test]
    fn written_scenarios_load_back() {
        let dir = scratch_dir("scenarios");
        let scenario = sample();
        let file = write_scenario(&dir, 7, &scenario).unwrap();
        let loaded = Scenario::load(&dir.join(&file)).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(file, "scenario_007.json");
        assert_eq!(loaded, scenario);
    }

    #[test]
    fn manifest_lists_every_scenario() {
        let dir = scratch_dir("manifest");
        let scenario = sample();
        let manifest = Manifest {
            generated_at: Utc::now(),
            seed: 42,
            population_size: 2,
            generations: 5,
            scenarios: vec![
                ManifestEntry::new(
                    scenario_file_name(0),
                    &scenario,
                    Some(Rehearsal {
                        attempts: 3,
                        moved: 1,
                    }),
                ),
                ManifestEntry::new(scenario_file_name(1), &scenario, None),
            ],
        };
        write_manifest(&dir, &manifest).unwrap();
        let text = std::fs::read_to_string(dir.join(MANIFEST_FILE)).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["seed"], 42);
        assert!(value["generated_at"].is_string());
        let entries = value["scenarios"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.first().unwrap()["decoys"], 2);
        assert_eq!(entries.first().unwrap()["placement_attempts"], 3);
        assert_eq!(entries.last().unwrap()["placed"], false);
    }
}
