//! Integration tests for scenario persistence and variation.
//!
//! These drive the public API only: generate a scenario, push it through the
//! record and vector forms and the file helpers, and check that variation
//! operators produce scenarios that persist just as well.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::path::PathBuf;

use landfall_components::{Actor, Marker, TimeOfDay, Weather};
use landfall_scenario::{
    GeneratorConfig, MutationPolicy, Scenario, ScenarioError, ScenarioGenerator, Site,
    TargetMarkerCrossover,
};
use landfall_types::{ActorKind, MarkerId, MoveMode, Orientation, Pose, Position};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn decoy(id: u8, x: f64, y: f64) -> Marker {
    Marker::new(MarkerId::new(id).unwrap(), 0, Pose::at(Position::new(x, y, -0.4)))
}

fn two_decoys_one_actor() -> Scenario {
    Scenario {
        tp_marker: Marker::new(MarkerId::TARGET, 0, Pose::at(Position::new(10.0, -12.0, -0.5))),
        fp_markers: vec![decoy(2, 14.5, -9.0), decoy(1, 6.0, -16.25)],
        drone_start_pose: Pose::default(),
        gps_pose: Pose::new(Position::new(9.0, -8.0, -18.0), Orientation::from_yaw(-0.7)),
        radius: 8.0,
        actors: vec![Actor::new(
            ActorKind::Bird,
            MoveMode::Loop,
            Pose::at(Position::new(11.0, -7.0, 4.0)),
            Pose::at(Position::new(15.0, -2.0, 4.0)),
            0.35,
        )],
        weather: Weather::from_channels([0.1, 0.0, 0.2, 0.0, 0.3, 0.0, 0.05, 0.4, 0.15]),
        time: TimeOfDay::new(0.3, 0.7),
    }
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("landfall-{}-{name}.json", std::process::id()))
}

#[test]
fn record_round_trip_preserves_order_and_values() {
    let s = two_decoys_one_actor();
    let back = Scenario::from_record(&s.to_record()).unwrap();

    assert_eq!(back, s);
    let ids: Vec<u8> = back.fp_markers.iter().map(|m| m.id.get()).collect();
    assert_eq!(ids, vec![2, 1]);
    assert_eq!(back.actors.len(), 1);
    assert_eq!(back.actors.first().map(|a| a.mode), Some(MoveMode::Loop));
}

#[test]
fn save_and_load() {
    let path = scratch_file("save-load");
    let s = two_decoys_one_actor();
    s.save(&path).unwrap();
    let loaded = Scenario::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, s);
}

#[test]
fn saved_file_is_pretty_json_with_stable_keys() {
    let path = scratch_file("pretty");
    two_decoys_one_actor().save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(text.contains('\n'));
    assert!(text.contains("\"tp_marker\""));
    assert!(text.contains("\"road_wetness\""));
    assert!(text.contains("\"type\": \"bird\""));
}

#[test]
fn loading_garbage_fails_cleanly() {
    let path = scratch_file("garbage");
    std::fs::write(&path, "{ not json").unwrap();
    let result = Scenario::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(ScenarioError::Json { .. })));

    assert!(matches!(
        Scenario::load(&scratch_file("missing")),
        Err(ScenarioError::Io { .. })
    ));
}

#[test]
fn loading_a_legacy_record() {
    let legacy = serde_json::json!({
        "tp_marker": {
            "id": 0, "material": 0,
            "position": { "x_val": 1.0, "y_val": 2.0, "z_val": -0.5 },
            "orientation": { "x_val": 0.0, "y_val": 0.0, "z_val": 0.0, "w_val": 1.0 }
        },
        "drone_start_pose": {
            "position": { "x_val": 0.0, "y_val": 0.0, "z_val": 0.0 },
            "orientation": { "x_val": 0.0, "y_val": 0.0, "z_val": 0.0, "w_val": 1.0 }
        },
        "gps_pose": {
            "position": { "x_val": 3.0, "y_val": 1.0, "z_val": -20.0 },
            "orientation": { "x_val": 0.0, "y_val": 0.0, "z_val": 0.0, "w_val": 1.0 }
        },
        "radius": 5,
        "weather": {
            "rain": 0.1, "road_wetness": 0.1, "snow": 0.1, "road_snow": 0.1,
            "maple_leaf": 0.1, "road_leaf": 0.1, "dust": 0.1, "fog": 0.1, "wind": 0.1
        },
        "time": { "hour": 0.5, "minute": 0.25 },
        "fp_markers": [],
        "actors": []
    });
    let s = Scenario::from_record(&legacy).unwrap();
    assert_eq!(s.radius, 5.0);
    assert_eq!(s.gps_pose.position, Position::new(3.0, 1.0, -20.0));
}

#[test]
fn generated_population_survives_variation_and_persistence() {
    let generator = ScenarioGenerator::new(GeneratorConfig {
        decoy_count: 2,
        actor_count: 2,
        ..GeneratorConfig::default()
    })
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);

    let mut population: Vec<Scenario> = (0..6)
        .map(|_| {
            let (x, y) = generator.sample_site(&mut rng);
            let site = Site {
                x,
                y,
                ground_z: -1.0,
                origin_ground_z: 0.0,
            };
            generator.build(&site, &mut rng)
        })
        .collect();

    for _ in 0..5 {
        let mut next = Vec::new();
        for pair in population.chunks(2) {
            if let [a, b] = pair {
                let (mut c1, mut c2) =
                    Scenario::crossover(a, b, TargetMarkerCrossover::CrossParent).unwrap();
                c1.mutate_with(0.3, MutationPolicy::default(), &mut rng).unwrap();
                c2.mutate_with(0.3, MutationPolicy::default(), &mut rng).unwrap();
                next.push(c1);
                next.push(c2);
            }
        }
        population = next;
    }

    assert_eq!(population.len(), 6);
    for s in &population {
        assert_eq!(Scenario::from_record(&s.to_record()).unwrap(), *s);
        assert_eq!(Scenario::from_vectors(&s.to_vectors()).unwrap(), *s);
    }
}
