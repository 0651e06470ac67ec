#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use circuit_evo::{GenerationSummary, RunHistory};

fn summary(generation: u32, best_fitness: f32, time_record: Option<u32>) -> GenerationSummary {
    GenerationSummary {
        generation,
        best_fitness,
        mean_fitness: best_fitness / 2.0,
        time_record,
        reached_count: usize::from(time_record.is_some()),
        collided_count: 0,
        pool_size: 100,
        uniform_fallback: false,
    }
}

#[test]
fn test_history_is_bounded() {
    let mut history = RunHistory {
        max_history: 3,
        ..RunHistory::default()
    };

    for generation in 1..=5 {
        history.record(summary(generation, generation as f32, None));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.summaries.front().map(|s| s.generation), Some(3));
    assert_eq!(history.last().map(|s| s.generation), Some(5));
    assert_eq!(history.avg_best_fitness(), 4.0);
}

#[test]
fn test_best_time_record_survives_eviction() {
    let mut history = RunHistory {
        max_history: 1,
        ..RunHistory::default()
    };

    history.record(summary(1, 1.0, Some(180)));
    history.record(summary(2, 1.0, None));
    history.record(summary(3, 1.0, Some(210)));

    assert_eq!(history.best_time_record, Some(180));
    assert_eq!(history.avg_reached_count(), 1.0);
}

#[test]
fn test_empty_history() {
    let history = RunHistory::default();

    assert!(history.is_empty());
    assert_eq!(history.last(), None);
    assert_eq!(history.avg_best_fitness(), 0.0);
    assert_eq!(history.best_time_record, None);
}

#[test]
fn test_history_round_trips_through_json_file() {
    let mut history = RunHistory::default();
    history.record(summary(1, 0.5, Some(42)));
    let path = std::env::temp_dir().join(format!("circuit_evo_history_{}.json", std::process::id()));

    history.save_to_file(&path).expect("temp dir is writable");
    let json = std::fs::read_to_string(&path).expect("file was written");
    let loaded: RunHistory = serde_json::from_str(&json).expect("valid json");

    assert_eq!(loaded.summaries, history.summaries);
    assert_eq!(loaded.best_time_record, Some(42));
    std::fs::remove_file(&path).ok();
}
