#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use neuroflap::simulation::episode::EpisodeStatus;
use neuroflap::simulation::event_log::{EVENT_LOG_CAPACITY, EventKind, EventLog};
use neuroflap::simulation::history::{GenerationReport, History};

fn report(generation: u32, max_score: u32, mean_fitness: f64, reinitialized: bool) -> GenerationReport {
    GenerationReport {
        generation,
        ticks: 100,
        status: EpisodeStatus::Extinct,
        max_score,
        best_score: max_score,
        best_fitness: u64::from(max_score) * 100 + 100,
        mean_fitness,
        survivor_spread: 0.0,
        reinitialized,
    }
}

#[test]
fn test_empty_history_averages() {
    let history = History::new(5);

    assert!(history.latest().is_none());
    assert_eq!(history.avg_max_score(), 0.0);
    assert_eq!(history.avg_mean_fitness(), 0.0);
    assert_eq!(history.reinitialized_count(), 0);
}

#[test]
fn test_history_keeps_most_recent_reports() {
    let mut history = History::new(3);
    for generation in 1..=5 {
        history.record(report(generation, generation, 10.0, false));
    }

    assert_eq!(history.reports.len(), 3);
    let kept: Vec<u32> = history.reports.iter().map(|r| r.generation).collect();
    assert_eq!(kept, vec![3, 4, 5]);
    assert_eq!(history.latest().map(|r| r.generation), Some(5));
}

#[test]
fn test_history_averages() {
    let mut history = History::new(10);
    history.record(report(1, 0, 40.0, true));
    history.record(report(2, 2, 180.0, false));
    history.record(report(3, 4, 320.0, false));
    history.record(report(4, 0, 60.0, true));

    assert_eq!(history.avg_max_score(), 1.5);
    assert_eq!(history.avg_mean_fitness(), 150.0);
    assert_eq!(history.reinitialized_count(), 2);
}

#[test]
fn test_averages_only_cover_kept_reports() {
    let mut history = History::new(2);
    history.record(report(1, 0, 0.0, true));
    history.record(report(2, 3, 300.0, false));
    history.record(report(3, 5, 500.0, false));

    assert_eq!(history.avg_max_score(), 4.0);
    assert_eq!(history.avg_mean_fitness(), 400.0);
    assert_eq!(history.reinitialized_count(), 0);
}

#[test]
fn test_event_log_is_newest_first_and_bounded() {
    let mut log = EventLog::default();
    assert!(log.events().is_empty());

    log.log(1, EventKind::NewBest, "New best score 1");
    log.log(2, EventKind::Reinitialized, String::from("reset"));
    assert_eq!(log.events()[0].generation, 2);
    assert_eq!(log.events()[0].kind, EventKind::Reinitialized);
    assert_eq!(log.events()[1].description, "New best score 1");

    for generation in 3..40 {
        log.log(generation, EventKind::NewBest, format!("New best score {generation}"));
    }
    assert_eq!(log.events().len(), EVENT_LOG_CAPACITY);
    assert_eq!(log.events().front().map(|e| e.generation), Some(39));
    assert_eq!(
        log.events().back().map(|e| e.generation),
        Some(40 - EVENT_LOG_CAPACITY as u32)
    );
}
