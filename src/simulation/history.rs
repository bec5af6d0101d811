use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::episode::EpisodeStatus;

/// Summary of one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generation index, starting at 1.
    pub generation: u32,
    /// Ticks the episode lasted.
    pub ticks: u64,
    /// How the episode ended.
    pub status: EpisodeStatus,
    /// Highest score in this generation.
    pub max_score: u32,
    /// Highest score seen in any generation so far.
    pub best_score: u32,
    /// Highest fitness in this generation.
    pub best_fitness: u64,
    /// Mean fitness over the population.
    pub mean_fitness: f64,
    /// Mean parameter distance from the survivors to the fittest bird.
    pub survivor_spread: f32,
    /// Whether the next population was drawn from scratch.
    pub reinitialized: bool,
}

/// Recent generation reports, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// Recent reports.
    pub reports: VecDeque<GenerationReport>,
    /// Maximum number of reports to keep.
    pub max_history: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(100)
    }
}

impl History {
    /// Creates an empty history keeping at most `max_history` reports.
    pub fn new(max_history: usize) -> Self {
        Self {
            reports: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Records a report, dropping the oldest one when full.
    pub fn record(&mut self, report: GenerationReport) {
        self.reports.push_back(report);
        while self.reports.len() > self.max_history {
            self.reports.pop_front();
        }
    }

    /// Most recent report.
    pub fn latest(&self) -> Option<&GenerationReport> {
        self.reports.back()
    }

    /// Average of the per-generation max scores over the kept reports.
    pub fn avg_max_score(&self) -> f64 {
        if self.reports.is_empty() {
            0.0
        } else {
            self.reports.iter().map(|r| r.max_score as f64).sum::<f64>()
                / self.reports.len() as f64
        }
    }

    /// Average of the per-generation mean fitness over the kept reports.
    pub fn avg_mean_fitness(&self) -> f64 {
        if self.reports.is_empty() {
            0.0
        } else {
            self.reports.iter().map(|r| r.mean_fitness).sum::<f64>() / self.reports.len() as f64
        }
    }

    /// Number of kept reports whose next population was drawn from scratch.
    pub fn reinitialized_count(&self) -> usize {
        self.reports.iter().filter(|r| r.reinitialized).count()
    }
}
