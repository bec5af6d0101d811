//! Generational evolution of bird brains.
//!
//! Each generation runs one episode, ranks the birds by fitness and breeds the next
//! population from the fittest survivors. The best survivors are carried over
//! unmutated so the best known brain is never lost.

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::bird::Bird;
use super::brain::Brain;
use super::episode::{Episode, EpisodeStatus};
use super::error::Result;
use super::event_log::{EventKind, EventLog};
use super::history::{GenerationReport, History};
use super::params::{Mutation, Params};
use super::pipe::{Pipe, PipeIds};

/// Returns the `k` fittest birds, fittest first.
///
/// The sort is stable: birds with equal fitness keep their population order.
pub fn select_best(birds: &[Bird], k: usize) -> Vec<&Bird> {
    let mut ranked: Vec<&Bird> = birds.iter().collect();
    ranked.sort_by(|a, b| b.fitness.cmp(&a.fitness));
    ranked.truncate(k);
    ranked
}

/// Breeds `target_size` children from uniformly sampled survivors.
///
/// Parents are drawn with replacement; each child gets a mutated copy of its
/// parent's brain and a fresh body.
pub fn breed<R: Rng + ?Sized>(
    survivors: &[&Bird],
    target_size: usize,
    mutation: Mutation,
    params: &Params,
    rng: &mut R,
) -> Vec<Bird> {
    if survivors.is_empty() {
        return Vec::new();
    }

    (0..target_size)
        .map(|_| {
            let parent = survivors[rng.random_range(0..survivors.len())];
            let mut brain = parent.brain.clone();
            brain.mutate(mutation.rate, mutation.strength, rng);
            Bird::new(brain, params, rng)
        })
        .collect()
}

/// Builds the next population: unmutated elites first, then bred children.
///
/// Elites are the top `elite_count` survivors, so at most `survivor_count` birds are
/// carried over.
pub fn next_population<R: Rng + ?Sized>(
    birds: &[Bird],
    params: &Params,
    mutation: Mutation,
    rng: &mut R,
) -> Vec<Bird> {
    let survivors = select_best(birds, params.survivor_count);

    let mut next: Vec<Bird> = survivors
        .iter()
        .take(params.elite_count)
        .map(|elite| Bird::new(elite.brain.clone(), params, rng))
        .collect();

    let children = breed(
        &survivors,
        params.population_size.saturating_sub(next.len()),
        mutation,
        params,
        rng,
    );
    next.extend(children);
    next
}

/// Creates a population of birds with random brains.
pub fn fresh_population<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Vec<Bird>> {
    (0..params.population_size)
        .map(|_| Bird::new_random(params, rng))
        .collect()
}

/// Mean parameter distance between the fittest bird and the other survivors.
fn survivor_spread(birds: &[Bird], survivor_count: usize) -> f32 {
    let survivors = select_best(birds, survivor_count);
    let Some((best, rest)) = survivors.split_first() else {
        return 0.0;
    };
    if rest.is_empty() {
        return 0.0;
    }

    rest.iter()
        .map(|bird| Brain::distance(&best.brain, &bird.brain))
        .sum::<f32>()
        / rest.len() as f32
}

/// Why [`Evolution::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// An episode reached the success score.
    Succeeded {
        /// Generation of the successful episode.
        generation: u32,
    },
    /// The stop signal was raised.
    Stopped,
    /// The requested number of generations completed.
    GenerationLimit,
}

/// Drives episodes and breeds a new population after each one.
///
/// All randomness (brain initialization, mutation, pipe gaps, parent sampling) comes
/// from the injected random source, so a seeded engine is fully reproducible.
#[derive(Debug)]
pub struct Evolution<R = SmallRng> {
    params: Params,
    birds: Vec<Bird>,
    episode: Episode,
    pipe_ids: PipeIds,
    /// Generation index, starting at 1.
    generation: u32,
    /// Highest score seen so far, never decreases.
    best_score: u32,
    /// Best score already announced in the event log.
    logged_best: u32,
    /// Breeding rounds since the population was last drawn from scratch.
    breeding_rounds: u32,
    history: History,
    event_log: EventLog,
    rng: R,
}

impl Evolution<SmallRng> {
    /// Creates an engine seeded from the operating system.
    pub fn new(params: Params) -> Result<Self> {
        Self::with_rng(params, SmallRng::from_os_rng())
    }

    /// Creates a reproducible engine from a fixed seed.
    pub fn with_seed(params: Params, seed: u64) -> Result<Self> {
        Self::with_rng(params, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Evolution<R> {
    /// Creates an engine drawing all randomness from `rng`.
    pub fn with_rng(params: Params, mut rng: R) -> Result<Self> {
        params.validate()?;

        let mut pipe_ids = PipeIds::new();
        let birds = fresh_population(&params, &mut rng)?;
        let episode = Episode::new(&params, &mut pipe_ids, &mut rng);
        let history = History::new(params.history_size);

        Ok(Self {
            params,
            birds,
            episode,
            pipe_ids,
            generation: 1,
            best_score: 0,
            logged_best: 0,
            breeding_rounds: 0,
            history,
            event_log: EventLog::default(),
            rng,
        })
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Current population in its stable order.
    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Active pipes of the running episode.
    pub fn pipes(&self) -> &[Pipe] {
        self.episode.pipes()
    }

    /// The running episode.
    pub fn episode(&self) -> &Episode {
        &self.episode
    }

    /// State of the running episode.
    pub fn status(&self) -> EpisodeStatus {
        self.episode.status()
    }

    /// Generation index, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Highest score reached in any episode so far.
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Highest score in the running episode.
    pub fn current_score(&self) -> u32 {
        self.birds.iter().map(|bird| bird.score).max().unwrap_or(0)
    }

    /// Number of birds still flying.
    pub fn alive_count(&self) -> usize {
        self.birds.iter().filter(|bird| bird.alive).count()
    }

    /// Reports of recent generations.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Recent notable events.
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// Advances the running episode by one tick.
    pub fn tick(&mut self) -> Result<EpisodeStatus> {
        let before = self.episode.status();
        let status = self.episode.step(
            &mut self.birds,
            &self.params,
            &mut self.pipe_ids,
            &mut self.rng,
        )?;

        self.best_score = self.best_score.max(self.current_score());

        if status == EpisodeStatus::Succeeded && before != EpisodeStatus::Succeeded {
            info!(
                generation = self.generation,
                score = self.current_score(),
                "success score reached"
            );
            self.event_log.log(
                self.generation,
                EventKind::Success,
                format!("Reached score {}", self.current_score()),
            );
        }

        Ok(status)
    }

    /// Ticks until the running episode ends.
    pub fn run_episode(&mut self) -> Result<EpisodeStatus> {
        loop {
            let status = self.tick()?;
            if status.is_ended() {
                return Ok(status);
            }
        }
    }

    /// Ranks the current population and replaces it with the next generation.
    ///
    /// Meant to be called once the episode has ended; calling it earlier ranks the
    /// birds by what they achieved so far. If no bird scored, the next population is
    /// drawn from scratch instead of bred.
    pub fn evolve(&mut self) -> Result<GenerationReport> {
        for bird in &mut self.birds {
            bird.finish_episode();
        }

        let max_score = self.current_score();
        self.best_score = self.best_score.max(max_score);
        let best_fitness = self.birds.iter().map(|bird| bird.fitness).max().unwrap_or(0);
        let mean_fitness = self.birds.iter().map(|bird| bird.fitness as f64).sum::<f64>()
            / self.birds.len().max(1) as f64;
        let survivor_spread = survivor_spread(&self.birds, self.params.survivor_count);
        let reinitialized = self.birds.iter().all(|bird| bird.score == 0);

        let next = if reinitialized {
            warn!(
                generation = self.generation,
                "no bird passed a pipe, drawing a fresh population"
            );
            self.event_log.log(
                self.generation,
                EventKind::Reinitialized,
                "No bird passed a pipe, population reset",
            );
            self.breeding_rounds = 0;
            fresh_population(&self.params, &mut self.rng)?
        } else {
            let mutation = if self.breeding_rounds == 0 {
                self.params.initial_mutation
            } else {
                self.params.mutation
            };
            self.breeding_rounds += 1;
            debug!(
                generation = self.generation,
                rate = mutation.rate,
                strength = mutation.strength,
                "breeding next population"
            );
            next_population(&self.birds, &self.params, mutation, &mut self.rng)
        };

        if max_score > self.logged_best {
            self.logged_best = max_score;
            self.event_log.log(
                self.generation,
                EventKind::NewBest,
                format!("New best score {max_score}"),
            );
        }

        let report = GenerationReport {
            generation: self.generation,
            ticks: self.episode.tick(),
            status: self.episode.status(),
            max_score,
            best_score: self.best_score,
            best_fitness,
            mean_fitness,
            survivor_spread,
            reinitialized,
        };

        info!(
            generation = report.generation,
            ticks = report.ticks,
            max_score = report.max_score,
            best_score = report.best_score,
            best_fitness = report.best_fitness,
            mean_fitness = report.mean_fitness,
            "generation finished"
        );

        self.history.record(report.clone());
        self.birds = next;
        self.generation += 1;
        self.episode = Episode::new(&self.params, &mut self.pipe_ids, &mut self.rng);

        Ok(report)
    }

    /// Runs generations until success, the stop signal or the generation limit.
    ///
    /// `stop` is only checked between generations, never inside an episode.
    pub fn run(&mut self, max_generations: Option<u32>, stop: &AtomicBool) -> Result<RunOutcome> {
        let mut completed = 0;
        loop {
            if stop.load(Ordering::Relaxed) {
                return Ok(RunOutcome::Stopped);
            }
            if max_generations.is_some_and(|max| completed >= max) {
                return Ok(RunOutcome::GenerationLimit);
            }

            if self.run_episode()? == EpisodeStatus::Succeeded {
                return Ok(RunOutcome::Succeeded {
                    generation: self.generation,
                });
            }

            self.evolve()?;
            completed += 1;
        }
    }
}
