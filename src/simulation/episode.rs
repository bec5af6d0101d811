//! A single episode: birds flying through pipes until they all crash.
//!
//! The episode owns the active pipes and advances the world one logical tick at a
//! time. Ticks are independent of wall-clock time, so the same tick sequence with
//! the same random source always produces the same outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bird::Bird;
use super::error::Result;
use super::params::Params;
use super::pipe::{Pipe, PipeIds, PipeSpawner};

/// State of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeStatus {
    /// Birds are still flying.
    Running,
    /// Every bird has crashed.
    Extinct,
    /// A bird reached the success score.
    Succeeded,
}

impl EpisodeStatus {
    /// Checks whether the episode has reached a terminal state.
    pub fn is_ended(self) -> bool {
        self != EpisodeStatus::Running
    }
}

/// The pipes and counters of the running episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Active pipes in spawn order.
    pipes: Vec<Pipe>,
    spawner: PipeSpawner,
    /// Ticks processed so far.
    tick: u64,
    status: EpisodeStatus,
}

impl Episode {
    /// Starts an episode with one pipe at the right edge of the world.
    pub fn new<R: Rng + ?Sized>(params: &Params, ids: &mut PipeIds, rng: &mut R) -> Self {
        Self {
            pipes: vec![Pipe::new(ids.next_id(), params, rng)],
            spawner: PipeSpawner::new(),
            tick: 0,
            status: EpisodeStatus::Running,
        }
    }

    /// Active pipes in spawn order.
    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    /// Ticks processed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current state.
    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    /// First pipe, in spawn order, that the birds have not yet cleared.
    pub fn next_pipe(&self, params: &Params) -> Option<&Pipe> {
        self.pipes
            .iter()
            .find(|pipe| pipe.trailing_edge(params) >= params.bird_x)
    }

    /// Advances the episode by one tick.
    ///
    /// Birds are processed in slice order. Stepping an ended episode changes nothing
    /// and returns its terminal status.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        birds: &mut [Bird],
        params: &Params,
        ids: &mut PipeIds,
        rng: &mut R,
    ) -> Result<EpisodeStatus> {
        if self.status.is_ended() {
            return Ok(self.status);
        }

        self.tick += 1;

        // decisions all look at the same pipe
        if let Some(next_pipe) = self.next_pipe(params) {
            for bird in birds.iter_mut().filter(|bird| bird.alive) {
                if bird.decide(next_pipe, params)? {
                    bird.flap(params.flap_velocity);
                }
            }
        }

        if let Some(pipe) = self.spawner.tick(params, ids, rng) {
            self.pipes.push(pipe);
        }

        for bird in birds.iter_mut() {
            bird.apply_physics(params.gravity);
        }
        for pipe in &mut self.pipes {
            pipe.update(params.pipe_speed);
        }

        self.pipes.retain(|pipe| !pipe.is_offscreen(params));

        for bird in birds.iter_mut().filter(|bird| bird.alive) {
            let bounds = bird.bounds(params);
            let crashed = bounds.outside_vertical(params.world_height)
                || self.pipes.iter().any(|pipe| pipe.collides(&bounds, params));
            if crashed {
                bird.kill();
            }
        }

        for bird in birds.iter_mut().filter(|bird| bird.alive) {
            for pipe in &self.pipes {
                bird.try_score(pipe, params);
            }
        }

        let max_score = birds.iter().map(|bird| bird.score).max().unwrap_or(0);
        if max_score >= params.success_score {
            self.status = EpisodeStatus::Succeeded;
        } else if birds.iter().all(|bird| !bird.alive) {
            self.status = EpisodeStatus::Extinct;
        }

        if self.status.is_ended() {
            debug!(
                tick = self.tick,
                max_score,
                status = ?self.status,
                "episode ended"
            );
        }

        Ok(self.status)
    }
}
