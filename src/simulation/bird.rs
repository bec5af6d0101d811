//! Bird state, perception and physics.
//!
//! A bird sits at a fixed horizontal position and only moves vertically. Its brain
//! decides every tick whether it flaps, based on its own motion and the next pipe.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::brain::Brain;
use super::error::Result;
use super::geometry::Rect;
use super::params::{OBSERVATION_SIZE, Params};
use super::pipe::Pipe;

/// Brain output above which a bird flaps.
pub const FLAP_THRESHOLD: f32 = 0.75;

/// Offset and scale that map typical velocities into roughly [0, 1].
const VELOCITY_OFFSET: f32 = 9.0;
const VELOCITY_SCALE: f32 = 32.0;

/// Points per pipe passed when computing fitness.
const PIPE_FITNESS: u64 = 100;

/// A bird controlled by a neural network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top edge of the bounding box.
    pub y: f32,
    /// Vertical velocity, positive is downwards.
    pub velocity: f32,
    /// Whether the bird is still in the episode.
    pub alive: bool,
    /// Number of pipes passed.
    pub score: u32,
    /// Ticks survived in the current episode.
    pub frames_alive: u32,
    /// Ranking value, set by [`Bird::finish_episode`].
    pub fitness: u64,
    /// Grey level (0 to 100) used to tell birds apart on screen.
    pub shade: u8,
    /// Ids of pipes already counted in `score`.
    passed_pipes: HashSet<u64>,
    /// Neural network that decides when to flap.
    pub brain: Brain,
}

impl Bird {
    /// Creates a bird at the vertical center of the world, owning `brain`.
    pub fn new<R: Rng + ?Sized>(brain: Brain, params: &Params, rng: &mut R) -> Self {
        Self {
            y: params.world_height / 2.0,
            velocity: 0.0,
            alive: true,
            score: 0,
            frames_alive: 0,
            fitness: 0,
            shade: rng.random_range(0..=100),
            passed_pipes: HashSet::new(),
            brain,
        }
    }

    /// Creates a bird with a freshly initialized random brain.
    pub fn new_random<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self> {
        let [input, hidden, output] = params.layer_sizes;
        let brain = Brain::new_random(input, hidden, output, rng)?;
        Ok(Self::new(brain, params, rng))
    }

    /// Builds the normalized observation of the bird and the next pipe.
    pub fn observe(&self, pipe: &Pipe, params: &Params) -> [f32; OBSERVATION_SIZE] {
        [
            self.y / params.world_height,
            (self.velocity + VELOCITY_OFFSET) / VELOCITY_SCALE,
            pipe.gap_top / params.world_height,
            pipe.gap_bottom(params) / params.world_height,
            (pipe.x - params.bird_x) / params.world_width,
        ]
    }

    /// Asks the brain whether to flap in front of `pipe`.
    pub fn decide(&self, pipe: &Pipe, params: &Params) -> Result<bool> {
        let output = self.brain.forward(&self.observe(pipe, params))?;
        Ok(output > FLAP_THRESHOLD)
    }

    /// Sets the vertical velocity to the flap velocity.
    pub fn flap(&mut self, flap_velocity: f32) {
        self.velocity = flap_velocity;
    }

    /// Applies gravity and moves the bird by one tick.
    pub fn apply_physics(&mut self, gravity: f32) {
        if !self.alive {
            return;
        }
        self.velocity += gravity;
        self.y += self.velocity;
        self.frames_alive += 1;
    }

    /// Bounding box of the bird.
    pub fn bounds(&self, params: &Params) -> Rect {
        Rect::new(params.bird_x, self.y, params.bird_size, params.bird_size)
    }

    /// Marks the bird as out of the episode.
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Counts `pipe` once its trailing edge is behind the bird.
    ///
    /// Returns `true` if the score was incremented. A pipe is never counted twice.
    pub fn try_score(&mut self, pipe: &Pipe, params: &Params) -> bool {
        if pipe.trailing_edge(params) >= params.bird_x || self.passed_pipes.contains(&pipe.id) {
            return false;
        }
        self.passed_pipes.insert(pipe.id);
        self.score += 1;
        true
    }

    /// Checks whether `pipe_id` has already been counted.
    pub fn has_passed(&self, pipe_id: u64) -> bool {
        self.passed_pipes.contains(&pipe_id)
    }

    /// Computes the final fitness from score and survival time.
    pub fn finish_episode(&mut self) -> u64 {
        self.fitness = u64::from(self.score) * PIPE_FITNESS + u64::from(self.frames_alive);
        self.fitness
    }
}
