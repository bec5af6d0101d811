//! Moving pipes with a gap that birds have to fly through.
//!
//! Pipes enter at the right edge of the world, move left at a constant speed and are
//! dropped once they are fully past the left edge.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::params::Params;

/// Hands out pipe ids. Ids increase strictly and are never reused by one generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeIds {
    next: u64,
}

impl PipeIds {
    /// Creates a generator starting at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A pair of top and bottom barriers separated by a fixed gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Unique identifier, increasing in spawn order.
    pub id: u64,
    /// Left edge of the pipe.
    pub x: f32,
    /// Height of the top barrier, i.e. the y coordinate where the gap starts.
    pub gap_top: f32,
}

impl Pipe {
    /// Creates a pipe at the right edge of the world with a random gap position.
    pub fn new<R: Rng + ?Sized>(id: u64, params: &Params, rng: &mut R) -> Self {
        let lowest = params.pipe_margin;
        let highest = params.world_height - params.pipe_gap - params.pipe_margin;

        Self {
            id,
            x: params.world_width,
            gap_top: rng.random_range(lowest..=highest),
        }
    }

    /// Moves the pipe to the left.
    pub fn update(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Right edge of the pipe, the last part a bird has to clear.
    pub fn trailing_edge(&self, params: &Params) -> f32 {
        self.x + params.pipe_width
    }

    /// Checks if the pipe is fully past the left edge of the world.
    pub fn is_offscreen(&self, params: &Params) -> bool {
        self.trailing_edge(params) < 0.0
    }

    /// Y coordinate where the bottom barrier starts.
    pub fn gap_bottom(&self, params: &Params) -> f32 {
        self.gap_top + params.pipe_gap
    }

    /// Collision rectangle of the top barrier.
    pub fn top_rect(&self, params: &Params) -> Rect {
        Rect::new(self.x, 0.0, params.pipe_width, self.gap_top)
    }

    /// Collision rectangle of the bottom barrier.
    pub fn bottom_rect(&self, params: &Params) -> Rect {
        let top = self.gap_bottom(params);
        Rect::new(self.x, top, params.pipe_width, params.world_height - top)
    }

    /// Checks whether `rect` overlaps either barrier.
    pub fn collides(&self, rect: &Rect, params: &Params) -> bool {
        rect.overlaps(&self.top_rect(params)) || rect.overlaps(&self.bottom_rect(params))
    }
}

/// Emits a new pipe every `spawn_interval` ticks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipeSpawner {
    ticks_since_spawn: u32,
}

impl PipeSpawner {
    /// Creates a spawner that just emitted a pipe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the spawner by one tick and returns a pipe when one is due.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        params: &Params,
        ids: &mut PipeIds,
        rng: &mut R,
    ) -> Option<Pipe> {
        self.ticks_since_spawn += 1;
        if self.ticks_since_spawn < params.spawn_interval {
            return None;
        }

        self.ticks_since_spawn = 0;
        Some(Pipe::new(ids.next_id(), params, rng))
    }
}
