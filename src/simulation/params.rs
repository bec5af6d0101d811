use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Number of values a bird observes each tick.
pub const OBSERVATION_SIZE: usize = 5;

/// Mutation settings for one breeding round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mutation {
    /// Probability that a single parameter is perturbed.
    pub rate: f32,
    /// Half-width of the uniform perturbation.
    pub strength: f32,
}

/// Simulation parameters that control world physics and evolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// World width in pixels.
    pub world_width: f32,
    /// World height in pixels. Y grows downwards.
    pub world_height: f32,
    /// Fixed horizontal position of every bird's left edge.
    pub bird_x: f32,
    /// Side length of a bird's square bounding box.
    pub bird_size: f32,
    /// Velocity added every tick.
    pub gravity: f32,
    /// Velocity a bird is set to when it flaps.
    pub flap_velocity: f32,
    /// Pipe width in pixels.
    pub pipe_width: f32,
    /// Vertical size of the opening between the two halves of a pipe.
    pub pipe_gap: f32,
    /// Minimum distance between the gap and the top or bottom of the world.
    pub pipe_margin: f32,
    /// Horizontal distance a pipe moves every tick.
    pub pipe_speed: f32,
    /// Ticks between two pipe spawns.
    pub spawn_interval: u32,
    /// Number of birds in every generation.
    pub population_size: usize,
    /// Number of fittest birds kept as breeding parents.
    pub survivor_count: usize,
    /// Number of survivors copied unmutated into the next generation, at most
    /// `survivor_count`.
    pub elite_count: usize,
    /// Mutation used for the first breeding round.
    pub initial_mutation: Mutation,
    /// Mutation used for every later breeding round.
    pub mutation: Mutation,
    /// An episode ends successfully once a bird passes this many pipes.
    pub success_score: u32,
    /// Neural network layer dimensions (input, hidden, output).
    pub layer_sizes: [usize; 3],
    /// Number of generation reports kept for averaging.
    pub history_size: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 400.0,
            world_height: 600.0,
            bird_x: 50.0,
            bird_size: 30.0,
            gravity: 1.0,
            flap_velocity: -10.0,
            pipe_width: 40.0,
            pipe_gap: 150.0,
            pipe_margin: 50.0,
            pipe_speed: 5.0,
            spawn_interval: 96,
            population_size: 1000,
            survivor_count: 5,
            elite_count: 5,
            initial_mutation: Mutation {
                rate: 0.05,
                strength: 0.75,
            },
            mutation: Mutation {
                rate: 0.05,
                strength: 0.75,
            },
            success_score: 50,
            layer_sizes: [OBSERVATION_SIZE, 6, 1],
            history_size: 100,
        }
    }
}

impl Params {
    /// Checks that the simulation can run with these parameters.
    pub fn validate(&self) -> Result<()> {
        let [input, hidden, output] = self.layer_sizes;
        if input == 0 || hidden == 0 || output == 0 {
            return Err(Error::InvalidDimensions(format!(
                "layer sizes must be positive, got {input}x{hidden}x{output}"
            )));
        }
        if input != OBSERVATION_SIZE {
            return Err(Error::InvalidDimensions(format!(
                "birds observe {OBSERVATION_SIZE} values, input size is {input}"
            )));
        }
        if output != 1 {
            return Err(Error::InvalidDimensions(format!(
                "brain has a single output unit, got output size {output}"
            )));
        }
        let lengths = [
            self.world_width,
            self.world_height,
            self.bird_x,
            self.bird_size,
            self.gravity,
            self.flap_velocity,
            self.pipe_width,
            self.pipe_gap,
            self.pipe_margin,
            self.pipe_speed,
        ];
        if lengths.iter().any(|value| !value.is_finite()) {
            return Err(Error::InvalidParams("world and pipe values must be finite"));
        }
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(Error::InvalidParams("world dimensions must be positive"));
        }
        if self.bird_size <= 0.0 || self.bird_size >= self.world_height {
            return Err(Error::InvalidParams("bird must fit inside the world"));
        }
        if self.pipe_width <= 0.0 || self.pipe_speed <= 0.0 {
            return Err(Error::InvalidParams("pipe width and speed must be positive"));
        }
        if self.pipe_gap <= 0.0
            || self.pipe_margin < 0.0
            || self.pipe_gap + 2.0 * self.pipe_margin > self.world_height
        {
            return Err(Error::InvalidParams(
                "pipe gap and margins must fit inside the world height",
            ));
        }
        if self.spawn_interval == 0 {
            return Err(Error::InvalidParams("spawn interval must be at least one tick"));
        }
        if self.population_size == 0 {
            return Err(Error::InvalidParams("population must not be empty"));
        }
        if self.survivor_count == 0 {
            return Err(Error::InvalidParams("at least one survivor is required"));
        }
        if self.elite_count > self.survivor_count {
            return Err(Error::InvalidParams("elite count exceeds survivor count"));
        }
        if self.elite_count > self.population_size {
            return Err(Error::InvalidParams("elite count exceeds population size"));
        }
        for mutation in [self.initial_mutation, self.mutation] {
            if !(0.0..=1.0).contains(&mutation.rate) {
                return Err(Error::InvalidParams("mutation rate must be within [0, 1]"));
            }
            if !mutation.strength.is_finite() || mutation.strength <= 0.0 {
                return Err(Error::InvalidParams("mutation strength must be positive"));
            }
        }
        if self.success_score == 0 {
            return Err(Error::InvalidParams("success score must be positive"));
        }
        Ok(())
    }

    /// Saves the parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Loads and validates parameters from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
