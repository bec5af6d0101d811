//! # Neuroflap - Neuroevolution of Flapping Birds
//!
//! A population of birds, each steered by a small feedforward neural network, learns to
//! fly through the gaps of a stream of moving pipes. Brains are improved with a
//! generational genetic algorithm (selection, elitism and mutation) instead of
//! gradient-based training.
//!
//! ## Features
//!
//! - Fixed-topology brains (5 inputs, 6 sigmoid hidden units, 1 sigmoid output)
//! - Deterministic tick-based simulation, independent of wall-clock time
//! - Elitism and uniform parent sampling with per-parameter mutation
//! - Fresh population when a whole generation fails to score
//! - Injectable, seedable random source for reproducible runs
//! - Real-time visualization with macroquad and a headless trainer
//!
//! ## Core Modules
//!
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::bird`] - Bird perception, physics and scoring
//! - [`simulation::pipe`] - Moving pipes, id generation and spawning
//! - [`simulation::episode`] - Per-tick simulation step
//! - [`simulation::evolution`] - Selection, breeding and the generation loop

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bird perception, physics and scoring.
    pub mod bird;
    /// Neural network implementation for bird brains.
    pub mod brain;
    /// A single episode advanced tick by tick.
    pub mod episode;
    /// Error kinds surfaced by the core.
    pub mod error;
    /// Recent notable events for display.
    pub mod event_log;
    /// Selection, breeding and the generation loop.
    pub mod evolution;
    /// Axis-aligned rectangles for collision tests.
    pub mod geometry;
    /// Bounded history of generation reports.
    pub mod history;
    /// Simulation parameters.
    pub mod params;
    /// Moving pipes, id generation and spawning.
    pub mod pipe;
}
