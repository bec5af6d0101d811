#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use ndarray::{Array1, Array2};
use neuroflap::simulation::bird::Bird;
use neuroflap::simulation::brain::Brain;
use neuroflap::simulation::params::Params;
use neuroflap::simulation::pipe::Pipe;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// A brain whose output is `sigmoid(bias)` regardless of the observation.
fn constant_brain(bias: f32) -> Brain {
    Brain::from_parameters(Array2::zeros((6, 5)), Array1::zeros(6), Array1::zeros(6), bias)
        .unwrap()
}

fn test_bird(params: &Params, bias: f32) -> Bird {
    let mut rng = SmallRng::seed_from_u64(0);
    Bird::new(constant_brain(bias), params, &mut rng)
}

#[test]
fn test_new_bird_state() {
    let params = Params::default();
    let bird = test_bird(&params, 0.0);

    assert_eq!(bird.y, params.world_height / 2.0);
    assert_eq!(bird.velocity, 0.0);
    assert!(bird.alive);
    assert_eq!(bird.score, 0);
    assert_eq!(bird.frames_alive, 0);
    assert!(bird.shade <= 100);
}

#[test]
fn test_observation_normalization() {
    let params = Params::default();
    let bird = test_bird(&params, 0.0);
    let pipe = Pipe {
        id: 0,
        x: 400.0,
        gap_top: 100.0,
    };

    let observation = bird.observe(&pipe, &params);
    let expected = [
        300.0 / 600.0,
        9.0 / 32.0,
        100.0 / 600.0,
        250.0 / 600.0,
        350.0 / 400.0,
    ];
    for (value, expected) in observation.iter().zip(expected) {
        assert!((value - expected).abs() < 1e-6);
    }
}

#[test]
fn test_decide_uses_fixed_threshold() {
    let params = Params::default();
    let pipe = Pipe {
        id: 0,
        x: 300.0,
        gap_top: 200.0,
    };

    // sigmoid(0) = 0.5 stays below the threshold
    assert!(!test_bird(&params, 0.0).decide(&pipe, &params).unwrap());
    // sigmoid(2) ~ 0.88 is above it
    assert!(test_bird(&params, 2.0).decide(&pipe, &params).unwrap());
}

#[test]
fn test_flap_overrides_velocity() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);

    bird.velocity = 7.0;
    bird.flap(params.flap_velocity);
    assert_eq!(bird.velocity, params.flap_velocity);

    bird.flap(params.flap_velocity);
    assert_eq!(bird.velocity, params.flap_velocity);
}

#[test]
fn test_physics() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);

    bird.apply_physics(1.0);
    assert_eq!(bird.velocity, 1.0);
    assert_eq!(bird.y, 301.0);
    assert_eq!(bird.frames_alive, 1);

    bird.apply_physics(1.0);
    assert_eq!(bird.velocity, 2.0);
    assert_eq!(bird.y, 303.0);
    assert_eq!(bird.frames_alive, 2);

    bird.kill();
    bird.apply_physics(1.0);
    assert_eq!(bird.y, 303.0);
    assert_eq!(bird.frames_alive, 2);
}

#[test]
fn test_scoring_is_idempotent_per_pipe() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);

    let ahead = Pipe {
        id: 3,
        x: 60.0,
        gap_top: 200.0,
    };
    assert!(!bird.try_score(&ahead, &params));
    assert_eq!(bird.score, 0);

    // trailing edge at 49 is behind the bird column at 50
    let passed = Pipe {
        id: 3,
        x: 9.0,
        gap_top: 200.0,
    };
    assert!(bird.try_score(&passed, &params));
    assert!(!bird.try_score(&passed, &params));
    assert_eq!(bird.score, 1);
    assert!(bird.has_passed(3));

    let other = Pipe {
        id: 4,
        x: 0.0,
        gap_top: 200.0,
    };
    assert!(bird.try_score(&other, &params));
    assert_eq!(bird.score, 2);
}

#[test]
fn test_trailing_edge_on_bird_column_does_not_score() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);
    let pipe = Pipe {
        id: 0,
        x: params.bird_x - params.pipe_width,
        gap_top: 200.0,
    };

    assert!(!bird.try_score(&pipe, &params));
}

#[test]
fn test_bounds_touching_world_edges_are_out() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);

    bird.y = 0.0;
    assert!(bird.bounds(&params).outside_vertical(params.world_height));

    bird.y = params.world_height - params.bird_size;
    assert!(bird.bounds(&params).outside_vertical(params.world_height));

    bird.y = 1.0;
    assert!(!bird.bounds(&params).outside_vertical(params.world_height));
}

#[test]
fn test_fitness() {
    let params = Params::default();
    let mut bird = test_bird(&params, 0.0);
    bird.score = 3;
    bird.frames_alive = 250;

    assert_eq!(bird.finish_episode(), 550);
    assert_eq!(bird.fitness, 550);
}

#[test]
fn test_new_random_uses_layer_sizes() {
    let mut params = Params::default();
    params.layer_sizes = [5, 9, 1];
    let mut rng = SmallRng::seed_from_u64(1);

    let bird = Bird::new_random(&params, &mut rng).unwrap();
    assert_eq!(bird.brain.hidden_size(), 9);
}
