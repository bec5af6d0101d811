//! Neural network implementation for bird brains.
//!
//! A fixed-topology feedforward network with one sigmoid hidden layer and a single
//! sigmoid output unit. Supports the genetic algorithm operations used by the
//! evolution loop (cloning and mutation).

use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Logistic activation, strictly inside (0, 1) and `sigmoid(0.0) == 0.5`.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Feedforward network mapping an observation to a flap probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Input to hidden weights (`hidden_size` × `input_size`).
    weights_input_hidden: Array2<f32>,
    /// Hidden layer biases (`hidden_size`).
    biases_hidden: Array1<f32>,
    /// Hidden to output weights (`hidden_size`).
    weights_hidden_output: Array1<f32>,
    /// Output unit bias.
    bias_output: f32,
}

impl Brain {
    /// Creates a new brain with every parameter drawn from U[-1, 1].
    ///
    /// The output layer is a single unit, so `output_size` must be 1.
    pub fn new_random<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        check_sizes(input_size, hidden_size, output_size)?;

        Ok(Self {
            weights_input_hidden: Array2::from_shape_fn((hidden_size, input_size), |_| {
                random_parameter(rng)
            }),
            biases_hidden: Array1::from_shape_fn(hidden_size, |_| random_parameter(rng)),
            weights_hidden_output: Array1::from_shape_fn(hidden_size, |_| random_parameter(rng)),
            bias_output: random_parameter(rng),
        })
    }

    /// Builds a brain from explicit parameters, validating that the shapes agree.
    pub fn from_parameters(
        weights_input_hidden: Array2<f32>,
        biases_hidden: Array1<f32>,
        weights_hidden_output: Array1<f32>,
        bias_output: f32,
    ) -> Result<Self> {
        let (hidden_size, input_size) = weights_input_hidden.dim();
        check_sizes(input_size, hidden_size, 1)?;

        if biases_hidden.len() != hidden_size || weights_hidden_output.len() != hidden_size {
            return Err(Error::InvalidDimensions(format!(
                "hidden layer has {} units but got {} biases and {} output weights",
                hidden_size,
                biases_hidden.len(),
                weights_hidden_output.len()
            )));
        }

        Ok(Self {
            weights_input_hidden,
            biases_hidden,
            weights_hidden_output,
            bias_output,
        })
    }

    /// Number of inputs the brain accepts.
    pub fn input_size(&self) -> usize {
        self.weights_input_hidden.ncols()
    }

    /// Number of hidden units.
    pub fn hidden_size(&self) -> usize {
        self.weights_input_hidden.nrows()
    }

    /// Total number of scalar parameters across all four groups.
    pub fn parameter_count(&self) -> usize {
        self.weights_input_hidden.len()
            + self.biases_hidden.len()
            + self.weights_hidden_output.len()
            + 1
    }

    /// Input to hidden weight matrix.
    pub fn weights_input_hidden(&self) -> &Array2<f32> {
        &self.weights_input_hidden
    }

    /// Hidden layer bias vector.
    pub fn biases_hidden(&self) -> &Array1<f32> {
        &self.biases_hidden
    }

    /// Hidden to output weight vector.
    pub fn weights_hidden_output(&self) -> &Array1<f32> {
        &self.weights_hidden_output
    }

    /// Output unit bias.
    pub fn bias_output(&self) -> f32 {
        self.bias_output
    }

    /// Runs a forward pass and returns the output activation in (0, 1).
    #[inline]
    pub fn forward(&self, observation: &[f32]) -> Result<f32> {
        if observation.len() != self.input_size() {
            return Err(Error::ObservationSize {
                expected: self.input_size(),
                actual: observation.len(),
            });
        }

        let mut hidden = self.weights_input_hidden.dot(&ArrayView1::from(observation));
        hidden += &self.biases_hidden;
        hidden.mapv_inplace(sigmoid);

        Ok(sigmoid(
            self.weights_hidden_output.dot(&hidden) + self.bias_output,
        ))
    }

    /// Perturbs each parameter with probability `rate` by a value from U[-strength, strength].
    ///
    /// A rate of zero leaves the brain bit-identical; a rate of one touches every parameter.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rate: f32, strength: f32, rng: &mut R) {
        if rate <= 0.0 || strength <= 0.0 {
            return;
        }

        let params = self
            .weights_input_hidden
            .iter_mut()
            .chain(self.biases_hidden.iter_mut())
            .chain(self.weights_hidden_output.iter_mut())
            .chain(std::iter::once(&mut self.bias_output));

        for param in params {
            if rng.random::<f32>() < rate {
                *param += rng.random_range(-strength..=strength);
            }
        }
    }

    /// Calculates the Euclidean distance between two brains' parameters.
    ///
    /// Brains of different shapes are infinitely far apart.
    pub fn distance(brain1: &Brain, brain2: &Brain) -> f32 {
        if brain1.weights_input_hidden.dim() != brain2.weights_input_hidden.dim() {
            return f32::INFINITY;
        }

        let sum_sq: f32 = brain1
            .to_flat_vector()
            .iter()
            .zip(brain2.to_flat_vector())
            .map(|(a, b)| (a - b).powi(2))
            .sum();

        sum_sq.sqrt()
    }

    /// Flattens all parameters into a single vector, in mutation order.
    pub fn to_flat_vector(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.parameter_count());
        flat.extend(self.weights_input_hidden.iter().copied());
        flat.extend(self.biases_hidden.iter().copied());
        flat.extend(self.weights_hidden_output.iter().copied());
        flat.push(self.bias_output);
        flat
    }
}

fn random_parameter<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-1.0..=1.0)
}

fn check_sizes(input_size: usize, hidden_size: usize, output_size: usize) -> Result<()> {
    if input_size == 0 || hidden_size == 0 || output_size == 0 {
        return Err(Error::InvalidDimensions(format!(
            "layer sizes must be positive, got {input_size}x{hidden_size}x{output_size}"
        )));
    }
    if output_size != 1 {
        return Err(Error::InvalidDimensions(format!(
            "brain has a single output unit, got output size {output_size}"
        )));
    }
    Ok(())
}
