//! CORAL output layer.
//!
//! A standard classifier ends in a dense layer with one weight row per class.
//! CORAL replaces it with a layer that has a single shared weight vector and one
//! bias per threshold:
//!
//! - `s[k] = w . x + b[k]` for `k = 0..K-2`
//!
//! Sharing `w` means every threshold sees the same projection of the input and
//! only the cut point differs. With biases kept in decreasing order the
//! per-threshold probabilities are non-increasing, which is what makes the
//! predictions rank-consistent.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::check_num_classes;
use crate::model::ScoreModel;
use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct CoralHead {
    /// Shared weight vector, length `in_dim`.
    weights: Vec<f32>,
    /// One bias per threshold, length `K-1`.
    biases: Vec<f32>,
}

impl CoralHead {
    /// Zero weights and the default decreasing biases.
    pub fn new(in_dim: usize, num_classes: usize) -> Result<Self> {
        check_dims(in_dim, num_classes)?;
        Ok(Self {
            weights: vec![0.0; in_dim],
            biases: default_biases(num_classes),
        })
    }

    /// Build using a deterministic seed.
    pub fn new_with_seed(in_dim: usize, num_classes: usize, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(in_dim, num_classes, &mut rng)
    }

    /// Xavier-uniform weights (`fan_in = in_dim`, `fan_out = 1`) and the
    /// default decreasing biases `(K-1-k) / (K-1)`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        in_dim: usize,
        num_classes: usize,
        rng: &mut R,
    ) -> Result<Self> {
        check_dims(in_dim, num_classes)?;

        let limit = (6.0 / (in_dim as f32 + 1.0)).sqrt();
        let dist = Uniform::new_inclusive(-limit, limit);
        let weights = (0..in_dim).map(|_| dist.sample(rng)).collect();

        tracing::debug!(in_dim, num_classes, limit, "initialized coral head");
        Ok(Self {
            weights,
            biases: default_biases(num_classes),
        })
    }

    /// Build from explicit parameters.
    ///
    /// `biases.len()` sets `K-1`. All parameters must be finite.
    pub fn from_parts(weights: Vec<f32>, biases: Vec<f32>) -> Result<Self> {
        check_dims(weights.len(), biases.len() + 1)?;
        if weights.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "weights must contain only finite values".to_owned(),
            ));
        }
        if biases.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(
                "biases must contain only finite values".to_owned(),
            ));
        }
        Ok(Self { weights, biases })
    }

    /// Returns the per-sample input dimension.
    #[inline]
    pub fn in_dim(&self) -> usize {
        self.weights.len()
    }

    /// Returns `K`.
    #[inline]
    pub fn num_classes(&self) -> usize {
        self.biases.len() + 1
    }

    /// Returns the shared weight vector.
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Returns the per-threshold biases.
    #[inline]
    pub fn biases(&self) -> &[f32] {
        &self.biases
    }

    /// Forward pass for a single sample.
    ///
    /// Computes `z = w . inputs` once, then `logits[k] = z + b[k]`.
    ///
    /// Shape contract:
    /// - `inputs.len() == self.in_dim()`
    /// - `logits.len() == self.num_classes() - 1`
    #[inline]
    pub fn forward(&self, inputs: &[f32], logits: &mut [f32]) {
        assert_eq!(
            inputs.len(),
            self.weights.len(),
            "input len {} does not match head in_dim {}",
            inputs.len(),
            self.weights.len()
        );
        assert_eq!(
            logits.len(),
            self.biases.len(),
            "logits len {} does not match num_thresholds {}",
            logits.len(),
            self.biases.len()
        );

        let mut z = 0.0_f32;
        for (&w, &x) in self.weights.iter().zip(inputs) {
            z = w.mul_add(x, z);
        }
        for (s, &b) in logits.iter_mut().zip(&self.biases) {
            *s = z + b;
        }
    }

    /// Backward pass for a single sample.
    ///
    /// This uses overwrite semantics for all three gradient buffers. Because `w`
    /// is shared, its gradient collects the upstream gradient of every threshold:
    ///
    /// - `g = sum_k d_logits[k]`
    /// - `d_weights = g * inputs`
    /// - `d_inputs = g * w`
    /// - `d_biases[k] = d_logits[k]`
    ///
    /// Shape contract:
    /// - `inputs.len() == d_inputs.len() == d_weights.len() == self.in_dim()`
    /// - `d_logits.len() == d_biases.len() == self.num_classes() - 1`
    #[inline]
    pub fn backward(
        &self,
        inputs: &[f32],
        d_logits: &[f32],
        d_inputs: &mut [f32],
        d_weights: &mut [f32],
        d_biases: &mut [f32],
    ) {
        let in_dim = self.weights.len();
        let k = self.biases.len();
        assert_eq!(inputs.len(), in_dim, "inputs len must match in_dim");
        assert_eq!(d_inputs.len(), in_dim, "d_inputs len must match in_dim");
        assert_eq!(d_weights.len(), in_dim, "d_weights len must match in_dim");
        assert_eq!(d_logits.len(), k, "d_logits len must match num_thresholds");
        assert_eq!(d_biases.len(), k, "d_biases len must match num_thresholds");

        let mut g = 0.0_f32;
        for (db, &ds) in d_biases.iter_mut().zip(d_logits) {
            *db = ds;
            g += ds;
        }
        for i in 0..in_dim {
            d_weights[i] = g * inputs[i];
            d_inputs[i] = g * self.weights[i];
        }
    }

    /// Apply `param -= lr * d_param`.
    ///
    /// Shape contract: same as the gradients written by [`CoralHead::backward`].
    #[inline]
    pub fn sgd_step(&mut self, d_weights: &[f32], d_biases: &[f32], lr: f32) {
        assert_eq!(d_weights.len(), self.weights.len());
        assert_eq!(d_biases.len(), self.biases.len());

        for (w, &dw) in self.weights.iter_mut().zip(d_weights) {
            *w -= lr * dw;
        }
        for (b, &db) in self.biases.iter_mut().zip(d_biases) {
            *b -= lr * db;
        }
    }
}

impl ScoreModel for CoralHead {
    fn input_dim(&self) -> usize {
        self.in_dim()
    }

    fn num_thresholds(&self) -> usize {
        self.biases.len()
    }

    fn scores_into(&self, input: &[f32], out: &mut [f32]) {
        self.forward(input, out);
    }
}

#[inline]
fn check_dims(in_dim: usize, num_classes: usize) -> Result<()> {
    if in_dim == 0 {
        return Err(Error::InvalidConfig("in_dim must be > 0".to_owned()));
    }
    check_num_classes(num_classes)
}

/// `(K-1-k) / (K-1)` for `k = 0..K-2`: strictly decreasing, last one `1/(K-1)`.
fn default_biases(num_classes: usize) -> Vec<f32> {
    let n = (num_classes - 1) as f32;
    (0..num_classes - 1)
        .map(|k| (num_classes - 1 - k) as f32 / n)
        .collect()
}
