//! CORAL loss.
//!
//! For one example with scores `s`, levels `v` and importance weights `w`
//! (all of length `K-1`):
//!
//! ```text
//! c[i] = w[i] * ( log_sigmoid(s[i]) * v[i] + (log_sigmoid(s[i]) - s[i]) * (1 - v[i]) )
//! loss = -mean_over_batch( sum_i c[i] )
//! ```
//!
//! This is the weighted binary cross-entropy of every threshold task, written
//! so that `log(1 - sigmoid(x))` is evaluated as `log_sigmoid(x) - x`. The naive
//! variant ([`coral_loss_naive`]) evaluates `ln(sigmoid)` and `ln(1 - sigmoid)`
//! literally and only exists as a reference to check the stable one against.
//!
//! Batched buffers are flat and row-major: `logits` and `levels` both have shape
//! `(batch, K-1)`. Rows are independent; reordering them never changes any
//! per-row contribution.
//!
//! Typical use in a training step:
//!
//! - run the model forward to get `logits`
//! - compute `d_logits` via [`CoralLoss::backward`]
//! - backprop `d_logits` through the model
//! - update parameters

use crate::activation::{log_sigmoid, sigmoid};
use crate::importance::validate_weights;
use crate::{CoralConfig, Error, Result};

/// CORAL loss with fixed per-threshold importance weights.
#[derive(Debug, Clone, PartialEq)]
pub struct CoralLoss {
    weights: Vec<f32>,
}

impl CoralLoss {
    /// Loss with explicit importance weights (one per threshold).
    pub fn new(weights: Vec<f32>) -> Result<Self> {
        if weights.is_empty() {
            return Err(Error::InvalidConfig(
                "importance weights must have at least one threshold".to_owned(),
            ));
        }
        validate_weights(&weights, weights.len())?;
        Ok(Self { weights })
    }

    /// Loss with all-ones weights for `num_classes` ordinal classes.
    pub fn uniform(num_classes: usize) -> Result<Self> {
        Self::new(crate::importance::uniform_weights(num_classes)?)
    }

    /// Loss configured from a [`CoralConfig`].
    pub fn from_config(cfg: &CoralConfig) -> Result<Self> {
        cfg.validate()?;
        Self::new(cfg.resolved_weights())
    }

    #[inline]
    /// Returns the number of thresholds (`K-1`).
    pub fn num_thresholds(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    /// Returns the importance weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Stable CORAL loss over a batch of `batch` rows.
    ///
    /// Shape contract: `logits.len() == levels.len() == batch * num_thresholds`.
    pub fn forward(&self, logits: &[f32], levels: &[f32], batch: usize) -> Result<f32> {
        self.check_batch(logits, levels, batch)?;
        Ok(stable_sum(logits, levels, &self.weights) / batch as f32)
    }

    /// Naive reference formulation (`ln(sigmoid)` / `ln(1 - sigmoid)`).
    ///
    /// Produces `inf`/`NaN` for large-magnitude logits; do not train with it.
    pub fn forward_naive(&self, logits: &[f32], levels: &[f32], batch: usize) -> Result<f32> {
        self.check_batch(logits, levels, batch)?;
        Ok(naive_sum(logits, levels, &self.weights) / batch as f32)
    }

    /// Stable CORAL loss + gradient w.r.t. `logits`.
    ///
    /// Writes `d_logits[i] = w[i] * (sigmoid(s[i]) - v[i]) / batch` and returns
    /// the loss. Levels and weights are constants.
    ///
    /// Shape contract: `d_logits.len() == logits.len()`.
    pub fn backward(
        &self,
        logits: &[f32],
        levels: &[f32],
        batch: usize,
        d_logits: &mut [f32],
    ) -> Result<f32> {
        self.check_batch(logits, levels, batch)?;
        if d_logits.len() != logits.len() {
            return Err(Error::InvalidShape(format!(
                "logits len {} does not match d_logits len {}",
                logits.len(),
                d_logits.len()
            )));
        }

        let inv_n = 1.0 / batch as f32;
        let k = self.weights.len();
        let mut sum = 0.0_f32;

        for ((s_row, v_row), d_row) in logits
            .chunks_exact(k)
            .zip(levels.chunks_exact(k))
            .zip(d_logits.chunks_exact_mut(k))
        {
            for i in 0..k {
                let s = s_row[i];
                let v = v_row[i];
                let w = self.weights[i];
                sum -= w * term(s, v);
                d_row[i] = w * (sigmoid(s) - v) * inv_n;
            }
        }

        Ok(sum * inv_n)
    }

    /// Per-example loss values (`-sum_i c[i]` for each row).
    ///
    /// The batch size is `out.len()`.
    pub fn per_example_into(&self, logits: &[f32], levels: &[f32], out: &mut [f32]) -> Result<()> {
        self.check_batch(logits, levels, out.len())?;

        let k = self.weights.len();
        for ((s_row, v_row), o) in logits
            .chunks_exact(k)
            .zip(levels.chunks_exact(k))
            .zip(out.iter_mut())
        {
            *o = stable_sum(s_row, v_row, &self.weights);
        }
        Ok(())
    }

    /// Validates shapes and level values.
    fn check_batch(&self, logits: &[f32], levels: &[f32], batch: usize) -> Result<()> {
        let k = self.weights.len();
        if batch == 0 {
            return Err(Error::InvalidData("batch must not be empty".to_owned()));
        }
        let expected = batch
            .checked_mul(k)
            .ok_or_else(|| Error::InvalidShape("batch * num_thresholds overflow".to_owned()))?;
        if logits.len() != expected {
            return Err(Error::InvalidShape(format!(
                "logits len {} does not match batch * num_thresholds ({batch} * {k})",
                logits.len()
            )));
        }
        if levels.len() != expected {
            return Err(Error::InvalidShape(format!(
                "levels len {} does not match batch * num_thresholds ({batch} * {k})",
                levels.len()
            )));
        }
        if let Some(bad) = levels.iter().find(|&&v| v != 0.0 && v != 1.0) {
            return Err(Error::InvalidData(format!(
                "levels must be 0 or 1, got {bad}"
            )));
        }
        Ok(())
    }
}

/// Stable CORAL loss for a single example.
///
/// Shape contract: `logits.len() == levels.len() == weights.len()`.
pub fn coral_loss(logits: &[f32], levels: &[f32], weights: &[f32]) -> Result<f32> {
    check_example(logits, levels, weights)?;
    CoralLoss::new(weights.to_vec())?.forward(logits, levels, 1)
}

/// Naive CORAL loss for a single example.
pub fn coral_loss_naive(logits: &[f32], levels: &[f32], weights: &[f32]) -> Result<f32> {
    check_example(logits, levels, weights)?;
    CoralLoss::new(weights.to_vec())?.forward_naive(logits, levels, 1)
}

fn check_example(logits: &[f32], levels: &[f32], weights: &[f32]) -> Result<()> {
    if logits.len() != weights.len() || levels.len() != weights.len() {
        return Err(Error::InvalidShape(format!(
            "logits len {}, levels len {} and weights len {} must match",
            logits.len(),
            levels.len(),
            weights.len()
        )));
    }
    Ok(())
}

/// `log_sigmoid(s) * v + (log_sigmoid(s) - s) * (1 - v)`
#[inline]
fn term(s: f32, v: f32) -> f32 {
    let ls = log_sigmoid(s);
    ls * v + (ls - s) * (1.0 - v)
}

#[inline]
fn stable_sum(logits: &[f32], levels: &[f32], weights: &[f32]) -> f32 {
    let k = weights.len();
    let mut sum = 0.0_f32;
    for (i, (&s, &v)) in logits.iter().zip(levels).enumerate() {
        sum -= weights[i % k] * term(s, v);
    }
    sum
}

#[inline]
fn naive_sum(logits: &[f32], levels: &[f32], weights: &[f32]) -> f32 {
    let k = weights.len();
    let mut sum = 0.0_f32;
    for (i, (&s, &v)) in logits.iter().zip(levels).enumerate() {
        let p = sigmoid(s);
        sum -= weights[i % k] * (p.ln() * v + (1.0 - p).ln() * (1.0 - v));
    }
    sum
}
