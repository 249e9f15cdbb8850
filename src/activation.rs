//! Scalar sigmoid-family primitives.
//!
//! Every score in CORAL is a logit for a binary "label exceeds threshold k" task,
//! so the whole crate leans on three functions:
//!
//! - `sigmoid(x) = 1 / (1 + exp(-x))`
//! - `log_sigmoid(x) = log(sigmoid(x))`
//! - `softplus(x) = log(1 + exp(x))`
//!
//! Useful identities (all derivable from `sigmoid(x) = exp(x) / (1 + exp(x))`):
//!
//! - `log_sigmoid(x) = -softplus(-x)`
//! - `log(1 - sigmoid(x)) = log_sigmoid(x) - x = -softplus(x)`
//!
//! The implementations below never evaluate `exp` of a positive argument, so
//! they stay finite for any finite input.

use crate::{Error, Result};

/// Numerically stable sigmoid.
#[inline]
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

/// Numerically stable `log(sigmoid(x))`.
///
/// Computed as `min(x, 0) - ln(1 + exp(-|x|))`.
#[inline]
pub fn log_sigmoid(x: f32) -> f32 {
    x.min(0.0) - (-x.abs()).exp().ln_1p()
}

/// Numerically stable `log(1 + exp(x))`.
#[inline]
pub fn softplus(x: f32) -> f32 {
    x.max(0.0) + (-x.abs()).exp().ln_1p()
}

/// Element-wise sigmoid of `logits` into `out`.
///
/// This turns a score vector into per-threshold probabilities
/// `P(label > k)` without allocating.
pub fn probabilities_into(logits: &[f32], out: &mut [f32]) -> Result<()> {
    if logits.len() != out.len() {
        return Err(Error::InvalidShape(format!(
            "logits len {} does not match out len {}",
            logits.len(),
            out.len()
        )));
    }
    for (p, &s) in out.iter_mut().zip(logits) {
        *p = sigmoid(s);
    }
    Ok(())
}

/// Allocating convenience wrapper around [`probabilities_into`].
pub fn probabilities(logits: &[f32]) -> Vec<f32> {
    logits.iter().map(|&s| sigmoid(s)).collect()
}
