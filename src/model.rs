//! The score-model capability.
//!
//! CORAL does not care what produces the scores: any model that maps an input
//! vector to `K-1` real-valued scores (one per threshold) qualifies.
//! Implementors only provide the raw, allocation-free [`ScoreModel::scores_into`];
//! the shape-checked convenience methods are provided on top of it.

use crate::activation::sigmoid;
use crate::decode::{predict_label, predict_label_from_logits};
use crate::{Error, Result};

pub trait ScoreModel {
    /// Per-sample input dimension.
    fn input_dim(&self) -> usize;

    /// Number of scores produced per sample (`K-1`).
    fn num_thresholds(&self) -> usize;

    /// Write the `K-1` scores for `input` into `out`.
    ///
    /// Shape contract (may panic on misuse):
    /// - `input.len() == self.input_dim()`
    /// - `out.len() == self.num_thresholds()`
    fn scores_into(&self, input: &[f32], out: &mut [f32]);

    /// Shape-checked scores for one sample.
    fn scores(&self, input: &[f32]) -> Result<Vec<f32>> {
        check_input(self.input_dim(), input)?;
        let mut out = vec![0.0_f32; self.num_thresholds()];
        self.scores_into(input, &mut out);
        Ok(out)
    }

    /// Shape-checked per-threshold probabilities `P(label > k)` for one sample.
    fn probabilities(&self, input: &[f32]) -> Result<Vec<f32>> {
        let mut out = self.scores(input)?;
        for v in out.iter_mut() {
            *v = sigmoid(*v);
        }
        Ok(out)
    }

    /// Shape-checked predicted label for one sample.
    fn predict_label(&self, input: &[f32]) -> Result<usize> {
        Ok(predict_label(&self.probabilities(input)?))
    }

    /// Predicted labels for a flat row-major batch of inputs `(len, input_dim)`.
    fn predict_labels(&self, inputs: &[f32]) -> Result<Vec<usize>> {
        let dim = self.input_dim();
        if dim == 0 || !inputs.len().is_multiple_of(dim) {
            return Err(Error::InvalidShape(format!(
                "inputs length {} is not divisible by input_dim {dim}",
                inputs.len()
            )));
        }

        let mut scores = vec![0.0_f32; self.num_thresholds()];
        let mut labels = Vec::with_capacity(inputs.len() / dim);
        for x in inputs.chunks_exact(dim) {
            self.scores_into(x, &mut scores);
            labels.push(predict_label_from_logits(&scores));
        }
        Ok(labels)
    }
}

#[inline]
fn check_input(input_dim: usize, input: &[f32]) -> Result<()> {
    if input.len() != input_dim {
        return Err(Error::InvalidShape(format!(
            "input len {} does not match model input_dim {input_dim}",
            input.len()
        )));
    }
    Ok(())
}
