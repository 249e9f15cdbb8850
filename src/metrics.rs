//! Metrics.
//!
//! Metrics are evaluation helpers over decoded labels (they do not participate in
//! backprop). Ordinal tasks are usually judged by how *far* a prediction lands
//! from the truth, so MAE and MSE over label indices come first.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Supported evaluation metrics.
pub enum Metric {
    /// Mean absolute error between label indices.
    Mae,
    /// Mean squared error between label indices.
    Mse,
    /// Exact-match accuracy.
    Accuracy,
}

impl Metric {
    /// Compute this metric over paired predicted/true labels.
    pub fn compute(self, predicted: &[usize], labels: &[usize]) -> Result<f32> {
        check_pairs(predicted, labels)?;
        let inv_n = 1.0 / labels.len() as f32;

        let total: f32 = predicted
            .iter()
            .zip(labels)
            .map(|(&p, &y)| {
                let diff = p.abs_diff(y) as f32;
                match self {
                    Metric::Mae => diff,
                    Metric::Mse => diff * diff,
                    Metric::Accuracy => {
                        if p == y {
                            1.0
                        } else {
                            0.0
                        }
                    }
                }
            })
            .sum();

        Ok(total * inv_n)
    }
}

/// Evaluate one metric over paired predicted/true labels.
///
/// Free-function form of [`Metric::compute`].
pub fn evaluate_labels(predicted: &[usize], labels: &[usize], metric: Metric) -> Result<f32> {
    metric.compute(predicted, labels)
}

/// All ordinal metrics at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrdinalReport {
    pub mae: f32,
    pub mse: f32,
    pub accuracy: f32,
}

impl OrdinalReport {
    pub fn compute(predicted: &[usize], labels: &[usize]) -> Result<Self> {
        Ok(Self {
            mae: Metric::Mae.compute(predicted, labels)?,
            mse: Metric::Mse.compute(predicted, labels)?,
            accuracy: Metric::Accuracy.compute(predicted, labels)?,
        })
    }
}

fn check_pairs(predicted: &[usize], labels: &[usize]) -> Result<()> {
    if predicted.len() != labels.len() {
        return Err(Error::InvalidShape(format!(
            "predicted len {} does not match labels len {}",
            predicted.len(),
            labels.len()
        )));
    }
    if labels.is_empty() {
        return Err(Error::InvalidData("labels must not be empty".to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_on_small_example() {
        let predicted = [0, 2, 4, 1];
        let labels = [0, 1, 2, 1];
        // diffs: 0, 1, 2, 0
        let report = OrdinalReport::compute(&predicted, &labels).unwrap();
        assert!((report.mae - 0.75).abs() < 1e-6);
        assert!((report.mse - 1.25).abs() < 1e-6);
        assert!((report.accuracy - 0.5).abs() < 1e-6);
    }

    #[test]
    fn evaluate_labels_matches_each_metric() {
        let predicted = [3, 0, 2];
        let labels = [1, 0, 2];
        // diffs: 2, 0, 0
        let mae = evaluate_labels(&predicted, &labels, Metric::Mae).unwrap();
        let mse = evaluate_labels(&predicted, &labels, Metric::Mse).unwrap();
        let acc = evaluate_labels(&predicted, &labels, Metric::Accuracy).unwrap();
        assert!((mae - 2.0 / 3.0).abs() < 1e-6);
        assert!((mse - 4.0 / 3.0).abs() < 1e-6);
        assert!((acc - 2.0 / 3.0).abs() < 1e-6);

        assert!(matches!(
            evaluate_labels(&[1], &[1, 2], Metric::Mae),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn rejects_mismatched_or_empty() {
        assert!(matches!(
            Metric::Mae.compute(&[0, 1], &[0]),
            Err(Error::InvalidShape(_))
        ));
        assert!(matches!(
            Metric::Accuracy.compute(&[], &[]),
            Err(Error::InvalidData(_))
        ));
    }
}
