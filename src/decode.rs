//! Rank decoding: per-threshold probabilities -> ordinal label.
//!
//! The predicted label is the number of thresholds whose probability exceeds
//! `0.5`. This is a plain count. If the probabilities are not non-increasing
//! (possible with an undertrained model) the count is still returned as-is;
//! use [`is_rank_consistent`] to detect that case.

use crate::activation::sigmoid;
use crate::{Error, Result};

/// Probability above which a threshold counts as "label exceeds rank k".
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Predicted label for one example: `#{k : probas[k] > 0.5}`.
///
/// The result is always in `[0, probas.len()]`. `NaN` entries are not counted.
#[inline]
pub fn predict_label(probas: &[f32]) -> usize {
    probas.iter().filter(|&&p| p > DECISION_THRESHOLD).count()
}

/// Predicted label for one example from raw scores.
#[inline]
pub fn predict_label_from_logits(logits: &[f32]) -> usize {
    logits
        .iter()
        .filter(|&&s| sigmoid(s) > DECISION_THRESHOLD)
        .count()
}

/// Predicted labels for a batch.
///
/// `probas` is a flat row-major buffer with shape `(batch, num_thresholds)`.
pub fn predict_labels(probas: &[f32], num_thresholds: usize) -> Result<Vec<usize>> {
    if num_thresholds == 0 {
        return Err(Error::InvalidConfig(
            "num_thresholds must be > 0".to_owned(),
        ));
    }
    if !probas.len().is_multiple_of(num_thresholds) {
        return Err(Error::InvalidShape(format!(
            "probas length {} is not divisible by num_thresholds {}",
            probas.len(),
            num_thresholds
        )));
    }

    Ok(probas
        .chunks_exact(num_thresholds)
        .map(predict_label)
        .collect())
}

/// Returns true if `probas` is non-increasing across thresholds.
///
/// A rank-consistent model always satisfies this; the decoder does not require it.
pub fn is_rank_consistent(probas: &[f32]) -> bool {
    probas.windows(2).all(|w| w[0] >= w[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::probabilities;
    use crate::label_to_levels;

    #[test]
    fn equal_scores_predict_zero() {
        let s = [-0.57_f32; 4];
        let p = probabilities(&s);
        for &v in &p {
            assert!((v - 0.361).abs() < 1e-3);
        }
        assert_eq!(predict_label(&p), 0);
        assert_eq!(predict_label_from_logits(&s), 0);
    }

    #[test]
    fn shifted_biases_predict_three() {
        let bias = [0.0_f32, 1.0, 2.0, 3.0];
        let s: Vec<f32> = bias.iter().map(|b| -0.57 + b).collect();
        let p = probabilities(&s);
        let expected = [0.361_f32, 0.606, 0.807, 0.919];
        for (got, want) in p.iter().zip(expected) {
            assert!((got - want).abs() < 1e-3, "got={got} want={want}");
        }
        assert_eq!(predict_label(&p), 3);
        assert_eq!(predict_label_from_logits(&s), 3);
        // Increasing probabilities are not rank-consistent, but still decode.
        assert!(!is_rank_consistent(&p));
    }

    #[test]
    fn roundtrips_encoded_levels() {
        for k in 2..=8 {
            for y in 0..k {
                let v = label_to_levels(y, k).unwrap();
                assert_eq!(predict_label(&v), y, "k={k} y={y}");
                assert!(is_rank_consistent(&v));
            }
        }
    }

    #[test]
    fn prediction_is_bounded() {
        assert_eq!(predict_label(&[1.0, 1.0, 1.0]), 3);
        assert_eq!(predict_label(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(predict_label(&[0.5, 0.5]), 0);
        assert_eq!(predict_label(&[f32::NAN, 0.9]), 1);
    }

    #[test]
    fn batch_decoding_validates_shape() {
        let probas = [0.9_f32, 0.8, 0.1, 0.2, 0.9, 0.9, 0.9, 0.9];
        assert_eq!(predict_labels(&probas, 4).unwrap(), vec![2, 4]);
        assert!(matches!(
            predict_labels(&probas, 3),
            Err(Error::InvalidShape(_))
        ));
        assert!(predict_labels(&probas, 0).is_err());
        assert!(predict_labels(&[], 4).unwrap().is_empty());
    }
}
