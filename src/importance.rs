//! Per-threshold importance weights.
//!
//! The loss accepts one non-negative weight per threshold. Uniform weights (all
//! ones) are the default; [`task_importance_weights`] derives weights from the
//! label distribution so that heavily imbalanced thresholds count for less.
//!
//! For threshold `k` over `N` labels with `S_k = #{y > k}`:
//!
//! - `m_k = sqrt(max(S_k, N - S_k))`
//! - `lambda_k = m_k / max_j m_j`

use crate::error::{check_label, check_num_classes};
use crate::{Error, Result};

/// All-ones weights for `num_classes - 1` thresholds.
pub fn uniform_weights(num_classes: usize) -> Result<Vec<f32>> {
    check_num_classes(num_classes)?;
    Ok(vec![1.0; num_classes - 1])
}

/// Label-imbalance importance weights in `(0, 1]`.
///
/// The most balanced threshold gets weight `1.0`.
pub fn task_importance_weights(labels: &[usize], num_classes: usize) -> Result<Vec<f32>> {
    check_num_classes(num_classes)?;
    if labels.is_empty() {
        return Err(Error::InvalidData("labels must not be empty".to_owned()));
    }

    let mut above = vec![0_usize; num_classes - 1];
    for &label in labels {
        check_label(label, num_classes)?;
        for count in above.iter_mut().take(label) {
            *count += 1;
        }
    }

    let n = labels.len();
    let m: Vec<f32> = above
        .iter()
        .map(|&s| (s.max(n - s) as f32).sqrt())
        .collect();

    // m_k >= sqrt(n / 2) > 0, so the max is strictly positive.
    let max_m = m.iter().copied().fold(f32::MIN, f32::max);
    let weights: Vec<f32> = m.iter().map(|&v| v / max_m).collect();

    tracing::debug!(
        num_labels = n,
        num_classes,
        ?weights,
        "derived task importance weights"
    );
    Ok(weights)
}

/// Validate an importance-weight vector against a threshold count.
pub(crate) fn validate_weights(weights: &[f32], num_thresholds: usize) -> Result<()> {
    if weights.len() != num_thresholds {
        return Err(Error::InvalidShape(format!(
            "importance weights len {} does not match num_thresholds {}",
            weights.len(),
            num_thresholds
        )));
    }
    for (k, &w) in weights.iter().enumerate() {
        if !(w.is_finite() && w >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "importance weight {k} must be finite and >= 0, got {w}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_all_ones() {
        assert_eq!(uniform_weights(5).unwrap(), vec![1.0; 4]);
        assert!(uniform_weights(1).is_err());
    }

    #[test]
    fn balanced_threshold_gets_full_weight() {
        // K = 3, labels 0,0,1,2: S_0 = 2 (balanced), S_1 = 1.
        let w = task_importance_weights(&[0, 0, 1, 2], 3).unwrap();
        let m0 = 2.0_f32.sqrt(); // max(2, 2)
        let m1 = 3.0_f32.sqrt(); // max(1, 3)
        assert!((w[0] - m0 / m1).abs() < 1e-6);
        assert!((w[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn weights_are_in_unit_interval() {
        let labels = [0, 1, 1, 2, 2, 2, 3, 4, 4, 4, 4];
        let w = task_importance_weights(&labels, 5).unwrap();
        assert_eq!(w.len(), 4);
        assert!(w.iter().all(|&v| v > 0.0 && v <= 1.0));
        assert!(w.iter().any(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            task_importance_weights(&[], 3),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            task_importance_weights(&[0, 3], 3),
            Err(Error::LabelOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_weights_rejects_negative_and_nan() {
        assert!(validate_weights(&[1.0, 0.0, 0.5], 3).is_ok());
        assert!(matches!(
            validate_weights(&[1.0, -0.1, 0.5], 3),
            Err(Error::InvalidConfig(_))
        ));
        assert!(validate_weights(&[1.0, f32::NAN, 0.5], 3).is_err());
        assert!(matches!(
            validate_weights(&[1.0, 1.0], 3),
            Err(Error::InvalidShape(_))
        ));
    }
}
