//! Level encoding: ordinal label -> binary threshold vector.
//!
//! For `K` ordinal classes, a label `y` in `[0, K-1]` becomes `K-1` binary
//! "levels", one per rank boundary:
//!
//! - `levels[k] = 1.0` if `y > k` (i.e. `k < y`)
//! - `levels[k] = 0.0` otherwise
//!
//! So the vector is always a run of ones followed by a run of zeros, and its sum
//! is the label itself. Levels are stored as `f32` so they can be fed straight
//! into [`crate::loss`].

use crate::error::{check_label, check_num_classes};
use crate::{Error, Result};

/// Encode `label` into a freshly allocated level vector of length `num_classes - 1`.
///
/// ```rust
/// let v = rust_coral::label_to_levels(2, 5)?;
/// assert_eq!(v, vec![1.0, 1.0, 0.0, 0.0]);
/// # Ok::<(), rust_coral::Error>(())
/// ```
pub fn label_to_levels(label: usize, num_classes: usize) -> Result<Vec<f32>> {
    check_num_classes(num_classes)?;
    check_label(label, num_classes)?;

    let mut out = vec![0.0_f32; num_classes - 1];
    fill_levels(label, &mut out);
    Ok(out)
}

/// Encode `label` into `out` without allocating.
///
/// Shape contract: `out.len() == num_classes - 1`.
pub fn label_to_levels_into(label: usize, num_classes: usize, out: &mut [f32]) -> Result<()> {
    check_num_classes(num_classes)?;
    check_label(label, num_classes)?;
    if out.len() != num_classes - 1 {
        return Err(Error::InvalidShape(format!(
            "levels buffer len {} does not match num_classes - 1 ({})",
            out.len(),
            num_classes - 1
        )));
    }

    fill_levels(label, out);
    Ok(())
}

/// Encode a batch of labels.
///
/// Returns a flat row-major buffer with shape `(labels.len(), num_classes - 1)`.
/// Any out-of-range label fails the whole call; no partial result is returned.
pub fn labels_to_levels(labels: &[usize], num_classes: usize) -> Result<Vec<f32>> {
    check_num_classes(num_classes)?;
    for &label in labels {
        check_label(label, num_classes)?;
    }

    let dim = num_classes - 1;
    let mut out = vec![0.0_f32; labels.len() * dim];
    for (row, &label) in out.chunks_exact_mut(dim).zip(labels) {
        fill_levels(label, row);
    }
    Ok(out)
}

#[inline]
fn fill_levels(label: usize, out: &mut [f32]) {
    for (k, v) in out.iter_mut().enumerate() {
        *v = if k < label { 1.0 } else { 0.0 };
    }
}
