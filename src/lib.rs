//! CORAL ordinal regression core.
//!
//! `rust-coral` implements the pieces needed to turn any model that outputs
//! `K-1` real-valued scores into a rank-consistent ordinal classifier, following
//! CORAL (COnsistent RAnk Logits):
//!
//! - [`levels`]: encode a label `y` in `[0, K-1]` as `K-1` binary threshold targets.
//! - [`loss`]: the weighted, numerically stable CORAL loss (and its gradient).
//! - [`decode`]: turn per-threshold probabilities back into a label.
//! - [`head`]: the modified output layer (one shared weight vector, `K-1` biases).
//!
//! Everything is a pure function of its inputs; rows of a batch are independent.
//!
//! # Panics vs `Result`
//!
//! - Low-level hot path (panics on misuse): [`CoralHead::forward`],
//!   [`CoralHead::backward`], [`CoralHead::sgd_step`], [`ScoreModel::scores_into`].
//! - Everything else validates its inputs and returns [`Result`]. Invalid labels,
//!   `K < 2`, mismatched lengths and negative weights are errors, never silently
//!   corrected.
//!
//! # Data layout
//!
//! - Scalars are `f32`; labels are `usize`.
//! - Batched buffers are flat row-major: `(batch, K-1)` for logits, levels and
//!   probabilities.

//! # Quick start
//!
//! ```rust
//! use rust_coral::{CoralLoss, labels_to_levels, predict_labels, probabilities};
//!
//! # fn main() -> rust_coral::Result<()> {
//! let logits = [
//!     2.1, 1.8, -2.1, -1.8, //
//!     1.9, -1.0, -1.5, -1.3, //
//!     1.9, 1.8, 1.7, 1.6,
//! ];
//! let levels = labels_to_levels(&[2, 1, 4], 5)?;
//!
//! let loss = CoralLoss::uniform(5)?.forward(&logits, &levels, 3)?;
//! assert!((loss - 0.692).abs() < 1e-3);
//!
//! let labels = predict_labels(&probabilities(&logits), 4)?;
//! assert_eq!(labels, vec![2, 1, 4]);
//! # Ok(())
//! # }
//! ```

//! # Training step (allocation-free)
//!
//! ```rust
//! use rust_coral::{CoralHead, CoralLoss, label_to_levels_into};
//!
//! # fn main() -> rust_coral::Result<()> {
//! let mut head = CoralHead::new_with_seed(3, 5, 0)?;
//! let loss = CoralLoss::uniform(5)?;
//!
//! let x = [0.1_f32, -0.2, 0.3];
//! let mut levels = [0.0_f32; 4];
//! let mut logits = [0.0_f32; 4];
//! let mut d_logits = [0.0_f32; 4];
//! let mut d_x = [0.0_f32; 3];
//! let mut d_w = [0.0_f32; 3];
//! let mut d_b = [0.0_f32; 4];
//!
//! label_to_levels_into(2, 5, &mut levels)?;
//! head.forward(&x, &mut logits);
//! let _loss = loss.backward(&logits, &levels, 1, &mut d_logits)?;
//! head.backward(&x, &d_logits, &mut d_x, &mut d_w, &mut d_b);
//! head.sgd_step(&d_w, &d_b, 1e-2);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod config;
pub mod decode;
pub mod error;
pub mod head;
pub mod importance;
pub mod levels;
pub mod loss;
pub mod metrics;
pub mod model;

pub use activation::{log_sigmoid, probabilities, probabilities_into, sigmoid, softplus};
pub use config::CoralConfig;
pub use decode::{is_rank_consistent, predict_label, predict_label_from_logits, predict_labels};
pub use error::{Error, Result};
pub use head::CoralHead;
pub use importance::{task_importance_weights, uniform_weights};
pub use levels::{label_to_levels, label_to_levels_into, labels_to_levels};
pub use loss::{CoralLoss, coral_loss, coral_loss_naive};
pub use metrics::{Metric, OrdinalReport, evaluate_labels};
pub use model::ScoreModel;
