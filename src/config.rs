//! CORAL configuration.
//!
//! The only recognized options are the class count `K` and an optional
//! per-threshold importance-weight vector (all ones when unset).
//!
//! With the `serde` feature, a config can be loaded from TOML:
//!
//! ```toml
//! num_classes = 5
//! importance_weights = [1.0, 1.0, 0.5, 0.5]
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "serde")]
use std::path::Path;

#[cfg(feature = "serde")]
use crate::Error;
use crate::Result;
use crate::error::check_num_classes;
use crate::importance::validate_weights;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CoralConfig {
    /// Number of ordinal classes (`K >= 2`).
    pub num_classes: usize,
    /// One non-negative weight per threshold (`K - 1` entries).
    #[cfg_attr(feature = "serde", serde(default))]
    pub importance_weights: Option<Vec<f32>>,
}

impl CoralConfig {
    /// Config with uniform importance weights.
    pub fn new(num_classes: usize) -> Result<Self> {
        check_num_classes(num_classes)?;
        Ok(Self {
            num_classes,
            importance_weights: None,
        })
    }

    /// Replace the importance weights.
    pub fn with_importance_weights(mut self, weights: Vec<f32>) -> Result<Self> {
        validate_weights(&weights, self.num_thresholds())?;
        self.importance_weights = Some(weights);
        Ok(self)
    }

    /// Validate the whole config.
    ///
    /// Fields are public, so anything built by hand or deserialized should pass
    /// through here before use.
    pub fn validate(&self) -> Result<()> {
        check_num_classes(self.num_classes)?;
        if let Some(weights) = &self.importance_weights {
            validate_weights(weights, self.num_classes - 1)?;
        }
        tracing::trace!(
            num_classes = self.num_classes,
            weighted = self.importance_weights.is_some(),
            "coral config validated"
        );
        Ok(())
    }

    #[inline]
    /// Returns `K - 1`.
    pub fn num_thresholds(&self) -> usize {
        self.num_classes.saturating_sub(1)
    }

    /// Returns the effective weights: the configured ones, or all ones.
    pub fn resolved_weights(&self) -> Vec<f32> {
        match &self.importance_weights {
            Some(w) => w.clone(),
            None => vec![1.0; self.num_thresholds()],
        }
    }
}

#[cfg(feature = "serde")]
impl CoralConfig {
    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: CoralConfig = toml::from_str(s)
            .map_err(|e| Error::InvalidConfig(format!("failed to parse coral config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a config from a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidConfig(format!("failed to read {}: {e}", p.display())))?;
        tracing::debug!(path = %p.display(), "loading coral config");
        Self::from_toml_str(&s)
    }
}
