use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// An ordinal label outside `[0, num_classes - 1]`.
    #[error("label out of range: {label} is not in [0, {}]", .num_classes.saturating_sub(1))]
    LabelOutOfRange { label: usize, num_classes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Validate a class count (`K >= 2`).
#[inline]
pub(crate) fn check_num_classes(num_classes: usize) -> Result<()> {
    if num_classes < 2 {
        return Err(Error::InvalidConfig(format!(
            "num_classes must be >= 2, got {num_classes}"
        )));
    }
    Ok(())
}

/// Validate an ordinal label against a class count.
#[inline]
pub(crate) fn check_label(label: usize, num_classes: usize) -> Result<()> {
    if label >= num_classes {
        return Err(Error::LabelOutOfRange { label, num_classes });
    }
    Ok(())
}
