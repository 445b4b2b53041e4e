/// Crate-wide result alias.
pub type LimnResult<T> = Result<T, LimnError>;

/// Errors produced by canvas construction and layer addressing.
///
/// Drawing geometry never errors: pixels falling outside the canvas are
/// silently dropped so callers do not have to pre-clip coordinates.
#[derive(thiserror::Error, Debug)]
pub enum LimnError {
    /// Invalid construction parameters (zero dimensions, zero layer budget).
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid layer target (layer 0, or an index beyond the slot capacity).
    #[error("layer error: {0}")]
    Layer(String),

    /// Escape hatch for wrapped external errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LimnError {
    /// Shorthand for [`LimnError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Shorthand for [`LimnError::Layer`].
    pub fn layer(msg: impl Into<String>) -> Self {
        Self::Layer(msg.into())
    }
}
