use thiserror::Error;

/// Errors surfaced synchronously by scene operations.
///
/// Unknown ids are deliberately absent: operations on stale ids are no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("invalid element: {0}")]
    InvalidElement(String),
}

impl SceneError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        SceneError::InvalidElement(reason.into())
    }
}
