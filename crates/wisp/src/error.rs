//! Framework errors

use wisp_dom::DomError;

/// Result type for framework operations
pub type UiResult<T> = Result<T, UiError>;

/// Framework errors
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A precondition on an argument was violated
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A document operation failed
    #[error(transparent)]
    Dom(#[from] DomError),
}

impl UiError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
