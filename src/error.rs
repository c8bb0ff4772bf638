use thiserror::Error;

/// Errors produced by a match call.
///
/// The two variants are deliberately kept apart: a [`Mismatch`] is the
/// expected outcome of a pattern that does not fit the subject (and is the
/// only kind that negation inverts), while a [`Usage`] error means the call
/// itself was malformed: wrong pattern shape for the mode, a null subject,
/// a candidate sequence too short for a members pattern. Usage errors are
/// raised immediately and are never inverted or aggregated.
///
/// [`Mismatch`]: MatchError::Mismatch
/// [`Usage`]: MatchError::Usage
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("{message}")]
    Mismatch { path: String, message: String },

    #[error("{message}")]
    Usage { message: String },
}

impl MatchError {
    pub(crate) fn mismatch(path: impl Into<String>, message: impl Into<String>) -> Self {
        MatchError::Mismatch {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn usage(message: impl Into<String>) -> Self {
        MatchError::Usage {
            message: message.into(),
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, MatchError::Mismatch { .. })
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, MatchError::Usage { .. })
    }

    /// The access path the failure was reported at, e.g. `root[1].id`.
    /// Usage errors carry no path.
    pub fn path(&self) -> Option<&str> {
        match self {
            MatchError::Mismatch { path, .. } => Some(path),
            MatchError::Usage { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MatchError::Mismatch { message, .. } => message,
            MatchError::Usage { message } => message,
        }
    }
}

pub type Result<T, E = MatchError> = std::result::Result<T, E>;
