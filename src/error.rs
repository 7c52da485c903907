//! Error type shared by the wrappers that can fail.

use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FnError>;

/// Boxed cause carried by [`FnError::Nested`].
pub type Cause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum FnError {
    /// A wrapper could not be built from the arguments it was given.
    /// Raised before any wrapped computation runs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Arithmetic failure inside a numeric step (overflow, division by zero).
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// A nullable source produced no value.
    #[error("function returned no value for a {0} result")]
    NullResult(&'static str),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failure of a wrapped function, re-raised under this type.
    #[error("nested failure: {0}")]
    Nested(#[source] Cause),
}

impl FnError {
    pub fn nest<E>(error: E) -> Self
    where
        E: Into<Cause>,
    {
        FnError::Nested(error.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        FnError::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, FnError::InvalidArgument(_))
    }

    /// Returns the wrapped cause if this error was produced by nesting.
    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            FnError::Nested(cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}
