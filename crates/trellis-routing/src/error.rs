//! Routing-specific error types.

use thiserror::Error;

use trellis_core::error::{AppError, ErrorKind};

/// Errors produced by the routing crate.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A path template string could not be parsed.
    #[error("invalid path template '{template}': {reason}")]
    InvalidTemplate {
        /// The offending template string.
        template: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A template parameter had no value during reversal.
    #[error("missing value for parameter '{param}'")]
    MissingParam {
        /// The parameter name.
        param: String,
    },

    /// Reversal was given a keyword argument the template does not accept.
    #[error("unexpected keyword argument '{param}'")]
    UnexpectedKwarg {
        /// The keyword argument name.
        param: String,
    },

    /// No pattern with the given route name could be reversed.
    #[error("no reverse match for route '{name}'")]
    NoReverseMatch {
        /// The route name that failed to reverse.
        name: String,
    },

    /// A pattern scheduled for removal is not in the resolver's list.
    #[error("pattern '{path}' is not installed in this resolver")]
    PatternNotInstalled {
        /// The pattern's path template.
        path: String,
    },

    /// A configured resolver name is not present in the directory.
    #[error("no resolver named '{name}' is registered")]
    UnknownResolver {
        /// The missing resolver name.
        name: String,
    },
}

impl From<RoutingError> for AppError {
    fn from(err: RoutingError) -> Self {
        let kind = match &err {
            RoutingError::InvalidTemplate { .. } => ErrorKind::Validation,
            RoutingError::MissingParam { .. }
            | RoutingError::UnexpectedKwarg { .. }
            | RoutingError::NoReverseMatch { .. } => ErrorKind::NotFound,
            RoutingError::PatternNotInstalled { .. } => ErrorKind::Conflict,
            RoutingError::UnknownResolver { .. } => ErrorKind::Configuration,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}
