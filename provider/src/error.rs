//! Provider-level errors and the diagnostics handed back to the host.
//!
//! # Design
//! Wire failures from `gotify-core` are wrapped unchanged; `kind()` folds
//! every variant into the five categories a caller reacts to.

use gotify_core::ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Provider configuration is unusable before any call is attempted.
    #[error("invalid provider configuration: {0}")]
    Config(String),

    /// Resource input rejected locally, no request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The Gotify instance could not be reached.
    #[error("can't contact Gotify instance at {url}: {source}")]
    Connectivity {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure categories surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connectivity,
    Authentication,
    Api,
    Validation,
    NotFound,
}

/// A host-facing error: short summary plus detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub summary: String,
    pub detail: String,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) | Error::Validation(_) => ErrorKind::Validation,
            Error::Connectivity { .. } => ErrorKind::Connectivity,
            Error::Api(api) => match api {
                ApiError::Unauthorized { .. } => ErrorKind::Authentication,
                ApiError::NotFound { .. } => ErrorKind::NotFound,
                ApiError::InvalidPriority { .. } => ErrorKind::Validation,
                ApiError::HttpError { .. }
                | ApiError::DeserializationError(_)
                | ApiError::SerializationError(_) => ErrorKind::Api,
            },
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        let summary = match self {
            Error::Config(_) => "Invalid provider configuration",
            Error::Validation(_) => "Invalid resource input",
            Error::Connectivity { .. } => "Can't contact Gotify Instance",
            Error::Api(ApiError::Unauthorized { .. }) => "Not Allowed",
            Error::Api(ApiError::NotFound { .. }) => "API Error",
            Error::Api(ApiError::InvalidPriority { .. }) => "Priority cannot be parsed as Int",
            Error::Api(ApiError::SerializationError(_)) => "Can't convert data to json",
            Error::Api(_) => "API Error when contacting Gotify instance",
        };
        Diagnostic {
            summary: summary.to_string(),
            detail: self.to_string(),
        }
    }
}
