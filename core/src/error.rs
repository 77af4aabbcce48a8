//! Error types for the Gotify API client.
//!
//! # Design
//! 401 gets its own variant because a rejected token is the one failure
//! callers always report differently. Every other non-200 response lands in
//! `HttpError` with the raw status and body. `NotFound` is not a status
//! mapping: it is raised by the application lookup when the listing holds
//! no matching id.

use thiserror::Error;

/// Errors returned by `GotifyClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 401, the client token was rejected.
    #[error("bad token (?): {body}")]
    Unauthorized { body: String },

    /// The server returned a non-200 status other than 401.
    #[error("received a {status} response code: {body}")]
    HttpError { status: u16, body: String },

    /// The listing contained no application with the requested id.
    #[error("no application found with this id: {id}")]
    NotFound { id: String },

    /// A priority string was not an integer.
    #[error("priority cannot be parsed as int: {value:?}")]
    InvalidPriority { value: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
