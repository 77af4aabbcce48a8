//! Wire DTOs for the Gotify `/application` API.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently so
//! integration tests catch drift. Field names follow Gotify's camelCase.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One entry of the `GET /application` listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_priority: i64,
    pub token: String,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub image: String,
    /// Opaque; Gotify sends a timestamp or null.
    #[serde(default)]
    pub last_used: serde_json::Value,
}

/// Request payload for `POST /application` and `PUT /application/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub default_priority: i64,
    pub description: String,
    pub name: String,
}

/// The fields of a create response the client keeps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedApplication {
    pub id: i64,
    pub token: String,
    #[serde(default)]
    pub internal: bool,
}

/// Parse a string-encoded priority.
///
/// Surrounding whitespace is not accepted, matching Go's `strconv.Atoi`.
pub fn parse_priority(value: &str) -> Result<i64, ApiError> {
    value.parse().map_err(|_| ApiError::InvalidPriority {
        value: value.to_string(),
    })
}
