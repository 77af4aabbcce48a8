//! Synchronous API client core for Gotify applications.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! # Design
//! - `GotifyClient` holds only the base URL and the client token.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Wire DTOs are typed structs; no loosely-typed JSON maps.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{find_application, GotifyClient};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, AUTH_HEADER};
pub use types::{parse_priority, Application, CreatedApplication, NewApplication};
