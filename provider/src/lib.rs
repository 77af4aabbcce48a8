//! Gotify provider: manages Gotify applications from declarative
//! configuration.
//!
//! # Overview
//! `GotifyProvider::configure` probes the instance once and returns a
//! `Connection`. Resource and data source handlers are built from that
//! connection and share its client and transport:
//!
//! ```no_run
//! use gotify_provider::{ApplicationModel, GotifyProvider, ProviderConfig, Resource};
//!
//! # fn main() -> gotify_provider::Result<()> {
//! let provider = GotifyProvider::new("dev");
//! let connection = provider.configure(&ProviderConfig::from_env()?)?;
//! let applications = connection.application_resource();
//! let state = applications.create(ApplicationModel {
//!     name: Some("backups".to_string()),
//!     ..ApplicationModel::default()
//! })?;
//! println!("created application {:?}", state.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `gotify-core` builds and parses requests; `Transport` executes them.
//! - One request per operation; no retry, caching or drift detection.
//! - Failures are `Error`, classified by `Error::kind()` and rendered for
//!   the host by `Error::diagnostic()`.

pub mod config;
pub mod connection;
pub mod data_source;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod transport;

pub use config::ProviderConfig;
pub use connection::Connection;
pub use data_source::{ApplicationDataSource, ApplicationLookup, DataSource};
pub use error::{Diagnostic, Error, ErrorKind, Result};
pub use provider::GotifyProvider;
pub use resource::{ApplicationModel, ApplicationResource, Resource};
pub use schema::{Attribute, AttributeMode, Schema};
pub use transport::{Transport, UreqTransport};
