//! The validated connection shared by every handler.
//!
//! # Design
//! `Connection` pairs the core `GotifyClient` with an `Arc` of the transport.
//! Handlers receive a clone instead of reaching for global state, and all
//! network I/O goes through `execute`.

use std::sync::Arc;

use gotify_core::{GotifyClient, HttpRequest, HttpResponse};

use crate::data_source::ApplicationDataSource;
use crate::resource::ApplicationResource;
use crate::transport::Transport;
use crate::error::Result;

/// Validated connection settings plus the shared transport.
///
/// Produced once by `GotifyProvider::configure` and cloned into every
/// resource and data source. Cloning shares the transport.
pub struct Connection<T> {
    client: GotifyClient,
    transport: Arc<T>,
}

impl<T> Clone for Connection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> std::fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection").field("client", &self.client).finish_non_exhaustive()
    }
}

impl<T: Transport> Connection<T> {
    pub(crate) fn new(client: GotifyClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    pub fn client(&self) -> &GotifyClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, path = %request.path, "sending request to Gotify");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response from Gotify");
        Ok(response)
    }

    pub fn application_resource(&self) -> ApplicationResource<T> {
        ApplicationResource::new(self.clone())
    }

    pub fn application_data_source(&self) -> ApplicationDataSource<T> {
        ApplicationDataSource::new(self.clone())
    }
}
