//! Execution of core `HttpRequest` values.
//!
//! `Transport` is the only place network I/O happens. The provider shares
//! one instance across every resource and data source, so implementations
//! must be usable from several threads at once.

use gotify_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};

use crate::error::{Error, Result};

pub trait Transport: Send + Sync {
    /// Run one request to completion. Non-2xx statuses are returned as data.
    /// Failing to reach the server is `Error::Connectivity`; a response body
    /// that can't be read is a deserialization error.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status codes are interpreted by the core client.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;

        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(&path), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&path), &headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(&path), &headers);
                match &body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_headers(self.agent.put(&path), &headers);
                match &body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let connectivity = |e: ureq::Error| Error::Connectivity {
            url: path.clone(),
            source: Box::new(e),
        };

        let mut response = result.map_err(connectivity)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();
        // The server answered; a body that can't be read is a decode failure.
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::DeserializationError(format!("reading response body: {e}")))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse { status, headers, body })
    }
}
