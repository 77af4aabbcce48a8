//! Stateless HTTP request builder and response parser for the Gotify
//! application API.
//!
//! # Design
//! `GotifyClient` holds the base URL and the client token and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. Every built request authenticates with the
//! client token; application tokens are never sent.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, AUTH_HEADER};
use crate::types::{Application, CreatedApplication, NewApplication};

/// Synchronous, stateless client for the Gotify `/application` endpoints.
#[derive(Clone)]
pub struct GotifyClient {
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GotifyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GotifyClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GotifyClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /application`. Also used as the connection probe.
    pub fn build_list_applications(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/application", self.base_url), None)
    }

    pub fn build_create_application(&self, input: &NewApplication) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(
            HttpMethod::Post,
            format!("{}/application", self.base_url),
            Some(body),
        ))
    }

    pub fn build_update_application(&self, id: &str, input: &NewApplication) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(self.request(
            HttpMethod::Put,
            format!("{}/application/{id}", self.base_url),
            Some(body),
        ))
    }

    pub fn build_delete_application(&self, id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            format!("{}/application/{id}", self.base_url),
            None,
        )
    }

    /// Status-only check of a probe response; the body is not decoded.
    pub fn parse_probe(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_applications(&self, response: HttpResponse) -> Result<Vec<Application>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_application(&self, response: HttpResponse) -> Result<CreatedApplication, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// The body of a successful update is ignored.
    pub fn parse_update_application(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_application(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Parse a listing and pick the application whose id stringifies to `id`.
    pub fn parse_find_application(&self, response: HttpResponse, id: &str) -> Result<Application, ApiError> {
        let applications = self.parse_list_applications(response)?;
        find_application(applications, id)
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (AUTH_HEADER.to_string(), self.token.clone()),
            ],
            body,
        }
    }
}

/// Scan the whole listing; when several entries share the id, the last one
/// wins.
pub fn find_application(applications: Vec<Application>, id: &str) -> Result<Application, ApiError> {
    let mut found = None;
    for application in applications {
        if application.id.to_string() == id {
            found = Some(application);
        }
    }
    found.ok_or_else(|| ApiError::NotFound { id: id.to_string() })
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        401 => Err(ApiError::Unauthorized {
            body: response.body.clone(),
        }),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
