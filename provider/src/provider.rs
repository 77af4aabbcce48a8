//! Provider metadata and configuration.
//!
//! # Design
//! `configure` validates the settings locally, then sends a single
//! `GET /application` to check reachability and the token. There is no
//! retry; the first failure is returned to the host.

use gotify_core::GotifyClient;

use crate::config::ProviderConfig;
use crate::connection::Connection;
use crate::error::Result;
use crate::schema::{Attribute, Schema};
use crate::transport::{Transport, UreqTransport};

pub const TYPE_NAME: &str = "gotify";

/// Entry point: describes the provider and validates its configuration.
#[derive(Debug, Clone)]
pub struct GotifyProvider {
    /// Release version, "dev" for local builds, "test" under acceptance tests.
    version: String,
}

impl GotifyProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn schema(&self) -> Schema {
        Schema::new("Gotify provider")
            .with_attribute("token", Attribute::required_string("Token of Gotify Client"))
            .with_attribute("url", Attribute::required_string("URL for Gotify Instance"))
    }

    /// Resource kinds served by this provider.
    pub fn resources(&self) -> Vec<String> {
        vec![format!("{TYPE_NAME}_application")]
    }

    /// Data source kinds served by this provider.
    pub fn data_sources(&self) -> Vec<String> {
        vec![format!("{TYPE_NAME}_application")]
    }

    pub fn configure(&self, config: &ProviderConfig) -> Result<Connection<UreqTransport>> {
        self.configure_with(config, UreqTransport::new())
    }

    /// Validate `config` with a single `GET /application` probe. Any failure
    /// is final; nothing is retried.
    pub fn configure_with<T: Transport>(&self, config: &ProviderConfig, transport: T) -> Result<Connection<T>> {
        config.validate()?;

        let client = GotifyClient::new(&config.url, &config.token);
        let connection = Connection::new(client, transport);
        let probe = connection.client().build_list_applications();

        let response = connection
            .execute(probe)
            .inspect_err(|e| tracing::error!(error = %e, "can't contact Gotify instance"))?;
        connection
            .client()
            .parse_probe(response)
            .inspect_err(|e| tracing::error!(error = %e, "Gotify rejected the provider configuration"))?;

        tracing::info!(url = %connection.client().base_url(), version = %self.version, "configured gotify provider");
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use gotify_core::{HttpMethod, AUTH_HEADER};

    use super::*;
    use crate::error::{Error, ErrorKind};
    use crate::transport::testing::RecordingTransport;

    fn config() -> ProviderConfig {
        ProviderConfig::new("http://gotify.test/", "client-token")
    }

    #[test]
    fn metadata() {
        let provider = GotifyProvider::new("test");
        assert_eq!(provider.type_name(), "gotify");
        assert_eq!(provider.version(), "test");
        assert_eq!(provider.resources(), ["gotify_application"]);
        assert_eq!(provider.data_sources(), ["gotify_application"]);
        assert_eq!(provider.schema().required().collect::<Vec<_>>(), ["token", "url"]);
    }

    #[test]
    fn configure_probes_application_listing_once() {
        let connection = GotifyProvider::new("test")
            .configure_with(&config(), RecordingTransport::new().respond(200, "[]"))
            .unwrap();

        let requests = connection.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].path, "http://gotify.test/application");
        assert_eq!(requests[0].header(AUTH_HEADER), Some("client-token"));
        assert_eq!(connection.client().base_url(), "http://gotify.test");
    }

    #[test]
    fn configure_bad_token() {
        let err = GotifyProvider::new("test")
            .configure_with(&config(), RecordingTransport::new().respond(401, ""))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.diagnostic().summary, "Not Allowed");
    }

    #[test]
    fn configure_other_status_carries_code() {
        let err = GotifyProvider::new("test")
            .configure_with(&config(), RecordingTransport::new().respond(503, "maintenance"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Api(gotify_core::ApiError::HttpError { status: 503, .. })
        ));
    }

    #[test]
    fn configure_unreachable() {
        let err = GotifyProvider::new("test")
            .configure_with(&config(), RecordingTransport::new().refuse("connection refused"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }

    #[test]
    fn configure_rejects_empty_settings_without_probe() {
        let err = GotifyProvider::new("test")
            .configure_with(&ProviderConfig::new("", "t"), RecordingTransport::new())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn configure_rejects_url_without_scheme_before_sending() {
        // An empty transport panics if anything is sent.
        let err = GotifyProvider::new("test")
            .configure_with(&ProviderConfig::new("gotify.local", "t"), RecordingTransport::new())
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn handlers_share_one_transport() {
        let connection = GotifyProvider::new("test")
            .configure_with(
                &config(),
                RecordingTransport::new()
                    .respond(200, "[]")
                    .respond(200, r#"[{"id":1,"name":"a","token":"Aa"}]"#),
            )
            .unwrap();

        let _resource = connection.application_resource();
        let data_source = connection.application_data_source();
        crate::DataSource::read(&data_source, &crate::ApplicationLookup::by_id("1")).unwrap();

        assert_eq!(connection.transport().requests().len(), 2);
    }
}
