//! The `gotify_application` data source: look an application up by id.

use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::Result;
use crate::schema::{Attribute, Schema};
use crate::transport::Transport;

/// Read-only query against the remote service.
pub trait DataSource {
    type Model;

    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    /// Resolve `config` into the current remote attributes. `config` is left
    /// untouched on failure.
    fn read(&self, config: &Self::Model) -> Result<Self::Model>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationLookup {
    pub id: String,
    /// Filter fields below are accepted but never used for matching.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ApplicationLookup {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

pub fn application_lookup_schema() -> Schema {
    Schema::new("Application data source")
        .with_attribute("id", Attribute::required_string("Application identifier"))
        .with_attribute(
            "name",
            Attribute::optional_string("Name of the gotify application"),
        )
        .with_attribute(
            "description",
            Attribute::optional_string("Description of the gotify application"),
        )
        .with_attribute("priority", Attribute::optional_string("Priority of the application"))
        .with_attribute("token", Attribute::computed_string("Application token"))
}

pub struct ApplicationDataSource<T> {
    connection: Connection<T>,
}

impl<T: Transport> ApplicationDataSource<T> {
    pub fn new(connection: Connection<T>) -> Self {
        Self { connection }
    }
}

impl<T: Transport> DataSource for ApplicationDataSource<T> {
    type Model = ApplicationLookup;

    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_application")
    }

    fn schema(&self) -> Schema {
        application_lookup_schema()
    }

    fn read(&self, config: &ApplicationLookup) -> Result<ApplicationLookup> {
        let client = self.connection.client();
        tracing::info!(id = %config.id, "searching application");

        let response = self.connection.execute(client.build_list_applications())?;
        let application = client
            .parse_find_application(response, &config.id)
            .inspect_err(|e| tracing::error!(error = %e, id = %config.id, "application lookup failed"))?;

        tracing::trace!("read a data source");
        Ok(ApplicationLookup {
            id: application.id.to_string(),
            name: Some(application.name),
            description: Some(application.description),
            priority: Some(application.default_priority.to_string()),
            token: Some(application.token),
        })
    }
}
