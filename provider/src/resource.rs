//! The `gotify_application` managed resource.
//!
//! # Design
//! Each lifecycle step is one request. Create keeps the server-assigned id
//! and token; update and delete address the stored id. Read trusts prior
//! state and does not contact Gotify.

use gotify_core::{parse_priority, NewApplication};
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::{Error, Result};
use crate::schema::{Attribute, Schema};
use crate::transport::Transport;

pub const DEFAULT_DESCRIPTION: &str = "Description not configured";
pub const DEFAULT_PRIORITY: &str = "1";

/// Lifecycle operations of a managed resource kind.
pub trait Resource {
    type Model;

    /// Full type name, e.g. `gotify_application` for provider `gotify`.
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    fn create(&self, plan: Self::Model) -> Result<Self::Model>;

    fn read(&self, state: Self::Model) -> Result<Self::Model>;

    fn update(&self, plan: Self::Model) -> Result<Self::Model>;

    /// On success the host drops the stored state.
    fn delete(&self, state: Self::Model) -> Result<()>;

    /// Seed state from an external identifier.
    fn import_state(&self, id: &str) -> Result<Self::Model>;
}

/// Host-side record of one application. `None` is an unset value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Integer priority, string-encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Application token assigned by Gotify. Never used to authenticate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub fn application_schema() -> Schema {
    Schema::new("Application resource for gotify")
        .with_attribute(
            "name",
            Attribute::required_string("Name of the gotify application you want to create"),
        )
        .with_attribute(
            "description",
            Attribute::defaulted_string("Description of the gotify application", DEFAULT_DESCRIPTION),
        )
        .with_attribute(
            "priority",
            Attribute::defaulted_string("Priority of the application", DEFAULT_PRIORITY),
        )
        .with_attribute(
            "id",
            Attribute::computed_string("Application identifier").use_state_for_unknown(),
        )
        .with_attribute(
            "token",
            Attribute::computed_string("Application token").use_state_for_unknown(),
        )
}

pub struct ApplicationResource<T> {
    connection: Connection<T>,
    schema: Schema,
}

impl<T: Transport> ApplicationResource<T> {
    pub fn new(connection: Connection<T>) -> Self {
        Self {
            connection,
            schema: application_schema(),
        }
    }

    /// Fill schema defaults and build the request payload. Fails before any
    /// request when the name is missing or the priority is not an integer.
    fn desired(&self, mut plan: ApplicationModel) -> Result<(ApplicationModel, NewApplication)> {
        let name = plan
            .name
            .clone()
            .ok_or_else(|| Error::Validation("name is required".to_string()))?;
        let description = plan
            .description
            .get_or_insert_with(|| self.default_for("description"))
            .clone();
        let priority = plan
            .priority
            .get_or_insert_with(|| self.default_for("priority"));
        let default_priority = parse_priority(priority)?;

        let payload = NewApplication {
            default_priority,
            description,
            name,
        };
        Ok((plan, payload))
    }

    fn default_for(&self, attribute: &str) -> String {
        self.schema.default_for(attribute).unwrap_or_default().to_string()
    }
}

fn require_id(model: &ApplicationModel) -> Result<String> {
    match model.id.as_deref() {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(Error::Validation("application id is not known".to_string())),
    }
}

impl<T: Transport> Resource for ApplicationResource<T> {
    type Model = ApplicationModel;

    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_application")
    }

    fn schema(&self) -> Schema {
        self.schema.clone()
    }

    fn create(&self, plan: ApplicationModel) -> Result<ApplicationModel> {
        let (mut state, payload) = self.desired(plan)?;
        let client = self.connection.client();

        let request = client.build_create_application(&payload)?;
        let response = self.connection.execute(request)?;
        let created = client
            .parse_create_application(response)
            .inspect_err(|e| tracing::error!(error = %e, "creating application failed"))?;

        state.id = Some(created.id.to_string());
        state.token = Some(created.token);
        tracing::info!(id = created.id, "created a resource");
        Ok(state)
    }

    fn read(&self, state: ApplicationModel) -> Result<ApplicationModel> {
        tracing::trace!(id = ?state.id, "read a resource");
        Ok(state)
    }

    fn update(&self, plan: ApplicationModel) -> Result<ApplicationModel> {
        let id = require_id(&plan)?;
        let (state, payload) = self.desired(plan)?;
        let client = self.connection.client();

        let request = client.build_update_application(&id, &payload)?;
        let response = self.connection.execute(request)?;
        client
            .parse_update_application(response)
            .inspect_err(|e| tracing::error!(error = %e, id = %id, "updating application failed"))?;

        tracing::info!(id = %id, "updated a resource");
        Ok(state)
    }

    fn delete(&self, state: ApplicationModel) -> Result<()> {
        let id = require_id(&state)?;
        let client = self.connection.client();

        let response = self.connection.execute(client.build_delete_application(&id))?;
        client
            .parse_delete_application(response)
            .inspect_err(|e| tracing::error!(error = %e, id = %id, "deleting application failed"))?;

        tracing::info!(id = %id, "deleted a resource");
        Ok(())
    }

    fn import_state(&self, id: &str) -> Result<ApplicationModel> {
        if id.is_empty() {
            return Err(Error::Validation("import id must not be empty".to_string()));
        }
        Ok(ApplicationModel {
            id: Some(id.to_string()),
            ..ApplicationModel::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use gotify_core::{HttpMethod, AUTH_HEADER};

    use super::*;
    use crate::error::ErrorKind;
    use crate::transport::testing::RecordingTransport;

    fn resource(transport: RecordingTransport) -> ApplicationResource<RecordingTransport> {
        let client = gotify_core::GotifyClient::new("http://gotify.test", "client-token");
        Connection::new(client, transport).application_resource()
    }

    fn plan(name: &str, description: Option<&str>, priority: Option<&str>) -> ApplicationModel {
        ApplicationModel {
            name: Some(name.to_string()),
            description: description.map(str::to_string),
            priority: priority.map(str::to_string),
            ..ApplicationModel::default()
        }
    }

    fn body(request: &gotify_core::HttpRequest) -> serde_json::Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn create_merges_id_and_token() {
        let r = resource(RecordingTransport::new().respond(200, r#"{"id":4,"token":"tkn","internal":false}"#));

        let state = r.create(plan("app1", Some("d"), Some("3"))).unwrap();

        assert_eq!(
            state,
            ApplicationModel {
                name: Some("app1".to_string()),
                description: Some("d".to_string()),
                priority: Some("3".to_string()),
                id: Some("4".to_string()),
                token: Some("tkn".to_string()),
            }
        );
        let requests = r.connection.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].path, "http://gotify.test/application");
        assert_eq!(
            body(&requests[0]),
            serde_json::json!({"defaultPriority": 3, "description": "d", "name": "app1"})
        );
    }

    #[test]
    fn create_applies_schema_defaults() {
        let r = resource(RecordingTransport::new().respond(200, r#"{"id":1,"token":"A1","internal":false}"#));

        let state = r.create(plan("bare", None, None)).unwrap();

        assert_eq!(state.description.as_deref(), Some(DEFAULT_DESCRIPTION));
        assert_eq!(state.priority.as_deref(), Some("1"));
        let sent = body(&r.connection.transport().requests()[0]);
        assert_eq!(sent["defaultPriority"], 1);
        assert_eq!(sent["description"], DEFAULT_DESCRIPTION);
    }

    #[test]
    fn priority_is_sent_unchanged() {
        for priority in [0_i64, 5, 10, -3, i64::from(i32::MAX)] {
            let r = resource(RecordingTransport::new().respond(200, r#"{"id":1,"token":"A1","internal":false}"#));
            r.create(plan("p", None, Some(&priority.to_string()))).unwrap();
            assert_eq!(body(&r.connection.transport().requests()[0])["defaultPriority"], priority);
        }
    }

    #[test]
    fn non_numeric_priority_sends_nothing() {
        for priority in ["high", "", "2.5"] {
            let r = resource(RecordingTransport::new());

            let err = r.create(plan("p", None, Some(priority))).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);

            let mut existing = plan("p", None, Some(priority));
            existing.id = Some("4".to_string());
            let err = r.update(existing).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);

            assert!(r.connection.transport().requests().is_empty());
        }
    }

    #[test]
    fn create_without_name_sends_nothing() {
        let r = resource(RecordingTransport::new());
        let err = r.create(ApplicationModel::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(r.connection.transport().requests().is_empty());
    }

    #[test]
    fn create_failure_carries_body() {
        let r = resource(RecordingTransport::new().respond(500, "database locked"));
        let err = r.create(plan("p", None, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("database locked"));
    }

    #[test]
    fn create_with_undecodable_body_is_api_error() {
        let r = resource(RecordingTransport::new().respond(200, "<html>"));
        let err = r.create(plan("p", None, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Api);
    }

    #[test]
    fn unreachable_server_is_connectivity_error() {
        let r = resource(RecordingTransport::new().refuse("connection refused"));
        let err = r.create(plan("p", None, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }

    #[test]
    fn unauthorized_maps_to_authentication_for_every_operation() {
        let r = resource(
            RecordingTransport::new()
                .respond(401, "denied")
                .respond(401, "denied")
                .respond(401, "denied"),
        );
        let mut existing = plan("p", None, None);
        existing.id = Some("4".to_string());

        assert_eq!(r.create(plan("p", None, None)).unwrap_err().kind(), ErrorKind::Authentication);
        assert_eq!(r.update(existing.clone()).unwrap_err().kind(), ErrorKind::Authentication);
        assert_eq!(r.delete(existing).unwrap_err().kind(), ErrorKind::Authentication);
    }

    #[test]
    fn update_puts_to_stored_id_and_keeps_local_record() {
        let r = resource(RecordingTransport::new().respond(200, r#"{"id":4,"token":"server-side","name":"other"}"#));
        let mut desired = plan("app1", Some("new"), Some("7"));
        desired.id = Some("4".to_string());
        desired.token = Some("tkn".to_string());

        let state = r.update(desired.clone()).unwrap();

        assert_eq!(state, desired);
        let requests = r.connection.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[0].path, "http://gotify.test/application/4");
        assert_eq!(
            body(&requests[0]),
            serde_json::json!({"defaultPriority": 7, "description": "new", "name": "app1"})
        );
    }

    #[test]
    fn update_without_id_sends_nothing() {
        let r = resource(RecordingTransport::new());
        let err = r.update(plan("app1", None, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(r.connection.transport().requests().is_empty());
    }

    #[test]
    fn delete_issues_one_request_with_client_token() {
        let r = resource(RecordingTransport::new().respond(200, ""));
        let state = ApplicationModel {
            id: Some("4".to_string()),
            token: Some("app-token".to_string()),
            ..plan("app1", None, None)
        };

        r.delete(state).unwrap();

        let requests = r.connection.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].path, "http://gotify.test/application/4");
        assert_eq!(requests[0].header(AUTH_HEADER), Some("client-token"));
    }

    #[test]
    fn delete_not_found_is_api_error() {
        let r = resource(RecordingTransport::new().respond(404, "app with id 4 doesn't exist"));
        let state = ApplicationModel {
            id: Some("4".to_string()),
            ..ApplicationModel::default()
        };
        let err = r.delete(state).unwrap_err();
        assert!(matches!(
            err,
            Error::Api(gotify_core::ApiError::HttpError { status: 404, .. })
        ));
    }

    #[test]
    fn read_returns_state_without_requests() {
        let r = resource(RecordingTransport::new());
        let state = ApplicationModel {
            id: Some("4".to_string()),
            ..plan("app1", Some("d"), Some("3"))
        };
        assert_eq!(r.read(state.clone()).unwrap(), state);
        assert!(r.connection.transport().requests().is_empty());
    }

    #[test]
    fn import_seeds_only_the_id() {
        let r = resource(RecordingTransport::new());
        let state = r.import_state("12").unwrap();
        assert_eq!(
            state,
            ApplicationModel {
                id: Some("12".to_string()),
                ..ApplicationModel::default()
            }
        );
        assert_eq!(r.read(state.clone()).unwrap(), state);
        assert!(r.import_state("").is_err());
    }

    #[test]
    fn type_name_and_schema() {
        let r = resource(RecordingTransport::new());
        assert_eq!(r.type_name("gotify"), "gotify_application");
        let schema = r.schema();
        assert_eq!(schema.required().collect::<Vec<_>>(), ["name"]);
        assert_eq!(schema.default_for("priority"), Some(DEFAULT_PRIORITY));
    }

    #[test]
    fn model_serializes_without_unset_fields() {
        let json = serde_json::to_value(ApplicationModel {
            id: Some("12".to_string()),
            ..ApplicationModel::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"id": "12"}));
    }
}
