use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const AUTH_HEADER: &str = "X-Gotify-Key";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub default_priority: i64,
    pub token: String,
    pub internal: bool,
    pub image: String,
    pub last_used: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationParams {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub default_priority: i64,
}

/// Gotify's error envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error: String,
    pub error_code: u16,
    pub error_description: String,
}

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    applications: Vec<Application>,
}

impl Store {
    /// Listing order is kept as given, duplicates included.
    pub fn with_applications(applications: Vec<Application>) -> Self {
        let next_id = applications.iter().map(|a| a.id).max().unwrap_or(0);
        Self {
            next_id,
            applications,
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    db: Db,
}

pub fn app(token: &str) -> Router {
    app_with_store(token, Store::default())
}

pub fn app_with_store(token: &str, store: Store) -> Router {
    let state = AppState {
        token: Arc::from(token),
        db: Arc::new(RwLock::new(store)),
    };
    Router::new()
        .route("/application", get(list_applications).post(create_application))
        .route(
            "/application/{id}",
            put(update_application).delete(delete_application),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn error(status: StatusCode, description: impl Into<String>) -> Response {
    let body = ErrorBody {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        error_code: status.as_u16(),
        error_description: description.into(),
    };
    (status, Json(body)).into_response()
}

/// Gotify application tokens: `A` followed by 14 characters.
fn new_token() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("A{}", &raw[..14])
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let presented = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|v| v.to_str().ok());
    if presented != Some(&*state.token) {
        tracing::debug!(path = %request.uri().path(), "rejected request without a valid token");
        return error(
            StatusCode::UNAUTHORIZED,
            "you need to provide a valid access token or user credentials to access this api",
        );
    }
    next.run(request).await
}

async fn list_applications(State(state): State<AppState>) -> Json<Vec<Application>> {
    let store = state.db.read().await;
    Json(store.applications.clone())
}

async fn create_application(
    State(state): State<AppState>,
    Json(input): Json<ApplicationParams>,
) -> Response {
    if input.name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Field 'name' is required");
    }
    let mut store = state.db.write().await;
    store.next_id += 1;
    let application = Application {
        id: store.next_id,
        name: input.name,
        description: input.description,
        default_priority: input.default_priority,
        token: new_token(),
        internal: false,
        image: "static/defaultapp.png".to_string(),
        last_used: None,
    };
    store.applications.push(application.clone());
    tracing::info!(id = application.id, "created application");
    Json(application).into_response()
}

async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ApplicationParams>,
) -> Response {
    if input.name.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Field 'name' is required");
    }
    let mut store = state.db.write().await;
    let Some(application) = store.applications.iter_mut().find(|a| a.id == id) else {
        return error(StatusCode::NOT_FOUND, format!("app with id {id} doesn't exist"));
    };
    application.name = input.name;
    application.description = input.description;
    application.default_priority = input.default_priority;
    tracing::info!(id, "updated application");
    Json(application.clone()).into_response()
}

async fn delete_application(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let mut store = state.db.write().await;
    let before = store.applications.len();
    store.applications.retain(|a| a.id != id);
    if store.applications.len() == before {
        return error(StatusCode::NOT_FOUND, format!("app with id {id} doesn't exist"));
    }
    tracing::info!(id, "deleted application");
    StatusCode::OK.into_response()
}
