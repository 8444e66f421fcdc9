//! HTTP API for validating records against studykit schemas.

pub mod registry;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use studykit_model::{ModelError, Record, ValidationError};
use tracing::debug;

pub use registry::{patient_schema, student_schema, SchemaRegistry};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: SchemaRegistry,
}

impl AppState {
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SchemasResponse {
    pub schemas: Vec<String>,
}

/// Body of every non-2xx response from the records endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error_code: String,
    pub field: Option<String>,
    pub message: String,
}

impl From<&ValidationError> for ErrorResponse {
    fn from(err: &ValidationError) -> Self {
        Self {
            error_code: err.code().to_string(),
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, code: &str, message: String) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error_code: code.to_string(),
            field: None,
            message,
        }),
    )
}

async fn hello_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello World".to_string(),
    })
}

async fn about_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to About Section !!".to_string(),
    })
}

async fn list_schemas_handler(State(state): State<Arc<AppState>>) -> Json<SchemasResponse> {
    Json(SchemasResponse {
        schemas: state.registry.names().map(str::to_string).collect(),
    })
}

async fn validate_record_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Record>, ApiError> {
    let schema = state.registry.get(&name).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            "unknown_schema",
            format!("no schema named '{name}'"),
        )
    })?;
    match schema.construct_json(&body) {
        Ok(record) => Ok(Json(record)),
        Err(ModelError::Validation(err)) => {
            debug!(schema = %name, code = err.code(), "record rejected");
            Err((StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse::from(&err))))
        }
        Err(other) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            other.to_string(),
        )),
    }
}

/// Build the HTTP API router over the given schemas.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(hello_handler))
        .route("/about", get(about_handler))
        .route("/api/v1/schemas", get(list_schemas_handler))
        .route("/api/v1/records/{schema}", post(validate_record_handler))
        .with_state(state)
}
