//! Request handlers for the user routes
//!
//! Status mapping is fixed: invalid input is 400, a missing user is 404, a
//! soft-deleted user is 410, and a datastore failure is 500. Error bodies
//! use `ErrorMessage`, with absent fields omitted from the JSON.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::model::{User, UserEntity};
use crate::store::UserStore;

use super::DynUserStore;

/// Service name and version, served from the root route
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
}

/// Error envelope returned with every non-2xx response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorMessage {
    fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    fn error(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// A response-ready error: status code plus envelope
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorMessage,
}

impl ApiError {
    fn new(status: StatusCode, body: ErrorMessage) -> Self {
        Self { status, body }
    }

    /// The request body was not valid JSON for the expected shape
    pub fn decode(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorMessage::error(rejection.body_text(), "user json decode error"),
        )
    }

    /// An update body carried nothing to apply
    pub fn must_have_fields() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorMessage::message("user must have fields to update"),
        )
    }

    /// Map a store error to its status code and envelope
    pub fn from_store(err: StoreError, id: Option<&str>) -> Self {
        match err {
            StoreError::InvalidInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, ErrorMessage {
                    id: id.map(Into::into),
                    message: Some(err.to_string()),
                    ..ErrorMessage::default()
                })
            }
            StoreError::NotFound => {
                let message = match id {
                    Some(id) => format!("user {id} does not exist"),
                    None => err.to_string(),
                };
                Self::new(StatusCode::NOT_FOUND, ErrorMessage {
                    id: id.map(Into::into),
                    message: Some(message),
                    ..ErrorMessage::default()
                })
            }
            StoreError::Deleted => {
                let message = match id {
                    Some(id) => format!("user {id} has been deleted"),
                    None => err.to_string(),
                };
                Self::new(StatusCode::GONE, ErrorMessage {
                    id: id.map(Into::into),
                    message: Some(message),
                    ..ErrorMessage::default()
                })
            }
            StoreError::Persistence { .. } => {
                tracing::error!(error = ?err, "user datastore error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorMessage::error(err.to_string(), "user datastore error"),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// GET / returns the service name and version
pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /v1/user creates a user and returns 201 with the stored entity
pub async fn create_user(
    State(store): State<DynUserStore>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<(StatusCode, Json<UserEntity>), ApiError> {
    let Json(user) = body.map_err(ApiError::decode)?;

    let entity = store
        .create(user)
        .await
        .map_err(|e| ApiError::from_store(e, None))?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// GET /v1/users/{id} returns a single active user
pub async fn fetch_user(
    State(store): State<DynUserStore>,
    Path(id): Path<String>,
) -> Result<Json<UserEntity>, ApiError> {
    let entity = store
        .fetch_by_id(&id)
        .await
        .map_err(|e| ApiError::from_store(e, Some(&id)))?;
    Ok(Json(entity))
}

/// GET /v1/users returns all active users; an empty table is 200 with []
pub async fn list_users(
    State(store): State<DynUserStore>,
) -> Result<Json<Vec<UserEntity>>, ApiError> {
    let entities = store
        .fetch_all()
        .await
        .map_err(|e| ApiError::from_store(e, None))?;
    Ok(Json(entities))
}

/// PATCH /v1/users/{id} merges non-empty fields into an active user
pub async fn update_user(
    State(store): State<DynUserStore>,
    Path(id): Path<String>,
    body: Result<Json<User>, JsonRejection>,
) -> Result<Json<UserEntity>, ApiError> {
    let Json(user) = body.map_err(ApiError::decode)?;
    if user.first_name.is_empty() && user.last_name.is_empty() {
        return Err(ApiError::must_have_fields());
    }

    let entity = store
        .update(&id, user)
        .await
        .map_err(|e| ApiError::from_store(e, Some(&id)))?;
    Ok(Json(entity))
}

/// DELETE /v1/users/{id} soft-deletes an active user and returns 204
pub async fn delete_user(
    State(store): State<DynUserStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_store(e, Some(&id)))?;
    Ok(StatusCode::NO_CONTENT)
}
