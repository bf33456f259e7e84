use crate::db_storage::HumanStore;
use crate::errors::AppError;
use crate::human_service::HumanService;
use crate::models::{Human, HumanRequest};
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::ToSchema;

/// Shared application state injected into handlers.
pub struct AppState<S> {
    /// Human CRUD operations, owning the record store and the enrichment client.
    pub humans: HumanService<S>,
}

impl<S: HumanStore> AppState<S> {
    pub fn new(humans: HumanService<S>) -> Self {
        Self { humans }
    }
}

/// Error envelope returned with every non-2xx answer.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Health check endpoint.
///
/// Returns the service status and version.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "humans-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/humans
///
/// Creates a human from the given names; age, gender and country are guessed
/// from the first name.
#[utoipa::path(
    post,
    path = "/api/humans",
    tag = "humans",
    request_body = HumanRequest,
    responses(
        (status = 201, description = "Human created", body = Human),
        (status = 400, description = "Malformed body or empty name", body = ErrorBody),
        (status = 500, description = "Enrichment or storage failure", body = ErrorBody)
    )
)]
pub async fn create_human<S: HumanStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Human>), AppError> {
    let req = decode_body(body)?;
    tracing::info!("POST /api/humans - name: {}", req.name);

    let (status, human) = state.humans.create(&req).await?;
    Ok((status, Json(human)))
}

/// GET /api/humans/{id}
#[utoipa::path(
    get,
    path = "/api/humans/{id}",
    tag = "humans",
    params(("id" = String, Path, description = "Human UUID")),
    responses(
        (status = 200, description = "Human found", body = Human),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such human", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_human_by_id<S: HumanStore>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<Human>), AppError> {
    let id = extract_id(id)?;
    tracing::info!("GET /api/humans/{}", id);

    let (status, human) = state.humans.get_by_id(&id).await?;
    Ok((status, Json(human)))
}

/// GET /api/humans
///
/// An empty collection is answered with 404 rather than an empty array.
#[utoipa::path(
    get,
    path = "/api/humans",
    tag = "humans",
    responses(
        (status = 200, description = "All humans", body = [Human]),
        (status = 404, description = "No humans stored", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_humans<S: HumanStore>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<(StatusCode, Json<Vec<Human>>), AppError> {
    tracing::info!("GET /api/humans");

    let (status, humans) = state.humans.list().await?;
    Ok((status, Json(humans)))
}

/// PUT /api/humans/{id}
///
/// Replaces the names and recomputes every guessed field.
#[utoipa::path(
    put,
    path = "/api/humans/{id}",
    tag = "humans",
    params(("id" = String, Path, description = "Human UUID")),
    request_body = HumanRequest,
    responses(
        (status = 200, description = "Human updated", body = Human),
        (status = 400, description = "Malformed id or body", body = ErrorBody),
        (status = 404, description = "No such human", body = ErrorBody),
        (status = 500, description = "Enrichment or storage failure", body = ErrorBody)
    )
)]
pub async fn update_human<S: HumanStore>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Human>), AppError> {
    let id = extract_id(id)?;
    let req = decode_body(body)?;
    tracing::info!("PUT /api/humans/{} - name: {}", id, req.name);

    let (status, human) = state.humans.update(&req, &id).await?;
    Ok((status, Json(human)))
}

/// DELETE /api/humans/{id}
#[utoipa::path(
    delete,
    path = "/api/humans/{id}",
    tag = "humans",
    params(("id" = String, Path, description = "Human UUID")),
    responses(
        (status = 200, description = "Deleted human", body = Human),
        (status = 400, description = "Malformed id", body = ErrorBody),
        (status = 404, description = "No such human", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn delete_human<S: HumanStore>(
    State(state): State<Arc<AppState<S>>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<Human>), AppError> {
    let id = extract_id(id)?;
    tracing::info!("DELETE /api/humans/{}", id);

    let (status, human) = state.humans.delete(&id).await?;
    Ok((status, Json(human)))
}

// Content-Type is not checked. Unreadable, oversized and undecodable bodies
// are all a 400 in the error envelope.
fn decode_body(body: Result<Bytes, BytesRejection>) -> Result<HumanRequest, AppError> {
    let body = body.map_err(|rejection| {
        AppError::InvalidInput(format!("error reading body: {}", rejection.body_text()))
    })?;
    serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("error decoding json: {}", e)))
}

fn extract_id(id: Result<Path<String>, PathRejection>) -> Result<String, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::InvalidInput("missing id".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body() {
        let req = decode_body(Ok(Bytes::from_static(
            br#"{"name":"Dmitriy","surname":"Ushakov"}"#,
        )))
        .unwrap();
        assert_eq!(req.name, "Dmitriy");
        assert_eq!(req.patronymic, None);

        let err = decode_body(Ok(Bytes::from_static(b"{not json"))).unwrap_err();
        assert!(err.message().starts_with("error decoding json"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_extract_id() {
        assert_eq!(extract_id(Ok(Path("abc".to_string()))).unwrap(), "abc");
    }
}
