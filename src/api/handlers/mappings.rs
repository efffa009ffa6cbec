//! Handlers for the mapping management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::api::dto::mapping::{CreateMappingRequest, MappingResponse, UpdateMappingRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a mapping with a freshly allocated hash.
///
/// # Endpoint
///
/// `POST /api/mappings` (Bearer token required)
///
/// # Errors
///
/// Returns 400 on an invalid destination URL or owner, 500 when allocation
/// or the store write fails.
pub async fn create_mapping_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateMappingRequest>,
) -> Result<(StatusCode, Json<MappingResponse>), AppError> {
    req.validate().map_err(|e| {
        AppError::bad_request(
            "Invalid mapping data",
            serde_json::json!({ "errors": e.to_string() }),
        )
    })?;

    let mapping = state
        .mapping_service
        .create_mapping(req.owner_id, req.destination_url)
        .await?;

    Ok((StatusCode::CREATED, Json(mapping.into())))
}

/// Replaces the destination URL of an owner's mapping.
///
/// The hash stays fixed; only the destination may change.
///
/// # Endpoint
///
/// `PUT /api/mappings/{id}` (Bearer token required)
///
/// # Errors
///
/// Returns 400 on an invalid destination URL, 404 when the mapping does not
/// exist or belongs to another owner.
pub async fn update_mapping_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMappingRequest>,
) -> Result<Json<MappingResponse>, AppError> {
    req.validate().map_err(|e| {
        AppError::bad_request(
            "Invalid mapping data",
            serde_json::json!({ "errors": e.to_string() }),
        )
    })?;

    let mapping = state
        .mapping_service
        .update_mapping(id, req.owner_id, req.destination_url)
        .await?;

    Ok(Json(mapping.into()))
}

#[derive(Debug, Deserialize)]
pub struct ListMappingsParams {
    pub owner_id: i64,
}

/// Lists an owner's mappings, newest first.
///
/// # Endpoint
///
/// `GET /api/mappings?owner_id=<id>` (Bearer token required)
pub async fn list_mappings_handler(
    State(state): State<AppState>,
    Query(params): Query<ListMappingsParams>,
) -> Result<Json<Vec<MappingResponse>>, AppError> {
    let mappings = state
        .mapping_service
        .list_mappings(params.owner_id)
        .await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}
