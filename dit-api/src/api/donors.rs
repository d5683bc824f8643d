//! Donor profile CRUD

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::required;
use crate::error::{ApiError, ApiResult};
use crate::models::Donor;
use crate::AppState;

fn not_found() -> ApiError {
    ApiError::NotFound("Donor not found".to_string())
}

/// GET /api/donors
pub async fn list_donors(State(state): State<AppState>) -> Json<Vec<Donor>> {
    Json(state.donors.list().await)
}

/// GET /api/donors/:id
pub async fn get_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Donor>> {
    state.donors.get(&id).await.map(Json).ok_or_else(not_found)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonorRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub preferred_campaigns: Vec<String>,
}

/// POST /api/donors
pub async fn create_donor(
    State(state): State<AppState>,
    body: Result<Json<CreateDonorRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Donor>)> {
    let Json(request) = body?;
    let (Some(name), Some(email)) = (
        required(request.name.as_deref()),
        required(request.email.as_deref()),
    ) else {
        return Err(ApiError::BadRequest(
            "Missing required fields: name and email are required".to_string(),
        ));
    };

    let donor = Donor {
        id: format!("donor-{}", Uuid::new_v4()),
        name: name.to_string(),
        email: email.to_string(),
        total_donated: 0.0,
        donation_count: 0,
        preferred_campaigns: request.preferred_campaigns,
        join_date: Utc::now().date_naive(),
    };

    let donor = state.donors.insert(donor).await?;
    info!(id = %donor.id, "Created donor");
    Ok((StatusCode::CREATED, Json(donor)))
}

/// PUT /api/donors/:id
pub async fn update_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<Donor>> {
    let Json(changes) = body?;
    let donor = state.donors.update(&id, changes).await?;
    info!(id = %donor.id, "Updated donor");
    Ok(Json(donor))
}

/// DELETE /api/donors/:id
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if !state.donors.delete(&id).await {
        return Err(not_found());
    }
    info!(id = %id, "Deleted donor");
    Ok(StatusCode::NO_CONTENT)
}
