//! Donation listing and recording
//!
//! GET /api/donations filters by donor, campaign, region and date range.
//! POST /api/donations records a donation in the donation repository.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use dit_common::models::{Donation, DonorType, Location, DEFAULT_COUNTRY};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::{required, sanitize};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

const MAX_DONOR_ID: usize = 100;
const MAX_DONOR_NAME: usize = 200;
const MAX_CAMPAIGN: usize = 200;
const MAX_REGION: usize = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationQuery {
    pub donor: Option<String>,
    pub campaign: Option<String>,
    pub region: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_date(field: &str, raw: &str) -> ApiResult<NaiveDate> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid {}: expected YYYY-MM-DD", field)))
}

/// Donations matching every supplied filter
pub fn filter_donations(donations: Vec<Donation>, query: &DonationQuery) -> ApiResult<Vec<Donation>> {
    let start = query.start_date.as_deref().map(|d| parse_date("startDate", d)).transpose()?;
    let end = query.end_date.as_deref().map(|d| parse_date("endDate", d)).transpose()?;
    let donor = query.donor.as_deref().filter(|d| !d.is_empty());
    let donor_lower = donor.map(str::to_lowercase);
    let campaign = query
        .campaign
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase);
    let region = query.region.as_deref().filter(|r| !r.is_empty());

    Ok(donations
        .into_iter()
        .filter(|d| match (donor, &donor_lower) {
            (Some(donor), Some(lower)) => {
                d.donor_id.as_deref() == Some(donor) || d.donor_name.to_lowercase().contains(lower.as_str())
            }
            _ => true,
        })
        .filter(|d| campaign.as_ref().map_or(true, |c| d.campaign.to_lowercase().contains(c.as_str())))
        .filter(|d| region.map_or(true, |r| d.location.region == r))
        .filter(|d| start.map_or(true, |s| d.date >= s))
        .filter(|d| end.map_or(true, |e| d.date <= e))
        .collect())
}

/// GET /api/donations
pub async fn list_donations(
    State(state): State<AppState>,
    Query(query): Query<DonationQuery>,
) -> ApiResult<Json<Vec<Donation>>> {
    let donations = state.donations.list().await;
    Ok(Json(filter_donations(donations, &query)?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub donor_id: Option<String>,
    pub donor_name: Option<String>,
    /// Kept untyped so a non-numeric amount is reported as invalid, not unparseable
    pub amount: Option<Value>,
    pub campaign: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub coordinates: Option<[f64; 2]>,
    pub date: Option<String>,
    #[serde(rename = "type")]
    pub donor_type: Option<DonorType>,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub anonymous: bool,
}

/// Validate and sanitize a donation submission
pub fn build_donation(request: CreateDonationRequest) -> ApiResult<Donation> {
    let missing = || {
        ApiError::BadRequest(
            "Missing required fields: donorId, amount, and campaign are required".to_string(),
        )
    };
    let donor_id = required(request.donor_id.as_deref()).ok_or_else(missing)?;
    let campaign = required(request.campaign.as_deref()).ok_or_else(missing)?;
    let amount = match &request.amount {
        None | Some(Value::Null) => return Err(missing()),
        Some(value) => value.as_f64(),
    };
    let amount = amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| ApiError::BadRequest("Invalid amount: must be a positive number".to_string()))?;

    let date = match request.date.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(raw) => parse_date("date", raw)?,
        None => Utc::now().date_naive(),
    };

    Ok(Donation {
        id: format!("don-{}", Uuid::new_v4()),
        donor_id: Some(sanitize(donor_id, MAX_DONOR_ID)),
        donor_name: sanitize(request.donor_name.as_deref().unwrap_or(""), MAX_DONOR_NAME),
        amount,
        date,
        campaign: sanitize(campaign, MAX_CAMPAIGN),
        location: Location {
            country: request
                .country
                .as_deref()
                .map(|c| sanitize(c, MAX_REGION))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            region: sanitize(request.region.as_deref().unwrap_or(""), MAX_REGION),
            coordinates: request.coordinates.unwrap_or([0.0, 0.0]),
        },
        donor_type: request.donor_type.unwrap_or(DonorType::Individual),
        recurring: request.recurring,
        anonymous: request.anonymous,
    })
}

/// POST /api/donations
pub async fn create_donation(
    State(state): State<AppState>,
    body: Result<Json<CreateDonationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Donation>)> {
    let Json(request) = body?;
    let donation = build_donation(request)?;
    info!(id = %donation.id, amount = donation.amount, "Recorded donation");

    let stored = state.donations.insert(donation).await;
    Ok((StatusCode::CREATED, Json(stored)))
}
