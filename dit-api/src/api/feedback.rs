//! Beneficiary feedback submission and listing

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use super::required;
use crate::error::{ApiError, ApiResult};
use crate::models::{Feedback, FEEDBACK_PENDING};
use crate::AppState;

/// Keys assigned by the server and never taken from the submission
const SERVER_FIELDS: [&str; 3] = ["id", "date", "status"];

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    pub campaign: Option<String>,
    pub region: Option<String>,
    pub status: Option<String>,
}

/// GET /api/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> Json<Vec<Feedback>> {
    let keep = |filter: &Option<String>, value: &str| {
        filter.as_deref().filter(|f| !f.is_empty()).map_or(true, |f| f == value)
    };
    let feedback = state
        .feedback
        .list()
        .await
        .into_iter()
        .filter(|f| keep(&query.campaign, &f.campaign))
        .filter(|f| keep(&query.region, &f.region))
        .filter(|f| keep(&query.status, &f.status))
        .collect();
    Json(feedback)
}

#[derive(Debug, Serialize)]
pub struct FeedbackCreated {
    pub message: String,
    pub feedback: Feedback,
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) => required(Some(s.as_str())).map(str::to_string),
        _ => None,
    }
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<FeedbackCreated>)> {
    let Json(mut fields) = body?;

    let beneficiary_name = take_text(&mut fields, "beneficiaryName");
    let campaign = take_text(&mut fields, "campaign");
    let region = take_text(&mut fields, "region");
    let message = take_text(&mut fields, "message");
    let (Some(beneficiary_name), Some(campaign), Some(region), Some(message)) =
        (beneficiary_name, campaign, region, message)
    else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    for key in SERVER_FIELDS {
        fields.remove(key);
    }

    let feedback = Feedback {
        id: format!("fb-{}", Uuid::new_v4()),
        beneficiary_name,
        campaign,
        region,
        message,
        extra: fields,
        date: Utc::now(),
        status: FEEDBACK_PENDING.to_string(),
    };
    let feedback = state.feedback.insert(feedback).await;
    info!(id = %feedback.id, campaign = %feedback.campaign, "Feedback submitted");

    Ok((
        StatusCode::CREATED,
        Json(FeedbackCreated {
            message: "Feedback submitted successfully".to_string(),
            feedback,
        }),
    ))
}
