//! Donor notifications: listing, unread count, sending and read flags

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::required;
use crate::error::{ApiError, ApiResult};
use crate::models::{Notification, NotificationType, Priority};
use crate::AppState;

fn donor_id_required(donor_id: Option<&str>) -> ApiResult<&str> {
    required(donor_id).ok_or_else(|| ApiError::BadRequest("donorId is required".to_string()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub donor_id: Option<String>,
    /// Only `true` narrows the listing to unread notifications
    pub unread: Option<String>,
}

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<Vec<Notification>>> {
    let donor_id = donor_id_required(query.donor_id.as_deref())?;
    let unread_only = query.unread.as_deref() == Some("true");
    Ok(Json(state.notifications.for_donor(donor_id, unread_only).await))
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: usize,
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    Query(query): Query<NotificationQuery>,
) -> ApiResult<Json<UnreadCount>> {
    let donor_id = donor_id_required(query.donor_id.as_deref())?;
    let count = state.notifications.unread_count(donor_id).await;
    Ok(Json(UnreadCount { count }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub donor_id: Option<String>,
    #[serde(rename = "type")]
    pub notification_type: Option<NotificationType>,
    pub title: Option<String>,
    pub message: Option<String>,
    pub donation_id: Option<String>,
    pub impact_metric_id: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub send_email: bool,
}

/// POST /api/notifications
pub async fn send_notification(
    State(state): State<AppState>,
    body: Result<Json<SendNotificationRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Notification>)> {
    let Json(request) = body?;
    let (Some(donor_id), Some(notification_type), Some(title), Some(message)) = (
        required(request.donor_id.as_deref()),
        request.notification_type,
        required(request.title.as_deref()),
        required(request.message.as_deref()),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".to_string()));
    };

    let notification = Notification {
        id: format!("notif-{}", Uuid::new_v4()),
        donor_id: donor_id.to_string(),
        notification_type,
        title: title.to_string(),
        message: message.to_string(),
        donation_id: request.donation_id,
        impact_metric_id: request.impact_metric_id,
        date: Utc::now(),
        read: false,
        priority: request.priority.unwrap_or_default(),
    };

    if request.send_email {
        // No mail transport is configured; delivery stays in-app
        info!(donor_id = %notification.donor_id, title = %notification.title, "Email delivery requested");
    }

    let notification = state.notifications.insert(notification).await;
    info!(id = %notification.id, donor_id = %notification.donor_id, "Notification sent");
    Ok((StatusCode::CREATED, Json(notification)))
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub success: bool,
    pub updated: usize,
}

/// PUT /api/notifications/:id
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MarkedRead>> {
    if !state.notifications.mark_read(&id).await {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }
    Ok(Json(MarkedRead {
        success: true,
        updated: 1,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadRequest {
    pub donor_id: Option<String>,
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    body: Result<Json<MarkAllReadRequest>, JsonRejection>,
) -> ApiResult<Json<MarkedRead>> {
    let Json(request) = body?;
    let donor_id = donor_id_required(request.donor_id.as_deref())?;
    let updated = state.notifications.mark_all_read(donor_id).await;
    info!(donor_id = %donor_id, updated, "Marked notifications read");
    Ok(Json(MarkedRead {
        success: true,
        updated,
    }))
}
