//! Records that only exist behind the API: donor profiles and beneficiary feedback

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub total_donated: f64,
    pub donation_count: u64,
    #[serde(default)]
    pub preferred_campaigns: Vec<String>,
    pub join_date: NaiveDate,
}

/// Feedback status assigned on submission
pub const FEEDBACK_PENDING: &str = "pending";

/// Beneficiary feedback
///
/// Fields beyond the required ones are kept as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub beneficiary_name: String,
    pub campaign: String,
    pub region: String,
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    pub date: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    DonationReceived,
    ImpactUpdate,
    MilestoneReached,
    ThankYou,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Message addressed to one donor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub donor_id: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_metric_id: Option<String>,
    pub date: DateTime<Utc>,
    pub read: bool,
    pub priority: Priority,
}

/// Published beneficiary story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub beneficiary_name: String,
    pub role: String,
    pub campaign: String,
    pub region: String,
    pub message: String,
    pub date: NaiveDate,
    pub impact_type: String,
    pub rating: u8,
    pub verified: bool,
}
