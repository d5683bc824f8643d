//! In-memory repositories behind the write endpoints
//!
//! Each repository lives for the lifetime of the process and is shared
//! between handlers through [`crate::AppState`].

use crate::error::{ApiError, ApiResult};
use crate::models::{Donor, Feedback, Notification};
use dit_common::models::Donation;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct DonationRepository {
    donations: Arc<RwLock<Vec<Donation>>>,
}

impl DonationRepository {
    pub fn new(donations: Vec<Donation>) -> Self {
        Self {
            donations: Arc::new(RwLock::new(donations)),
        }
    }

    pub async fn list(&self) -> Vec<Donation> {
        self.donations.read().await.clone()
    }

    pub async fn insert(&self, donation: Donation) -> Donation {
        self.donations.write().await.push(donation.clone());
        donation
    }
}

#[derive(Debug, Clone, Default)]
pub struct DonorRepository {
    donors: Arc<RwLock<Vec<Donor>>>,
}

impl DonorRepository {
    pub fn new(donors: Vec<Donor>) -> Self {
        Self {
            donors: Arc::new(RwLock::new(donors)),
        }
    }

    pub async fn list(&self) -> Vec<Donor> {
        self.donors.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Donor> {
        self.donors.read().await.iter().find(|d| d.id == id).cloned()
    }

    /// Insert a donor unless the email is already registered
    pub async fn insert(&self, donor: Donor) -> ApiResult<Donor> {
        let mut donors = self.donors.write().await;
        if donors.iter().any(|d| d.email == donor.email) {
            return Err(ApiError::Conflict(
                "A donor with this email already exists".to_string(),
            ));
        }
        donors.push(donor.clone());
        Ok(donor)
    }

    /// Overlay `changes` onto the stored donor; the id never changes
    pub async fn update(&self, id: &str, changes: Map<String, Value>) -> ApiResult<Donor> {
        let mut donors = self.donors.write().await;
        let slot = donors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

        let mut merged = match serde_json::to_value(&*slot) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(ApiError::Internal("Donor did not serialize to an object".to_string())),
            Err(e) => return Err(ApiError::Internal(e.to_string())),
        };
        merged.extend(changes);
        merged.insert("id".to_string(), Value::String(id.to_string()));

        let updated: Donor = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ApiError::BadRequest(format!("Invalid donor update: {}", e)))?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Remove a donor, returning whether it existed
    pub async fn delete(&self, id: &str) -> bool {
        let mut donors = self.donors.write().await;
        let before = donors.len();
        donors.retain(|d| d.id != id);
        donors.len() != before
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedbackRepository {
    feedback: Arc<RwLock<Vec<Feedback>>>,
}

impl FeedbackRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Feedback> {
        self.feedback.read().await.clone()
    }

    pub async fn insert(&self, feedback: Feedback) -> Feedback {
        self.feedback.write().await.push(feedback.clone());
        feedback
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationRepository {
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl NotificationRepository {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            notifications: Arc::new(RwLock::new(notifications)),
        }
    }

    /// A donor's notifications, newest first
    pub async fn for_donor(&self, donor_id: &str, unread_only: bool) -> Vec<Notification> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .read()
            .await
            .iter()
            .filter(|n| n.donor_id == donor_id && !(unread_only && n.read))
            .cloned()
            .collect();
        notifications.sort_by(|a, b| b.date.cmp(&a.date));
        notifications
    }

    pub async fn unread_count(&self, donor_id: &str) -> usize {
        self.notifications
            .read()
            .await
            .iter()
            .filter(|n| n.donor_id == donor_id && !n.read)
            .count()
    }

    pub async fn insert(&self, notification: Notification) -> Notification {
        self.notifications.write().await.push(notification.clone());
        notification
    }

    /// Flag one notification as read, returning whether it exists
    pub async fn mark_read(&self, id: &str) -> bool {
        match self.notifications.write().await.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Flag every notification of a donor as read, returning how many changed
    pub async fn mark_all_read(&self, donor_id: &str) -> usize {
        let mut notifications = self.notifications.write().await;
        let mut changed = 0;
        for notification in notifications.iter_mut().filter(|n| n.donor_id == donor_id && !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }
}
