//! Read-only beneficiary testimonials

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::models::Testimonial;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialQuery {
    pub campaign: Option<String>,
    pub region: Option<String>,
    /// `true` keeps verified testimonials, any other value keeps unverified ones
    pub verified: Option<String>,
}

/// GET /api/testimonials
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(query): Query<TestimonialQuery>,
) -> Json<Vec<Testimonial>> {
    let keep = |filter: &Option<String>, value: &str| {
        filter.as_deref().filter(|f| !f.is_empty()).map_or(true, |f| f == value)
    };
    let testimonials = state
        .testimonials
        .iter()
        .filter(|t| keep(&query.campaign, &t.campaign))
        .filter(|t| keep(&query.region, &t.region))
        .filter(|t| query.verified.as_deref().map_or(true, |v| t.verified == (v == "true")))
        .cloned()
        .collect();
    Json(testimonials)
}
