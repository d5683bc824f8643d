//! Campaign and impact location listings

use axum::{
    extract::{Query, State},
    Json,
};
use dit_common::models::{Campaign, ImpactLocation};
use serde::Deserialize;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CampaignQuery {
    /// Display name, case-insensitive ("Arts & Culture")
    pub category: Option<String>,
    /// `active` or `completed`
    pub status: Option<String>,
    pub region: Option<String>,
}

pub fn filter_campaigns<'a>(
    campaigns: &'a [Campaign],
    query: &CampaignQuery,
) -> Vec<&'a Campaign> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let status = query.status.as_deref().filter(|s| !s.is_empty());
    let region = query.region.as_deref().filter(|r| !r.is_empty());

    campaigns
        .iter()
        .filter(|c| category.map_or(true, |cat| c.category.as_str().eq_ignore_ascii_case(cat)))
        .filter(|c| status.map_or(true, |s| c.status.as_str().eq_ignore_ascii_case(s)))
        .filter(|c| region.map_or(true, |r| c.location.region == r))
        .collect()
}

/// GET /api/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignQuery>,
) -> Json<Vec<Campaign>> {
    Json(
        filter_campaigns(&state.store.campaigns, &query)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// GET /api/impact-locations
pub async fn list_impact_locations(State(state): State<AppState>) -> Json<Vec<ImpactLocation>> {
    Json(state.store.impact_locations.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock;

    #[test]
    fn test_filters() {
        let campaigns = mock::campaigns();

        let query = CampaignQuery {
            status: Some("COMPLETED".to_string()),
            ..Default::default()
        };
        let result = filter_campaigns(&campaigns, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "School Lunch Program");

        let query = CampaignQuery {
            category: Some("education".to_string()),
            region: Some("Europe".to_string()),
            ..Default::default()
        };
        let result = filter_campaigns(&campaigns, &query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Digital Learning Initiative");

        let query = CampaignQuery {
            category: Some("Healthcare".to_string()),
            ..Default::default()
        };
        assert!(filter_campaigns(&campaigns, &query).is_empty());
    }
}
