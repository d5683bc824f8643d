//! Impact summary computed from the current donations and campaigns

use axum::{
    extract::{Query, State},
    Json,
};
use dit_common::models::{Campaign, Donation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ImpactQuery {
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegionImpact {
    pub donations: usize,
    pub amount: f64,
    pub beneficiaries: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactTotal {
    pub total: u64,
    pub description: &'static str,
}

/// Campaign impact metrics summed across every campaign
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactsByType {
    pub people_helped: ImpactTotal,
    pub projects_completed: ImpactTotal,
    pub resources_distributed: ImpactTotal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub total_donations: usize,
    pub total_amount: f64,
    pub total_beneficiaries: u64,
    pub impacts_by_type: ImpactsByType,
    /// Region name to totals, in first-seen order
    pub region_breakdown: Map<String, Value>,
}

fn region_entry<'a>(regions: &'a mut Vec<(String, RegionImpact)>, name: &str) -> &'a mut RegionImpact {
    let index = match regions.iter().position(|(n, _)| n == name) {
        Some(index) => index,
        None => {
            regions.push((name.to_string(), RegionImpact::default()));
            regions.len() - 1
        }
    };
    &mut regions[index].1
}

/// Totals across everything, narrowed to `region` when it is a known region
pub fn summarize(donations: &[Donation], campaigns: &[Campaign], region: Option<&str>) -> ImpactSummary {
    let mut regions: Vec<(String, RegionImpact)> = Vec::new();
    for campaign in campaigns {
        region_entry(&mut regions, &campaign.location.region).beneficiaries += campaign.beneficiaries;
    }
    for donation in donations {
        let entry = region_entry(&mut regions, &donation.location.region);
        entry.donations += 1;
        entry.amount += donation.amount;
    }

    let mut people = 0;
    let mut projects = 0;
    let mut resources = 0;
    for campaign in campaigns {
        people += campaign.impact_metrics.people_helped;
        projects += campaign.impact_metrics.projects_completed;
        resources += campaign.impact_metrics.resources_distributed;
    }
    let impacts_by_type = ImpactsByType {
        people_helped: ImpactTotal {
            total: people,
            description: "People helped by funded programs",
        },
        projects_completed: ImpactTotal {
            total: projects,
            description: "Projects completed",
        },
        resources_distributed: ImpactTotal {
            total: resources,
            description: "Resources distributed",
        },
    };

    let (total_donations, total_amount, total_beneficiaries) =
        match region.and_then(|r| regions.iter().find(|(n, _)| n == r)) {
            Some((_, only)) => (only.donations, only.amount, only.beneficiaries),
            None => (
                donations.len(),
                donations.iter().map(|d| d.amount).sum(),
                campaigns.iter().map(|c| c.beneficiaries).sum(),
            ),
        };

    ImpactSummary {
        total_donations,
        total_amount,
        total_beneficiaries,
        impacts_by_type,
        region_breakdown: regions
            .into_iter()
            .map(|(name, impact)| {
                let totals = json!({
                    "donations": impact.donations,
                    "amount": impact.amount,
                    "beneficiaries": impact.beneficiaries,
                });
                (name, totals)
            })
            .collect(),
    }
}

/// GET /api/impact-summary
pub async fn impact_summary(
    State(state): State<AppState>,
    Query(query): Query<ImpactQuery>,
) -> Json<ImpactSummary> {
    let donations = state.donations.list().await;
    Json(summarize(
        &donations,
        &state.store.campaigns,
        query.region.as_deref().filter(|r| !r.is_empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock;

    #[test]
    fn test_totals_across_all_regions() {
        let summary = summarize(&mock::donations(), &mock::campaigns(), None);

        assert_eq!(summary.total_donations, 2);
        assert_eq!(summary.total_amount, 750.0);
        assert_eq!(summary.total_beneficiaries, 2090);
        assert_eq!(summary.region_breakdown.len(), 2);
        assert_eq!(summary.region_breakdown["Europe"]["amount"], 250.0);
        assert_eq!(summary.impacts_by_type.people_helped.total, 2090);
        assert_eq!(summary.impacts_by_type.resources_distributed.total, 20_460);
    }

    #[test]
    fn test_known_region_narrows_totals() {
        let summary = summarize(&mock::donations(), &mock::campaigns(), Some("North America"));

        assert_eq!(summary.total_donations, 1);
        assert_eq!(summary.total_amount, 500.0);
        assert_eq!(summary.total_beneficiaries, 1200);
        // Breakdown still lists every region
        assert_eq!(summary.region_breakdown.len(), 2);
    }

    #[test]
    fn test_unknown_region_keeps_overall_totals() {
        let summary = summarize(&mock::donations(), &mock::campaigns(), Some("Atlantis"));
        assert_eq!(summary.total_donations, 2);
    }

    #[test]
    fn test_empty_store() {
        let summary = summarize(&[], &[], None);
        assert_eq!(summary.total_donations, 0);
        assert_eq!(summary.total_amount, 0.0);
        assert!(summary.region_breakdown.is_empty());
    }
}
