//! Campaign synthesis: one campaign per organization above the revenue threshold

use super::tax_year_bounds;
use crate::categorize::categorize;
use crate::geocode::geocode;
use dit_common::ids;
use dit_common::models::{
    Campaign, CampaignStatus, Category, ImpactMetrics, Location, OrganizationRecord,
    DEFAULT_COUNTRY,
};
use rand::Rng;
use tracing::{info, warn};

/// Organizations must exceed this revenue to become a campaign
pub const CAMPAIGN_REVENUE_THRESHOLD: f64 = 50_000.0;

/// Goal is revenue times a factor drawn from `[GOAL_FACTOR_MIN, GOAL_FACTOR_MIN + GOAL_FACTOR_SPAN)`
pub const GOAL_FACTOR_MIN: f64 = 1.2;
pub const GOAL_FACTOR_SPAN: f64 = 0.3;

/// `(base, span)` pairs for people helped, projects completed, resources distributed
type MetricRanges = [(f64, f64); 3];

fn metric_ranges(category: Category) -> MetricRanges {
    match category {
        Category::Education => [(50.0, 200.0), (2.0, 8.0), (100.0, 500.0)],
        Category::Healthcare => [(100.0, 400.0), (5.0, 15.0), (200.0, 800.0)],
        Category::SocialServices => [(80.0, 320.0), (3.0, 12.0), (150.0, 600.0)],
        _ => [(30.0, 120.0), (1.0, 5.0), (50.0, 200.0)],
    }
}

/// Revenue-scaled impact figures for a category
pub fn impact_metrics<R: Rng + ?Sized>(revenue: f64, category: Category, rng: &mut R) -> ImpactMetrics {
    let scale = (revenue / 100_000.0).floor().max(1.0);
    let [people, projects, resources] = metric_ranges(category);
    let mut draw = |(base, span): (f64, f64)| (scale * (base + rng.gen::<f64>() * span)).floor() as u64;

    ImpactMetrics {
        people_helped: draw(people),
        projects_completed: draw(projects),
        resources_distributed: draw(resources),
    }
}

#[derive(Debug, Clone, Default)]
pub struct CampaignOutput {
    pub campaigns: Vec<Campaign>,
    /// Organizations at or under the revenue threshold
    pub below_threshold: usize,
    /// Organizations whose tax year is not a valid calendar year
    pub invalid_tax_year: usize,
}

/// Derive campaigns from organizations, preserving input order
pub fn synthesize_campaigns<R: Rng + ?Sized>(
    organizations: &[OrganizationRecord],
    rng: &mut R,
) -> CampaignOutput {
    let mut output = CampaignOutput::default();

    for org in organizations {
        if org.total_revenue <= CAMPAIGN_REVENUE_THRESHOLD {
            output.below_threshold += 1;
            continue;
        }
        let Some((start_date, end_date)) = tax_year_bounds(org.tax_year) else {
            warn!(ein = %org.ein, tax_year = org.tax_year, "Skipping campaign with invalid tax year");
            output.invalid_tax_year += 1;
            continue;
        };

        let coordinates = geocode(org.state.as_deref(), rng);
        let category = categorize(&org.organization_name, org.mission_description.as_deref());
        let impact = impact_metrics(org.total_revenue, category, rng);

        let goal_factor = GOAL_FACTOR_MIN + rng.gen::<f64>() * GOAL_FACTOR_SPAN;
        let goal = (org.total_revenue * goal_factor).floor();
        let raised = org.total_revenue;

        let description = org
            .mission_description
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "Supporting {} initiatives in the community.",
                    category.as_str().to_lowercase()
                )
            });

        output.campaigns.push(Campaign {
            id: ids::campaign_id(&org.ein, org.tax_year),
            name: org.organization_name.clone(),
            description,
            goal,
            raised,
            category,
            location: Location {
                country: DEFAULT_COUNTRY.to_string(),
                region: org.region().to_string(),
                coordinates,
            },
            start_date,
            end_date,
            status: CampaignStatus::from_progress(raised, goal),
            beneficiaries: impact.people_helped,
            impact_metrics: impact,
        });
    }

    info!(
        campaigns = output.campaigns.len(),
        below_threshold = output.below_threshold,
        "Transformed organizations to campaigns"
    );
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn org(ein: &str, revenue: f64) -> OrganizationRecord {
        let mut org = OrganizationRecord::new(ein, 2023);
        org.organization_name = format!("Org {}", ein);
        org.total_revenue = revenue;
        org
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let orgs = vec![org("1", 50_000.0), org("2", 50_001.0), org("3", 40_000.0)];
        let output = synthesize_campaigns(&orgs, &mut StdRng::seed_from_u64(1));

        assert_eq!(output.campaigns.len(), 1);
        assert_eq!(output.campaigns[0].name, "Org 2");
        assert_eq!(output.below_threshold, 2);
    }

    #[test]
    fn test_campaign_fields() {
        let mut acme = org("123", 60_000.0);
        acme.organization_name = "Acme Charitable Trust".to_string();
        acme.state = Some("CA".to_string());
        acme.mission_description = Some("Advancing education".to_string());

        let output = synthesize_campaigns(&[acme], &mut StdRng::seed_from_u64(7));
        let campaign = &output.campaigns[0];

        assert_eq!(campaign.id, ids::campaign_id("123", 2023));
        assert_eq!(campaign.category, Category::Education);
        assert_eq!(campaign.raised, 60_000.0);
        assert!(campaign.goal >= 72_000.0 && campaign.goal < 90_000.0);
        assert_eq!(campaign.description, "Advancing education");
        assert_eq!(campaign.location.region, "CA");
        assert_eq!(campaign.location.country, "United States");
        assert_eq!(campaign.start_date.to_string(), "2023-01-01");
        assert_eq!(campaign.end_date.to_string(), "2023-12-31");
        assert_eq!(campaign.beneficiaries, campaign.impact_metrics.people_helped);
    }

    #[test]
    fn test_fallback_description_and_region() {
        let output = synthesize_campaigns(&[org("9", 75_000.0)], &mut StdRng::seed_from_u64(3));
        let campaign = &output.campaigns[0];

        assert_eq!(
            campaign.description,
            "Supporting general support initiatives in the community."
        );
        assert_eq!(campaign.location.region, "Unknown");
    }

    #[test]
    fn test_status_matches_goal_progress() {
        let orgs: Vec<OrganizationRecord> =
            (0..50).map(|i| org(&i.to_string(), 60_000.0 + i as f64 * 10_000.0)).collect();
        let output = synthesize_campaigns(&orgs, &mut StdRng::seed_from_u64(11));

        for campaign in &output.campaigns {
            assert!(campaign.goal > 0.0);
            let completed = campaign.raised >= 0.9 * campaign.goal;
            assert_eq!(campaign.status == CampaignStatus::Completed, completed);
        }
    }

    #[test]
    fn test_impact_metrics_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            // scale = floor(250_000 / 100_000) = 2
            let m = impact_metrics(250_000.0, Category::Healthcare, &mut rng);
            assert!((200..1000).contains(&m.people_helped));
            assert!((10..40).contains(&m.projects_completed));
            assert!((400..2000).contains(&m.resources_distributed));

            // Small revenue still scales by at least one
            let m = impact_metrics(10_000.0, Category::Research, &mut rng);
            assert!((30..150).contains(&m.people_helped));
            assert!((1..6).contains(&m.projects_completed));
        }
    }
}
