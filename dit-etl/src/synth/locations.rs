//! Per-region aggregation of campaigns and donations

use dit_common::ids;
use dit_common::models::{Campaign, CampaignStatus, Donation, ImpactLocation};
use std::collections::HashMap;
use tracing::{debug, info};

/// Upper bound of the impact score
pub const MAX_IMPACT_SCORE: u32 = 100;

/// `min(100, floor(beneficiaries / total * 100000))`, zero when either side is zero
pub fn impact_score(beneficiaries: u64, total_donations: f64) -> u32 {
    if beneficiaries == 0 || total_donations <= 0.0 {
        return 0;
    }
    let score = (beneficiaries as f64 / total_donations * 100_000.0).floor();
    score.min(MAX_IMPACT_SCORE as f64) as u32
}

#[derive(Debug, Clone, Default)]
pub struct LocationOutput {
    /// Sorted by total donations descending
    pub locations: Vec<ImpactLocation>,
    /// Donations whose region has no campaign
    pub orphan_donations: usize,
}

/// Build one impact location per campaign region
///
/// Regions are seeded from campaigns only; coordinates come from the first
/// campaign seen in a region. Every campaign adds its beneficiaries, only
/// active ones add to the campaign count. Donations in regions without a campaign are
/// counted as orphans and left out of every total.
pub fn aggregate_locations(campaigns: &[Campaign], donations: &[Donation]) -> LocationOutput {
    let mut locations: Vec<ImpactLocation> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for campaign in campaigns {
        let region = campaign.location.region.as_str();
        let slot = *index.entry(region).or_insert_with(|| {
            locations.push(ImpactLocation {
                id: ids::location_id(region),
                name: region.to_string(),
                coordinates: campaign.location.coordinates,
                total_donations: 0.0,
                active_campaigns: 0,
                beneficiaries: 0,
                impact_score: 0,
            });
            locations.len() - 1
        });
        let location = &mut locations[slot];
        if campaign.status == CampaignStatus::Active {
            location.active_campaigns += 1;
        }
        location.beneficiaries += campaign.beneficiaries;
    }

    let mut orphan_donations = 0;
    for donation in donations {
        match index.get(donation.location.region.as_str()) {
            Some(&slot) => locations[slot].total_donations += donation.amount,
            None => orphan_donations += 1,
        }
    }

    for location in &mut locations {
        location.impact_score = impact_score(location.beneficiaries, location.total_donations);
    }
    locations.sort_by(|a, b| b.total_donations.total_cmp(&a.total_donations));

    if orphan_donations > 0 {
        debug!(orphan_donations, "Donations outside campaign regions left out of location totals");
    }
    info!(locations = locations.len(), "Generated impact locations");

    LocationOutput {
        locations,
        orphan_donations,
    }
}
