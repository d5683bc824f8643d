//! Donation synthesis from aggregate contributions and grants
//!
//! Each qualifying organization's contributions figure is split across a random
//! number of transactions with a Pareto-shaped multiplier. Amounts at or under
//! the floor are dropped without redistribution, so the realized total usually
//! differs from the source figure.

use super::tax_year_bounds;
use crate::geocode::geocode;
use chrono::Duration;
use dit_common::ids;
use dit_common::models::{Donation, DonorType, Location, OrganizationRecord, DEFAULT_COUNTRY};
use rand::Rng;
use tracing::{debug, info};

/// Organizations must exceed this contributions figure to produce donations
pub const CONTRIBUTION_THRESHOLD: f64 = 1_000.0;

/// Donations at or under this amount are discarded
pub const AMOUNT_FLOOR: f64 = 100.0;

pub const MIN_DONATIONS_PER_ORG: usize = 3;
pub const MAX_DONATIONS_PER_ORG: usize = 15;

pub const RECURRING_PROBABILITY: f64 = 0.3;
pub const ANONYMOUS_PROBABILITY: f64 = 0.15;

pub const DONOR_NAMES: [&str; 12] = [
    "Anonymous Donor",
    "Community Foundation",
    "Local Business Alliance",
    "Individual Supporter",
    "Corporate Partnership",
    "Family Foundation",
    "Charitable Trust",
    "Grant Foundation",
    "Major Donor",
    "Monthly Supporter",
    "Event Fundraiser",
    "Online Campaign",
];

/// Donor type for an amount given a uniform draw in `[0, 1)`
///
/// Tiers are keyed on amount (over $100K, over $10K, the rest) with cumulative
/// probability breakpoints within each tier.
pub fn donor_type_for(amount: f64, draw: f64) -> DonorType {
    if amount > 100_000.0 {
        if draw < 0.4 {
            DonorType::Foundation
        } else if draw < 0.7 {
            DonorType::Corporate
        } else if draw < 0.9 {
            DonorType::Government
        } else {
            DonorType::Individual
        }
    } else if amount > 10_000.0 {
        if draw < 0.3 {
            DonorType::Corporate
        } else if draw < 0.5 {
            DonorType::Foundation
        } else {
            DonorType::Individual
        }
    } else if draw < 0.8 {
        DonorType::Individual
    } else {
        DonorType::Corporate
    }
}

#[derive(Debug, Clone, Default)]
pub struct DonationOutput {
    /// Sorted by date ascending
    pub donations: Vec<Donation>,
    /// Organizations at or under the contributions threshold
    pub below_threshold: usize,
    /// Generated amounts at or under the floor
    pub below_floor: usize,
    pub invalid_tax_year: usize,
}

/// Synthesize donation transactions for every organization with enough contributions
pub fn synthesize_donations<R: Rng + ?Sized>(
    organizations: &[OrganizationRecord],
    rng: &mut R,
) -> DonationOutput {
    let mut output = DonationOutput::default();

    for org in organizations {
        let contributions = org.contributions_grants.unwrap_or(0.0);
        if contributions <= CONTRIBUTION_THRESHOLD {
            output.below_threshold += 1;
            continue;
        }
        let Some((year_start, year_end)) = tax_year_bounds(org.tax_year) else {
            output.invalid_tax_year += 1;
            continue;
        };
        let days_in_year = (year_end - year_start).num_days();

        let count = rng.gen_range(MIN_DONATIONS_PER_ORG..=MAX_DONATIONS_PER_ORG);
        let share = contributions / count as f64;
        let campaign = ids::campaign_id(&org.ein, org.tax_year);

        for index in 0..count {
            let weight: f64 = rng.gen();
            let amount = (share * (0.1 + weight * weight * 3.0)).floor();
            if amount <= AMOUNT_FLOOR {
                output.below_floor += 1;
                continue;
            }

            let donor_name = DONOR_NAMES[rng.gen_range(0..DONOR_NAMES.len())];
            let date = year_start + Duration::days(rng.gen_range(0..=days_in_year));
            let coordinates = geocode(org.state.as_deref(), rng);
            let donor_type = donor_type_for(amount, rng.gen());
            let recurring = rng.gen_bool(RECURRING_PROBABILITY);
            let anonymous = rng.gen_bool(ANONYMOUS_PROBABILITY);

            output.donations.push(Donation {
                id: ids::donation_id(&org.ein, index, org.tax_year),
                donor_id: None,
                donor_name: donor_name.to_string(),
                amount,
                date,
                campaign: campaign.clone(),
                location: Location {
                    country: DEFAULT_COUNTRY.to_string(),
                    region: org.region().to_string(),
                    coordinates,
                },
                donor_type,
                recurring,
                anonymous,
            });
        }
    }

    output.donations.sort_by_key(|d| d.date);

    if output.below_floor > 0 {
        debug!(dropped = output.below_floor, floor = AMOUNT_FLOOR, "Dropped donations under amount floor");
    }
    info!(
        donations = output.donations.len(),
        below_threshold = output.below_threshold,
        below_floor = output.below_floor,
        "Generated donations"
    );
    output
}
