//! Run metadata and summary statistics over the synthesized collections

use chrono::Utc;
use dit_common::models::{Campaign, CampaignStatus, Donation, ImpactLocation};
use dit_common::stats::{DateRange, RankedMap, Statistics, TransformMetadata};
use serde_json::Value;

pub const SOURCE_DATASET: &str = "NCCS IRS 990 Efilers";

/// Number of entries kept in the ranked category and state maps
pub const TOP_N: usize = 10;

/// Metadata for a run; `donations` must already be sorted by date
pub fn build_metadata(
    record_count: usize,
    donations: &[Donation],
    campaigns: &[Campaign],
) -> TransformMetadata {
    let date_range = match (donations.first(), donations.last()) {
        (Some(first), Some(last)) => DateRange {
            start: first.date.to_string(),
            end: last.date.to_string(),
        },
        _ => DateRange::default(),
    };

    TransformMetadata {
        generated_at: Utc::now(),
        source_dataset: SOURCE_DATASET.to_string(),
        record_count,
        total_donations: donations.iter().map(|d| d.amount).sum(),
        total_campaigns: campaigns.len(),
        date_range,
    }
}

pub fn build_statistics(
    metadata: &TransformMetadata,
    donations: &[Donation],
    campaigns: &[Campaign],
    locations: &[ImpactLocation],
) -> Statistics {
    let average_donation = if donations.is_empty() {
        0.0
    } else {
        metadata.total_donations / donations.len() as f64
    };
    let (average_campaign_goal, completion_rate) = if campaigns.is_empty() {
        (0.0, 0.0)
    } else {
        let count = campaigns.len() as f64;
        let goals: f64 = campaigns.iter().map(|c| c.goal).sum();
        let completed = campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Completed)
            .count();
        (goals / count, completed as f64 / count)
    };

    Statistics {
        average_donation,
        average_campaign_goal,
        completion_rate,
        top_categories: top_categories(campaigns),
        top_states: top_states(locations),
        donor_type_distribution: donor_type_distribution(donations),
    }
}

/// Tally keys in first-seen order
fn tally<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, u64)> {
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(k, _)| *k == key) {
            Some((_, n)) => *n += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

fn into_ranked_map<K: ToString, V: Into<Value>>(entries: impl IntoIterator<Item = (K, V)>) -> RankedMap {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into()))
        .collect()
}

/// Campaign count per category, highest first, ties in first-seen order
pub fn top_categories(campaigns: &[Campaign]) -> RankedMap {
    let mut counts = tally(campaigns.iter().map(|c| c.category.as_str()));
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(TOP_N);
    into_ranked_map(counts)
}

/// Donation totals of the first locations; `locations` is already ranked
pub fn top_states(locations: &[ImpactLocation]) -> RankedMap {
    into_ranked_map(
        locations
            .iter()
            .take(TOP_N)
            .map(|l| (l.name.as_str(), l.total_donations)),
    )
}

pub fn donor_type_distribution(donations: &[Donation]) -> RankedMap {
    into_ranked_map(tally(donations.iter().map(|d| d.donor_type.as_str())))
}
