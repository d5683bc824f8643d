//! Combined organization dataset and its summary

use crate::export::write_json_pretty;
use crate::merger::{DirectoryTableSource, MergeOutcome, OrganizationMerger};
use crate::tables::NccsTable;
use chrono::Utc;
use dit_common::config::Settings;
use dit_common::stats::{CombinedDataset, CombinedMetadata, CombinedSummary, RankedMap, TopOrganization};
use dit_common::{Error, OrganizationRecord, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

pub const COMBINED_SOURCE: &str = "National Center for Charitable Statistics (NCCS)";
pub const DATASET_URL: &str = "https://nccs.urban.org/nccs/catalogs/catalog-efile-v2.html";

const TOP_STATES: usize = 10;
const TOP_ORGANIZATIONS: usize = 20;

/// Revenue buckets, lower bound inclusive
const REVENUE_RANGES: [(&str, f64); 5] = [
    ("Under $100K", 0.0),
    ("$100K - $1M", 100_000.0),
    ("$1M - $10M", 1_000_000.0),
    ("$10M - $100M", 10_000_000.0),
    ("Over $100M", 100_000_000.0),
];

fn revenue_bucket(revenue: f64) -> usize {
    REVENUE_RANGES
        .iter()
        .rposition(|(_, lower)| revenue >= *lower)
        .unwrap_or(0)
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Summary statistics over merged organizations (expected revenue-ranked)
pub fn summarize(organizations: &[OrganizationRecord]) -> CombinedSummary {
    let total_revenue: f64 = organizations.iter().map(|o| o.total_revenue).sum();
    let total_assets: f64 = organizations.iter().map(|o| o.total_assets).sum();
    let average_revenue = if organizations.is_empty() {
        0.0
    } else {
        total_revenue / organizations.len() as f64
    };

    let mut range_counts = [0u64; REVENUE_RANGES.len()];
    let mut states: Vec<(&str, u64)> = Vec::new();
    for org in organizations {
        range_counts[revenue_bucket(org.total_revenue)] += 1;
        if let Some(state) = org.state.as_deref().filter(|s| !s.is_empty()) {
            match states.iter_mut().find(|(s, _)| *s == state) {
                Some((_, n)) => *n += 1,
                None => states.push((state, 1)),
            }
        }
    }
    states.sort_by(|a, b| b.1.cmp(&a.1));
    states.truncate(TOP_STATES);

    let revenue_ranges: RankedMap = REVENUE_RANGES
        .iter()
        .zip(range_counts)
        .map(|((label, _), count)| (label.to_string(), Value::from(count)))
        .collect();
    let state_distribution: RankedMap = states
        .into_iter()
        .map(|(state, count)| (state.to_string(), Value::from(count)))
        .collect();

    let mut revenues: Vec<f64> = organizations.iter().map(|o| o.total_revenue).collect();

    CombinedSummary {
        total_organizations: organizations.len(),
        total_revenue,
        total_assets,
        average_revenue,
        median_revenue: median(&mut revenues),
        revenue_ranges,
        state_distribution,
        top_organizations: organizations
            .iter()
            .take(TOP_ORGANIZATIONS)
            .map(|o| TopOrganization {
                name: o.organization_name.clone(),
                ein: o.ein.clone(),
                revenue: o.total_revenue,
                state: o.state.clone(),
            })
            .collect(),
    }
}

/// Merge the CSV tables found in the configured data directory
pub fn combine(settings: &Settings) -> MergeOutcome {
    let source = DirectoryTableSource::new(&settings.data_dir, Some(settings.max_records));
    OrganizationMerger::new(settings.years.clone()).merge(&source)
}

/// Write the combined dataset and its summary into the data directory
pub fn save_combined(settings: &Settings, organizations: Vec<OrganizationRecord>) -> Result<CombinedSummary> {
    fs::create_dir_all(&settings.data_dir)?;

    let metadata = CombinedMetadata {
        generated_at: Utc::now(),
        source: COMBINED_SOURCE.to_string(),
        dataset_url: DATASET_URL.to_string(),
        years: settings.years.clone(),
        record_count: organizations.len(),
        tables: NccsTable::ALL.iter().map(|t| t.table_id().to_string()).collect(),
        max_records_per_table: settings.max_records,
    };
    let summary = summarize(&organizations);
    let dataset = CombinedDataset {
        metadata: serde_json::to_value(&metadata)?,
        organizations,
    };

    let combined_path = settings.combined_data_path();
    write_json_pretty(&combined_path, &dataset)?;
    info!(
        file = %combined_path.display(),
        organizations = dataset.organizations.len(),
        "Saved combined data"
    );

    let summary_path = settings.summary_path();
    write_json_pretty(&summary_path, &summary)?;
    info!(file = %summary_path.display(), "Saved summary statistics");

    Ok(summary)
}

/// Merge local tables and persist the result
pub fn combine_and_save(settings: &Settings) -> Result<CombinedSummary> {
    let outcome = combine(settings);
    save_combined(settings, outcome.organizations)
}

/// Load a combined dataset; a missing file is [`Error::NotFound`]
pub fn load_combined(path: &Path) -> Result<CombinedDataset> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "NCCS data file not found: {}",
            path.display()
        )));
    }
    info!(file = %path.display(), "Loading NCCS data");
    let content = fs::read_to_string(path)?;
    let dataset: CombinedDataset = serde_json::from_str(&content)?;
    info!(organizations = dataset.organizations.len(), "Loaded organizations");
    Ok(dataset)
}
