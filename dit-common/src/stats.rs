//! Export envelope types: combined dataset, transformation metadata and statistics

use crate::models::{Campaign, Donation, ImpactLocation, OrganizationRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name-to-value map whose serialized key order is the rank order
pub type RankedMap = serde_json::Map<String, serde_json::Value>;

/// Merged organization dataset, `nccs-combined-data.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedDataset {
    /// Free-form provenance block; readers do not depend on its shape
    #[serde(default)]
    pub metadata: serde_json::Value,
    pub organizations: Vec<OrganizationRecord>,
}

/// Provenance written alongside the merged organizations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub dataset_url: String,
    pub years: Vec<i32>,
    pub record_count: usize,
    pub tables: Vec<String>,
    pub max_records_per_table: usize,
}

/// Summary of a merged dataset, `nccs-data-summary.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSummary {
    pub total_organizations: usize,
    pub total_revenue: f64,
    pub total_assets: f64,
    pub average_revenue: f64,
    pub median_revenue: f64,
    pub revenue_ranges: RankedMap,
    pub state_distribution: RankedMap,
    pub top_organizations: Vec<TopOrganization>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopOrganization {
    pub name: String,
    pub ein: String,
    pub revenue: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Metadata block of a transformation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformMetadata {
    pub generated_at: DateTime<Utc>,
    pub source_dataset: String,
    pub record_count: usize,
    pub total_donations: f64,
    pub total_campaigns: usize,
    pub date_range: DateRange,
}

/// Records dropped by the filter stages of a transformation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardCounts {
    /// Organizations at or under the campaign revenue threshold
    pub below_revenue_threshold: usize,
    /// Organizations at or under the contributions threshold for donations
    pub below_contribution_threshold: usize,
    /// Synthesized donations at or under the amount floor
    pub below_amount_floor: usize,
    /// Donations whose region has no campaign, left out of location totals
    pub orphan_region_donations: usize,
    /// Organizations whose tax year is not a valid calendar year
    pub invalid_tax_year: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub average_donation: f64,
    pub average_campaign_goal: f64,
    pub completion_rate: f64,
    pub top_categories: RankedMap,
    pub top_states: RankedMap,
    pub donor_type_distribution: RankedMap,
}

/// `transformation-stats.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationStats {
    #[serde(flatten)]
    pub metadata: TransformMetadata,
    pub statistics: Statistics,
    pub discards: DiscardCounts,
}

/// `donation-tracker-data.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerBundle {
    pub donations: Vec<Donation>,
    pub campaigns: Vec<Campaign>,
    pub impact_locations: Vec<ImpactLocation>,
    pub metadata: TransformMetadata,
}
