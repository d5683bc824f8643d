//! Data model shared by the pipeline exports and the HTTP API
//!
//! JSON field names are part of the contract with the API consumers:
//! organizations keep the NCCS column names, everything else is camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COUNTRY: &str = "United States";
pub const UNKNOWN_REGION: &str = "Unknown";

/// One organization filing, keyed by (EIN, tax year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OrganizationRecord {
    pub ein: String,
    pub organization_name: String,
    pub tax_year: i32,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_assets: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_service_revenue: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributions_grants: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_income: Option<f64>,
}

impl OrganizationRecord {
    /// Fresh record with zeroed financials, as created on first sight of a key
    pub fn new(ein: impl Into<String>, tax_year: i32) -> Self {
        Self {
            ein: ein.into(),
            organization_name: String::new(),
            tax_year,
            total_revenue: 0.0,
            total_expenses: 0.0,
            total_assets: 0.0,
            address_line_1: None,
            city: None,
            state: None,
            zip_code: None,
            mission_description: None,
            program_service_revenue: None,
            contributions_grants: None,
            investment_income: None,
        }
    }

    /// State abbreviation, or the unknown-region marker
    pub fn region(&self) -> &str {
        self.state
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_REGION)
    }
}

/// Campaign category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Social Services")]
    SocialServices,
    #[serde(rename = "Arts & Culture")]
    ArtsCulture,
    #[serde(rename = "Environment")]
    Environment,
    #[serde(rename = "Religion")]
    Religion,
    #[serde(rename = "International Aid")]
    InternationalAid,
    #[serde(rename = "Human Rights")]
    HumanRights,
    #[serde(rename = "Research")]
    Research,
    #[serde(rename = "General Support")]
    GeneralSupport,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Education => "Education",
            Category::Healthcare => "Healthcare",
            Category::SocialServices => "Social Services",
            Category::ArtsCulture => "Arts & Culture",
            Category::Environment => "Environment",
            Category::Religion => "Religion",
            Category::InternationalAid => "International Aid",
            Category::HumanRights => "Human Rights",
            Category::Research => "Research",
            Category::GeneralSupport => "General Support",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country, region and `[longitude, latitude]` of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub region: String,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Completed,
}

impl CampaignStatus {
    /// `Completed` once at least 90% of the goal has been raised
    pub fn from_progress(raised: f64, goal: f64) -> Self {
        if raised >= goal * 0.9 {
            CampaignStatus::Completed
        } else {
            CampaignStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    pub people_helped: u64,
    pub projects_completed: u64,
    pub resources_distributed: u64,
}

/// Fundraising entity derived from one qualifying organization filing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub description: String,
    pub goal: f64,
    pub raised: f64,
    pub category: Category,
    pub location: Location,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CampaignStatus,
    pub beneficiaries: u64,
    pub impact_metrics: ImpactMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonorType {
    Individual,
    Corporate,
    Foundation,
    Government,
}

impl DonorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonorType::Individual => "individual",
            DonorType::Corporate => "corporate",
            DonorType::Foundation => "foundation",
            DonorType::Government => "government",
        }
    }
}

/// A single donation transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: String,
    /// Only set on donations recorded through the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_id: Option<String>,
    pub donor_name: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// Id (or, for API-recorded donations, name) of the campaign
    pub campaign: String,
    pub location: Location,
    #[serde(rename = "type")]
    pub donor_type: DonorType,
    pub recurring: bool,
    pub anonymous: bool,
}

/// Per-region aggregate of campaigns and donations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactLocation {
    pub id: String,
    pub name: String,
    pub coordinates: [f64; 2],
    pub total_donations: f64,
    pub active_campaigns: usize,
    pub beneficiaries: u64,
    pub impact_score: u32,
}
