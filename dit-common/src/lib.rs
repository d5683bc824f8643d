//! # Donation Impact Tracker common library
//!
//! Shared code for the ETL pipeline and the HTTP API:
//! - Data model (organizations, campaigns, donations, impact locations)
//! - Transformation metadata and statistics types
//! - Configuration loading
//! - Deterministic id hashing

pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod stats;

pub use error::{Error, Result};
pub use models::{
    Campaign, CampaignStatus, Category, Donation, DonorType, ImpactLocation, ImpactMetrics, Location,
    OrganizationRecord,
};
