//! dit-etl library interface
//!
//! NCCS IRS 990 data pipeline: fetch raw CSV tables, merge them into
//! organization records, then synthesize campaigns, donations and impact
//! locations and export them as JSON for the API.

pub mod categorize;
pub mod combine;
pub mod csv;
pub mod export;
pub mod fetcher;
pub mod geocode;
pub mod merger;
pub mod pipeline;
pub mod stats;
pub mod synth;
pub mod tables;

pub use crate::pipeline::{rng_from_seed, TransformOutput, Transformer};
