//! Transformation pipeline: combined dataset to donation tracker exports
//!
//! Stages run in a fixed order over in-memory collections: campaigns, then
//! donations, then impact locations. Nothing is written until every stage has
//! finished.

use crate::combine::load_combined;
use crate::export::write_outputs;
use crate::stats::{build_metadata, build_statistics};
use crate::synth::{aggregate_locations, synthesize_campaigns, synthesize_donations, tax_year_bounds};
use dit_common::config::Settings;
use dit_common::stats::{DiscardCounts, TrackerBundle, TransformationStats};
use dit_common::{OrganizationRecord, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use tracing::info;

/// Seeded generator when a seed is given, entropy-seeded otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub bundle: TrackerBundle,
    pub stats: TransformationStats,
}

/// Synthesize all collections from already-loaded organizations
pub fn transform_organizations<R: Rng + ?Sized>(
    organizations: &[OrganizationRecord],
    rng: &mut R,
) -> TransformOutput {
    info!(organizations = organizations.len(), "Transforming organizations");

    let campaigns = synthesize_campaigns(organizations, rng);
    let donations = synthesize_donations(organizations, rng);
    let locations = aggregate_locations(&campaigns.campaigns, &donations.donations);

    let discards = DiscardCounts {
        below_revenue_threshold: campaigns.below_threshold,
        below_contribution_threshold: donations.below_threshold,
        below_amount_floor: donations.below_floor,
        orphan_region_donations: locations.orphan_donations,
        invalid_tax_year: organizations
            .iter()
            .filter(|o| tax_year_bounds(o.tax_year).is_none())
            .count(),
    };

    let metadata = build_metadata(organizations.len(), &donations.donations, &campaigns.campaigns);
    let statistics = build_statistics(
        &metadata,
        &donations.donations,
        &campaigns.campaigns,
        &locations.locations,
    );

    info!(
        campaigns = campaigns.campaigns.len(),
        donations = donations.donations.len(),
        impact_locations = locations.locations.len(),
        total_donations = metadata.total_donations,
        "Transformation summary"
    );

    TransformOutput {
        stats: TransformationStats {
            metadata: metadata.clone(),
            statistics,
            discards,
        },
        bundle: TrackerBundle {
            donations: donations.donations,
            campaigns: campaigns.campaigns,
            impact_locations: locations.locations,
            metadata,
        },
    }
}

/// Transforms a combined dataset file into export files
pub struct Transformer {
    input_file: PathBuf,
    output_dir: PathBuf,
    max_organizations: usize,
    rng: StdRng,
}

impl Transformer {
    pub fn new(
        input_file: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        max_organizations: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_dir: output_dir.into(),
            max_organizations,
            rng: rng_from_seed(seed),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.combined_data_path(),
            &settings.output_dir,
            settings.max_organizations,
            settings.seed,
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Load the combined dataset and synthesize all collections
    ///
    /// Fails when the combined dataset is missing or unreadable.
    pub fn transform(&mut self) -> Result<TransformOutput> {
        let mut dataset = load_combined(&self.input_file)?;
        if dataset.organizations.len() > self.max_organizations {
            info!(
                loaded = dataset.organizations.len(),
                kept = self.max_organizations,
                "Truncating organizations"
            );
            dataset.organizations.truncate(self.max_organizations);
        }
        Ok(transform_organizations(&dataset.organizations, &mut self.rng))
    }

    /// Transform then write every export file
    pub fn run(&mut self) -> Result<TransformOutput> {
        let output = self.transform()?;
        write_outputs(&self.output_dir, &output.bundle, &output.stats)?;
        info!(dir = %self.output_dir.display(), "Data transformation completed");
        Ok(output)
    }
}
