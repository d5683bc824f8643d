//! JSON export of a transformation run

use dit_common::stats::{TrackerBundle, TransformationStats};
use dit_common::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DONATIONS_FILE: &str = "donations.json";
pub const CAMPAIGNS_FILE: &str = "campaigns.json";
pub const IMPACT_LOCATIONS_FILE: &str = "impact-locations.json";
pub const STATS_FILE: &str = "transformation-stats.json";
pub const BUNDLE_FILE: &str = "donation-tracker-data.json";

/// Serialize `value` as pretty-printed JSON to `path`
pub fn write_json_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write the five export files into `output_dir`, creating it if needed
///
/// Every document is serialized before the first file is touched.
pub fn write_outputs(
    output_dir: &Path,
    bundle: &TrackerBundle,
    stats: &TransformationStats,
) -> Result<Vec<PathBuf>> {
    let documents = [
        (BUNDLE_FILE, serde_json::to_string_pretty(bundle)?),
        (DONATIONS_FILE, serde_json::to_string_pretty(&bundle.donations)?),
        (CAMPAIGNS_FILE, serde_json::to_string_pretty(&bundle.campaigns)?),
        (IMPACT_LOCATIONS_FILE, serde_json::to_string_pretty(&bundle.impact_locations)?),
        (STATS_FILE, serde_json::to_string_pretty(stats)?),
    ];

    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(documents.len());
    for (name, json) in documents {
        let path = output_dir.join(name);
        fs::write(&path, json)?;
        info!(file = %path.display(), "Saved export");
        written.push(path);
    }
    Ok(written)
}
