//! Read-only data loaded from the transformer's export directory
//!
//! Each collection falls back to an embedded mock array when its file is
//! absent or cannot be parsed.

pub mod mock;

use dit_common::models::{Campaign, Donation, ImpactLocation};
use dit_common::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, warn};

pub const DONATIONS_FILE: &str = "donations.json";
pub const CAMPAIGNS_FILE: &str = "campaigns.json";
pub const IMPACT_LOCATIONS_FILE: &str = "impact-locations.json";

/// Where a collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Export,
    Mock,
}

/// Collections served by the read endpoints
#[derive(Debug, Clone)]
pub struct DataStore {
    /// Initial donations; live donations are held by the repository
    pub donations: Vec<Donation>,
    pub campaigns: Vec<Campaign>,
    pub impact_locations: Vec<ImpactLocation>,
    pub donations_source: DataSource,
    pub campaigns_source: DataSource,
    pub impact_locations_source: DataSource,
}

impl DataStore {
    /// Load every collection from `dir`
    pub fn load(dir: &Path) -> Self {
        let (donations, donations_source) = load_collection(&dir.join(DONATIONS_FILE), mock::donations);
        let (campaigns, campaigns_source) = load_collection(&dir.join(CAMPAIGNS_FILE), mock::campaigns);
        let (impact_locations, impact_locations_source) =
            load_collection(&dir.join(IMPACT_LOCATIONS_FILE), mock::impact_locations);

        Self {
            donations,
            campaigns,
            impact_locations,
            donations_source,
            campaigns_source,
            impact_locations_source,
        }
    }

    /// Mock collections only
    pub fn mock() -> Self {
        Self {
            donations: mock::donations(),
            campaigns: mock::campaigns(),
            impact_locations: mock::impact_locations(),
            donations_source: DataSource::Mock,
            campaigns_source: DataSource::Mock,
            impact_locations_source: DataSource::Mock,
        }
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(Error::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn load_collection<T: DeserializeOwned>(path: &Path, fallback: fn() -> Vec<T>) -> (Vec<T>, DataSource) {
    match read_collection(path) {
        Ok(items) => {
            info!(file = %path.display(), count = items.len(), "Loaded export");
            (items, DataSource::Export)
        }
        Err(Error::NotFound(_)) => {
            warn!(file = %path.display(), "Export not found, serving mock data");
            (fallback(), DataSource::Mock)
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Failed to read export, serving mock data");
            (fallback(), DataSource::Mock)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_fall_back_to_mock() {
        let temp = TempDir::new().unwrap();
        let store = DataStore::load(temp.path());

        assert_eq!(store.donations_source, DataSource::Mock);
        assert_eq!(store.donations.len(), mock::donations().len());
        assert_eq!(store.campaigns_source, DataSource::Mock);
    }

    #[test]
    fn test_export_files_are_preferred() {
        let temp = TempDir::new().unwrap();
        let campaigns = vec![mock::campaigns().remove(1)];
        std::fs::write(
            temp.path().join(CAMPAIGNS_FILE),
            serde_json::to_string(&campaigns).unwrap(),
        )
        .unwrap();

        let store = DataStore::load(temp.path());
        assert_eq!(store.campaigns_source, DataSource::Export);
        assert_eq!(store.campaigns, campaigns);
        assert_eq!(store.impact_locations_source, DataSource::Mock);
    }

    #[test]
    fn test_read_errors_are_classified() {
        let temp = TempDir::new().unwrap();
        let missing = read_collection::<Campaign>(&temp.path().join(CAMPAIGNS_FILE));
        assert!(matches!(missing, Err(Error::NotFound(_))));

        std::fs::write(temp.path().join(CAMPAIGNS_FILE), "[1, 2]").unwrap();
        let malformed = read_collection::<Campaign>(&temp.path().join(CAMPAIGNS_FILE));
        assert!(matches!(malformed, Err(Error::Json(_))));

        // A directory where the file should be cannot be read
        std::fs::create_dir(temp.path().join(DONATIONS_FILE)).unwrap();
        let unreadable = read_collection::<Donation>(&temp.path().join(DONATIONS_FILE));
        assert!(matches!(unreadable, Err(Error::Io(_))));
    }

    #[test]
    fn test_unparseable_file_falls_back_to_mock() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(DONATIONS_FILE), "{ not json").unwrap();

        let store = DataStore::load(temp.path());
        assert_eq!(store.donations_source, DataSource::Mock);
    }
}
