//! NCCS efile downloader
//!
//! Downloads `{TABLE_ID}-{YEAR}.csv` files sequentially from the public
//! efile bucket. Files already present locally are skipped, so re-runs are
//! idempotent. A failed download is logged and left out; the merger treats
//! it like any other missing table. There is no retry.

use crate::tables::NccsTable;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

const USER_AGENT: &str = concat!("dit-etl/", env!("CARGO_PKG_VERSION"));

/// Download errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `(table, year)` combination that could not be downloaded
#[derive(Debug, Clone)]
pub struct FailedDownload {
    pub table: NccsTable,
    pub year: i32,
    pub reason: String,
}

/// Outcome of a download pass
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub downloaded: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<FailedDownload>,
}

/// Downloader for the four NCCS tables over a list of years
pub struct NccsFetcher {
    http_client: reqwest::Client,
    /// Fixed gap between consecutive requests
    request_delay: Duration,
    last_request: Mutex<Option<Instant>>,
    base_url: String,
    data_dir: PathBuf,
    years: Vec<i32>,
}

impl NccsFetcher {
    pub fn new(
        base_url: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        years: Vec<i32>,
        request_delay_ms: u64,
    ) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            request_delay: Duration::from_millis(request_delay_ms),
            last_request: Mutex::new(None),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            data_dir: data_dir.into(),
            years,
        })
    }

    pub fn from_settings(settings: &dit_common::config::Settings) -> Result<Self, FetchError> {
        Self::new(
            settings.base_url.clone(),
            settings.data_dir.clone(),
            settings.years.clone(),
            settings.request_delay_ms,
        )
    }

    /// Remote URL of a table file
    pub fn table_url(&self, table: NccsTable, year: i32) -> String {
        format!("{}/{}", self.base_url, table.file_name(year))
    }

    /// Download every table for every configured year
    pub async fn download_tables(&self) -> Result<FetchReport, FetchError> {
        tokio::fs::create_dir_all(&self.data_dir).await?;

        info!(
            years = ?self.years,
            dir = %self.data_dir.display(),
            "Starting NCCS download"
        );

        let mut report = FetchReport::default();

        for &year in &self.years {
            for table in NccsTable::ALL {
                let output_path = self.data_dir.join(table.file_name(year));

                if output_path.exists() {
                    info!(file = %output_path.display(), "Skipping download (already exists)");
                    report.skipped.push(output_path);
                    continue;
                }

                let url = self.table_url(table, year);
                match self.download_file(&url, &output_path).await {
                    Ok(()) => {
                        info!(file = %output_path.display(), "Downloaded");
                        report.downloaded.push(output_path);
                    }
                    Err(e) => {
                        error!(table = %table, year, url = %url, error = %e, "Download failed");
                        report.failed.push(FailedDownload {
                            table,
                            year,
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            downloaded = report.downloaded.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Download phase completed"
        );

        Ok(report)
    }

    /// Hold the next request back until the delay since the previous one has passed
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.request_delay;
            if ready_at > Instant::now() {
                debug!(delay_ms = self.request_delay.as_millis() as u64, "Pacing request");
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }

    /// Fetch one file; the destination only appears once the body is complete
    async fn download_file(&self, url: &str, output_path: &Path) -> Result<(), FetchError> {
        self.pace().await;

        debug!(url = %url, "Downloading");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let partial_path = output_path.with_extension("csv.part");
        if let Err(e) = tokio::fs::write(&partial_path, &body).await {
            let _ = tokio::fs::remove_file(&partial_path).await;
            return Err(e.into());
        }
        tokio::fs::rename(&partial_path, output_path).await?;

        Ok(())
    }
}
