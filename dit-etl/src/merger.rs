//! Organization merger
//!
//! Folds the four per-year NCCS tables into one [`OrganizationRecord`] per
//! `EIN-year` key. Years are visited in configured order (most recent first)
//! and, inside a year, tables in [`NccsTable::ALL`] order. A field is only
//! overwritten by a non-empty, non-zero incoming value.

use crate::csv::{parse_csv, CsvRow, CsvTable};
use crate::tables::NccsTable;
use dit_common::{OrganizationRecord, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Supplier of parsed tables
pub trait TableSource {
    /// Parsed table for `(table, year)`, or `None` when it is not available
    fn load(&self, table: NccsTable, year: i32) -> Result<Option<CsvTable>>;
}

/// Reads `{TABLE_ID}-{YEAR}.csv` files from a directory
#[derive(Debug, Clone)]
pub struct DirectoryTableSource {
    dir: PathBuf,
    max_records: Option<usize>,
}

impl DirectoryTableSource {
    pub fn new(dir: impl Into<PathBuf>, max_records: Option<usize>) -> Self {
        Self {
            dir: dir.into(),
            max_records,
        }
    }
}

impl TableSource for DirectoryTableSource {
    fn load(&self, table: NccsTable, year: i32) -> Result<Option<CsvTable>> {
        let path = self.dir.join(table.file_name(year));
        if !path.exists() {
            info!(file = %path.display(), "Skipping table (not found)");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let parsed = parse_csv(&content, self.max_records);
        info!(
            file = %path.display(),
            rows = parsed.rows.len(),
            skipped = parsed.skipped_rows,
            "Parsed table"
        );
        Ok(Some(parsed))
    }
}

/// In-memory tables, keyed by `(table, year)`
impl TableSource for HashMap<(NccsTable, i32), CsvTable> {
    fn load(&self, table: NccsTable, year: i32) -> Result<Option<CsvTable>> {
        Ok(self.get(&(table, year)).cloned())
    }
}

/// Bookkeeping of one merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub tables_loaded: usize,
    pub tables_missing: usize,
    pub tables_failed: usize,
    pub malformed_rows: usize,
    pub rows_without_ein: usize,
    /// Records dropped by the final name/revenue filter
    pub incomplete_records: usize,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Records with a name and positive revenue, by revenue descending
    pub organizations: Vec<OrganizationRecord>,
    pub report: MergeReport,
}

/// Merges NCCS tables for a fixed list of years
#[derive(Debug, Clone)]
pub struct OrganizationMerger {
    years: Vec<i32>,
}

impl OrganizationMerger {
    pub fn new(years: Vec<i32>) -> Self {
        Self { years }
    }

    pub fn merge<S: TableSource + ?Sized>(&self, source: &S) -> MergeOutcome {
        let mut report = MergeReport::default();
        let mut records: Vec<OrganizationRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for &year in &self.years {
            debug!(year, "Processing year");

            for table in NccsTable::ALL {
                let parsed = match source.load(table, year) {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => {
                        report.tables_missing += 1;
                        continue;
                    }
                    Err(e) => {
                        error!(table = %table, year, error = %e, "Failed to load table");
                        report.tables_failed += 1;
                        continue;
                    }
                };
                report.tables_loaded += 1;
                report.malformed_rows += parsed.skipped_rows;

                for row in &parsed.rows {
                    let ein = row.text("EIN");
                    if ein.is_empty() {
                        report.rows_without_ein += 1;
                        continue;
                    }

                    let key = format!("{}-{}", ein, year);
                    let slot = *index.entry(key).or_insert_with(|| {
                        records.push(OrganizationRecord::new(ein, year));
                        records.len() - 1
                    });
                    merge_row(&mut records[slot], table, row);
                }
            }
        }

        let before = records.len();
        let mut organizations: Vec<OrganizationRecord> = records
            .into_iter()
            .filter(|org| !org.organization_name.is_empty() && org.total_revenue > 0.0)
            .collect();
        report.incomplete_records = before - organizations.len();

        organizations.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));

        info!(
            organizations = organizations.len(),
            dropped = report.incomplete_records,
            missing_tables = report.tables_missing,
            "Combined organization records"
        );

        MergeOutcome {
            organizations,
            report,
        }
    }
}

/// Copy the fields a table owns into the record
fn merge_row(org: &mut OrganizationRecord, table: NccsTable, row: &CsvRow) {
    match table {
        NccsTable::Header => {
            fill_text(&mut org.organization_name, row.text("ORGANIZATION_NAME"));
            fill_optional_text(&mut org.address_line_1, row.text("ADDRESS_LINE_1"));
            fill_optional_text(&mut org.city, row.text("CITY"));
            fill_optional_text(&mut org.state, row.text("STATE"));
            fill_optional_text(&mut org.zip_code, row.text("ZIP_CODE"));
        }
        NccsTable::Summary => {
            fill_number(&mut org.total_revenue, row.number("TOTAL_REVENUE"));
            fill_number(&mut org.total_expenses, row.number("TOTAL_EXPENSES"));
            fill_number(&mut org.total_assets, row.number("TOTAL_ASSETS"));
        }
        NccsTable::Revenue => {
            fill_optional_number(
                &mut org.program_service_revenue,
                row.number("PROGRAM_SERVICE_REVENUE"),
            );
            fill_optional_number(&mut org.contributions_grants, row.number("CONTRIBUTIONS_GRANTS"));
            fill_optional_number(&mut org.investment_income, row.number("INVESTMENT_INCOME"));
        }
        NccsTable::Mission => {
            fill_optional_text(&mut org.mission_description, row.text("MISSION_DESCRIPTION"));
        }
    }
}

fn fill_text(field: &mut String, incoming: &str) {
    if !incoming.is_empty() {
        *field = incoming.to_string();
    }
}

fn fill_optional_text(field: &mut Option<String>, incoming: &str) {
    if !incoming.is_empty() {
        *field = Some(incoming.to_string());
    }
}

fn fill_number(field: &mut f64, incoming: f64) {
    if incoming != 0.0 && !incoming.is_nan() {
        *field = incoming;
    }
}

fn fill_optional_number(field: &mut Option<f64>, incoming: f64) {
    if incoming != 0.0 && !incoming.is_nan() {
        *field = Some(incoming);
    }
}
