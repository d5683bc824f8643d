//! Synthesizers deriving campaigns, donations and impact locations
//!
//! Each stage returns its accepted records together with discard counts so
//! that records dropped by a threshold are visible in the run statistics.

pub mod campaigns;
pub mod donations;
pub mod locations;

pub use campaigns::{synthesize_campaigns, CampaignOutput};
pub use donations::{synthesize_donations, DonationOutput};
pub use locations::{aggregate_locations, LocationOutput};

use chrono::NaiveDate;

/// First and last day of a tax year, `None` outside the calendar range
pub(crate) fn tax_year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}
