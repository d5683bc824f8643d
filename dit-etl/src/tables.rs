//! NCCS efile table catalog
//!
//! The order of [`NccsTable::ALL`] is the merge order: when two tables set
//! the same organization field, the later table only fills it if it was
//! still empty or zero.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NccsTable {
    /// Organization header: name, address
    Header,
    /// Financial summary: revenue, expenses, assets
    Summary,
    /// Revenue breakdown: contributions, program service, investment
    Revenue,
    /// Mission statement
    Mission,
}

impl NccsTable {
    /// Tables in merge order
    pub const ALL: [NccsTable; 4] = [
        NccsTable::Header,
        NccsTable::Summary,
        NccsTable::Revenue,
        NccsTable::Mission,
    ];

    /// Table id as published in the efile bucket
    pub fn table_id(&self) -> &'static str {
        match self {
            NccsTable::Header => "F9-P00-T00-HEADER",
            NccsTable::Summary => "F9-P01-T00-SUMMARY",
            NccsTable::Revenue => "F9-P08-T00-REVENUE",
            NccsTable::Mission => "F9-P03-T00-MISSION",
        }
    }

    /// `{TABLE_ID}-{YEAR}.csv`
    pub fn file_name(&self, year: i32) -> String {
        format!("{}-{}.csv", self.table_id(), year)
    }
}

impl fmt::Display for NccsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_order_is_header_summary_revenue_mission() {
        assert_eq!(
            NccsTable::ALL,
            [NccsTable::Header, NccsTable::Summary, NccsTable::Revenue, NccsTable::Mission]
        );
    }

    #[test]
    fn test_file_name() {
        assert_eq!(NccsTable::Revenue.file_name(2022), "F9-P08-T00-REVENUE-2022.csv");
        assert_eq!(NccsTable::Mission.to_string(), "F9-P03-T00-MISSION");
    }
}
