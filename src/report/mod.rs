//! Report output: text tables and JSON

mod table;

pub use table::StatisticsTable;

use crate::types::StatisticsReport;
use serde::Serialize;

/// Statistics of one successful source run, ready for output
#[derive(Debug, Clone, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub title: String,
    pub statistics: StatisticsReport,
}

impl SourceReport {
    pub fn to_table(&self) -> String {
        StatisticsTable::new(&self.title, &self.statistics).render_to_string()
    }
}

/// Pretty JSON array of all source reports
pub fn to_json(reports: &[SourceReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
