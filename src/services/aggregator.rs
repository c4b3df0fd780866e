//! Aggregator service: per-category vacancy statistics for one source

use crate::sources::VacancySource;
use crate::types::{CategorySummary, Result, StatisticsReport, VacancyQuery};
use chrono::NaiveDate;

/// Word prepended to each category to build the search phrase
pub const DEFAULT_SEARCH_PREFIX: &str = "Программист";

/// Parameters of one aggregation run
#[derive(Debug, Clone)]
pub struct StatisticsRequest {
    /// Categories (programming languages) in report order
    pub categories: Vec<String>,
    /// Source-specific area / town id
    pub area: u32,
    /// Lower bound of the publication window
    pub date_from: NaiveDate,
    pub search_prefix: String,
}

impl StatisticsRequest {
    pub fn new(categories: Vec<String>, area: u32, date_from: NaiveDate) -> Self {
        Self {
            categories,
            area,
            date_from,
            search_prefix: DEFAULT_SEARCH_PREFIX.to_string(),
        }
    }

    /// Search phrase for one category (e.g., "Программист Python")
    pub fn search_phrase(&self, category: &str) -> String {
        if self.search_prefix.is_empty() {
            category.to_string()
        } else {
            format!("{} {}", self.search_prefix, category)
        }
    }
}

/// Aggregator for computing vacancy statistics
pub struct Aggregator;

impl Aggregator {
    /// Fetch and summarize every category in order.
    /// The first fetch failure aborts the whole run; no partial report is returned.
    pub fn vacancy_statistics<S: VacancySource>(
        source: &S,
        request: &StatisticsRequest,
    ) -> Result<StatisticsReport> {
        let mut report = StatisticsReport::new();

        for category in &request.categories {
            let text = request.search_phrase(category);
            let query = VacancyQuery {
                text: &text,
                area: request.area,
                date_from: request.date_from,
            };

            let fetched = source.fetch_vacancies(&query)?;
            let summary = CategorySummary::from_estimates(
                fetched.found,
                fetched
                    .vacancies
                    .iter()
                    .map(|vacancy| source.predict_rub_salary(vacancy)),
            );

            tracing::info!(
                source = source.name(),
                category = category.as_str(),
                found = summary.found,
                processed = summary.processed,
                average_salary = summary.average_salary,
                "category done"
            );

            report.push(category.clone(), summary);
        }

        Ok(report)
    }
}
