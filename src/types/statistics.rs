//! Query and statistics types shared by sources and the aggregator

use chrono::NaiveDate;
use serde::Serialize;

/// A single search request against one vacancy source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancyQuery<'a> {
    /// Free-text search phrase (e.g., "Программист Python")
    pub text: &'a str,
    /// Source-specific area / town id
    pub area: u32,
    /// Only vacancies published on or after this date
    pub date_from: NaiveDate,
}

/// Everything a paginated fetch produced for one query
#[derive(Debug, Clone)]
pub struct FetchedVacancies<V> {
    pub vacancies: Vec<V>,
    /// Provider-reported total, taken from the last page
    pub found: u64,
}

/// Per-category result of one aggregation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    #[serde(rename = "vacancies_found")]
    pub found: u64,
    #[serde(rename = "vacancies_processed")]
    pub processed: u64,
    pub average_salary: u64,
}

impl CategorySummary {
    /// Fold per-vacancy estimates into a summary.
    /// Estimates stay `f64` until the final mean, which is truncated.
    pub fn from_estimates<I>(found: u64, estimates: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut salary_sum = 0.0_f64;
        let mut processed: u64 = 0;

        for estimate in estimates.into_iter().flatten() {
            salary_sum += estimate;
            processed = processed.saturating_add(1);
        }

        let average_salary = if processed > 0 {
            (salary_sum / processed as f64).floor() as u64
        } else {
            0
        };

        Self {
            found,
            processed,
            average_salary,
        }
    }
}

/// One row of a report: a category and its summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStatistics {
    #[serde(rename = "language")]
    pub category: String,
    #[serde(flatten)]
    pub summary: CategorySummary,
}

/// Ordered category -> summary mapping (insertion order = input order)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StatisticsReport {
    entries: Vec<CategoryStatistics>,
}

impl StatisticsReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, category: impl Into<String>, summary: CategorySummary) {
        self.entries.push(CategoryStatistics {
            category: category.into(),
            summary,
        });
    }

    /// Rows in category input order
    pub fn entries(&self) -> &[CategoryStatistics] {
        &self.entries
    }

    /// Look up a category summary by label
    pub fn get(&self, category: &str) -> Option<&CategorySummary> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| &e.summary)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
