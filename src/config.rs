//! Run settings and their validation

use crate::services::aggregator::{StatisticsRequest, DEFAULT_SEARCH_PREFIX};
use crate::services::http::DEFAULT_TIMEOUT_SECS;
use crate::types::{JobstatsError, Result};
use chrono::{Days, NaiveDate};
use clap::ValueEnum;
use std::time::Duration;

/// Languages queried when none are given
pub const DEFAULT_LANGUAGES: [&str; 9] = [
    "Java", "Python", "Ruby", "PHP", "C++", "C#", "Go", "Scala", "Swift",
];

/// Publication window length in days
pub const DEFAULT_SEARCH_DAYS: u32 = 30;

/// HeadHunter area id for Moscow
pub const HH_MOSCOW_AREA: u32 = 1;

/// SuperJob town id for Moscow
pub const SJ_MOSCOW_TOWN: u32 = 4;

pub const DEFAULT_AREA_LABEL: &str = "Moscow";

/// Which sources a run queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SourceSelection {
    #[default]
    All,
    Headhunter,
    Superjob,
}

impl SourceSelection {
    pub fn includes_headhunter(self) -> bool {
        matches!(self, Self::All | Self::Headhunter)
    }

    pub fn includes_superjob(self) -> bool {
        matches!(self, Self::All | Self::Superjob)
    }
}

/// Everything one run needs, independent of how it was supplied
#[derive(Debug, Clone)]
pub struct Settings {
    pub sources: SourceSelection,
    pub languages: Vec<String>,
    pub days: u32,
    pub search_prefix: String,
    pub hh_area: u32,
    pub sj_town: u32,
    /// Human-readable area name used in table titles
    pub area_label: String,
    pub superjob_api_key: Option<String>,
    pub timeout: Duration,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sources: SourceSelection::All,
            languages: DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            days: DEFAULT_SEARCH_DAYS,
            search_prefix: DEFAULT_SEARCH_PREFIX.to_string(),
            hh_area: HH_MOSCOW_AREA,
            sj_town: SJ_MOSCOW_TOWN,
            area_label: DEFAULT_AREA_LABEL.to_string(),
            superjob_api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            json: false,
        }
    }
}

impl Settings {
    /// Trim languages and check the settings before any request is made
    pub fn validate(mut self) -> Result<Self> {
        if self.days == 0 {
            return Err(JobstatsError::Config("--days must be at least 1".into()));
        }

        self.languages = self
            .languages
            .into_iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if self.languages.is_empty() {
            return Err(JobstatsError::Config(
                "at least one programming language is required".into(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(JobstatsError::Config("--timeout-secs must be at least 1".into()));
        }

        self.superjob_api_key = self
            .superjob_api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if self.sources.includes_superjob() && self.superjob_api_key.is_none() {
            return Err(JobstatsError::Config(
                "SUPERJOB_API_KEY is required for the SuperJob source".into(),
            ));
        }

        Ok(self)
    }

    /// Lower bound of the publication window: `today - days`
    pub fn date_from(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.days)))
            .unwrap_or(NaiveDate::MIN)
    }

    pub fn statistics_request(&self, area: u32, today: NaiveDate) -> StatisticsRequest {
        StatisticsRequest {
            categories: self.languages.clone(),
            area,
            date_from: self.date_from(today),
            search_prefix: self.search_prefix.clone(),
        }
    }

    pub fn headhunter_title(&self) -> String {
        format!("HeadHunter {}", self.area_label)
    }

    pub fn superjob_title(&self) -> String {
        format!("SuperJob {}", self.area_label)
    }
}
