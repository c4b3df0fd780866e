//! Vacancy source trait and the HeadHunter / SuperJob implementations

mod headhunter;
mod superjob;

pub use headhunter::{predict_rub_salary_hh, HeadHunterSource, HhSalary, HhVacancy};
pub use superjob::{predict_rub_salary_sj, SjVacancy, SuperJobSource};

use crate::types::{FetchedVacancies, JobstatsError, Result, VacancyQuery};
use serde::Deserialize;

/// A job-listing provider: paginated fetch plus a salary estimator
/// for the provider's own vacancy shape.
pub trait VacancySource {
    /// Vacancy record as returned by the provider
    type Vacancy;

    /// Source name (e.g., "headhunter")
    fn name(&self) -> &str;

    /// Fetch every vacancy matching `query`, following the provider's pagination
    fn fetch_vacancies(&self, query: &VacancyQuery<'_>) -> Result<FetchedVacancies<Self::Vacancy>>;

    /// Estimated salary in roubles, or `None` if it cannot be estimated
    fn predict_rub_salary(&self, vacancy: &Self::Vacancy) -> Option<f64>;
}

/// Decode one page body into a typed page record.
/// Any decode failure, including a missing required field, is a malformed response.
pub(crate) fn decode_page<T>(source: &str, page: u32, mut body: Vec<u8>) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    simd_json::from_slice(&mut body).map_err(|e| {
        JobstatsError::MalformedResponse(format!("{} page {}: {}", source, page, e))
    })
}
