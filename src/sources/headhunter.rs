//! HeadHunter (api.hh.ru) vacancy source
//!
//! Count-bounded pagination: every page reports the total page count in
//! `pages`, and pages `0..pages` are requested in order.

use crate::services::http::{PageClient, PageRequest};
use crate::services::salary::predict_salary;
use crate::types::{FetchedVacancies, Result, VacancyQuery};
use serde::Deserialize;

use super::{decode_page, VacancySource};

/// Default HeadHunter API base URL
pub const HH_API_URL: &str = "https://api.hh.ru";

/// Currency code HeadHunter uses for roubles
const RUB_CURRENCY: &str = "RUR";

/// One page of `/vacancies`
#[derive(Debug, Deserialize)]
struct HhPage {
    items: Vec<HhVacancy>,
    pages: u32,
    found: u64,
}

/// HeadHunter vacancy (only the fields jobstats reads)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HhVacancy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<HhSalary>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HhSalary {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Estimate a rouble salary for a HeadHunter vacancy.
/// Vacancies without a salary block or paid in another currency yield `None`.
pub fn predict_rub_salary_hh(vacancy: &HhVacancy) -> Option<f64> {
    let salary = vacancy.salary.as_ref()?;
    if salary.currency.as_deref() != Some(RUB_CURRENCY) {
        return None;
    }
    predict_salary(salary.from, salary.to)
}

/// HeadHunter source
pub struct HeadHunterSource<C> {
    client: C,
    base_url: String,
}

impl<C: PageClient> HeadHunterSource<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, HH_API_URL)
    }

    /// Create a source against a custom API base (for testing)
    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn page_request(&self, query: &VacancyQuery<'_>, page: u32) -> PageRequest {
        PageRequest::new(format!("{}/vacancies", self.base_url))
            .query("text", query.text)
            .query("area", query.area)
            .query("date_from", query.date_from.format("%Y-%m-%d"))
            .query("page", page)
    }
}

impl<C: PageClient> VacancySource for HeadHunterSource<C> {
    type Vacancy = HhVacancy;

    fn name(&self) -> &str {
        "headhunter"
    }

    fn fetch_vacancies(&self, query: &VacancyQuery<'_>) -> Result<FetchedVacancies<HhVacancy>> {
        let mut vacancies = Vec::new();
        let mut page: u32 = 0;
        let mut pages_number: u32 = 1;
        let mut found: u64 = 0;

        while page < pages_number {
            let body = self.client.get_page(&self.page_request(query, page))?;
            let page_data: HhPage = decode_page(self.name(), page, body)?;

            tracing::debug!(
                source = self.name(),
                page,
                pages = page_data.pages,
                items = page_data.items.len(),
                "fetched page"
            );

            pages_number = page_data.pages;
            found = page_data.found;
            vacancies.extend(page_data.items);
            page += 1;
        }

        Ok(FetchedVacancies { vacancies, found })
    }

    fn predict_rub_salary(&self, vacancy: &HhVacancy) -> Option<f64> {
        predict_rub_salary_hh(vacancy)
    }
}
