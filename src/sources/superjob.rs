//! SuperJob (api.superjob.ru) vacancy source
//!
//! Flag-bounded pagination: each page says whether another one follows
//! (`more`); `total` is only used for reporting.

use crate::services::http::{PageClient, PageRequest};
use crate::services::salary::predict_salary;
use crate::types::{FetchedVacancies, Result, VacancyQuery};
use chrono::NaiveTime;
use serde::Deserialize;

use super::{decode_page, VacancySource};

/// Default SuperJob API base URL
pub const SJ_API_URL: &str = "https://api.superjob.ru";

/// Catalogue section "Development, programming"
const IT_CATALOGUE: u32 = 48;

/// Vacancies requested per page
const PAGE_SIZE: u32 = 20;

/// Currency code SuperJob uses for roubles
const RUB_CURRENCY: &str = "rub";

/// Credential header
const APP_ID_HEADER: &str = "X-Api-App-Id";

/// One page of `/2.0/vacancies/`
#[derive(Debug, Deserialize)]
struct SjPage {
    objects: Vec<SjVacancy>,
    more: bool,
    total: u64,
}

/// SuperJob vacancy (only the fields jobstats reads)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SjVacancy {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub payment_from: Option<f64>,
    #[serde(default)]
    pub payment_to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Estimate a rouble salary for a SuperJob vacancy.
/// SuperJob sends `0` for an unspecified bound, which counts as absent.
pub fn predict_rub_salary_sj(vacancy: &SjVacancy) -> Option<f64> {
    if vacancy.currency.as_deref() != Some(RUB_CURRENCY) {
        return None;
    }
    predict_salary(vacancy.payment_from, vacancy.payment_to)
}

/// SuperJob source
pub struct SuperJobSource<C> {
    client: C,
    base_url: String,
    api_key: String,
}

impl<C: PageClient> SuperJobSource<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, SJ_API_URL)
    }

    /// Create a source against a custom API base (for testing)
    pub fn with_base_url(client: C, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn page_request(&self, query: &VacancyQuery<'_>, page: u32) -> PageRequest {
        // date_published_from is a Unix timestamp
        let published_from = query.date_from.and_time(NaiveTime::MIN).and_utc().timestamp();

        PageRequest::new(format!("{}/2.0/vacancies/", self.base_url))
            .query("town", query.area)
            .query("keyword", query.text)
            .query("catalogues", IT_CATALOGUE)
            .query("date_published_from", published_from)
            .query("count", PAGE_SIZE)
            .query("page", page)
            .header(APP_ID_HEADER, self.api_key.as_str())
    }
}

impl<C: PageClient> VacancySource for SuperJobSource<C> {
    type Vacancy = SjVacancy;

    fn name(&self) -> &str {
        "superjob"
    }

    fn fetch_vacancies(&self, query: &VacancyQuery<'_>) -> Result<FetchedVacancies<SjVacancy>> {
        let mut vacancies = Vec::new();
        let mut page: u32 = 0;

        loop {
            let body = self.client.get_page(&self.page_request(query, page))?;
            let page_data: SjPage = decode_page(self.name(), page, body)?;

            tracing::debug!(
                source = self.name(),
                page,
                more = page_data.more,
                items = page_data.objects.len(),
                "fetched page"
            );

            vacancies.extend(page_data.objects);

            if !page_data.more {
                return Ok(FetchedVacancies {
                    vacancies,
                    found: page_data.total,
                });
            }
            page += 1;
        }
    }

    fn predict_rub_salary(&self, vacancy: &SjVacancy) -> Option<f64> {
        predict_rub_salary_sj(vacancy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{Reply, ScriptedClient};
    use crate::types::JobstatsError;
    use chrono::NaiveDate;

    fn query() -> VacancyQuery<'static> {
        VacancyQuery {
            text: "Программист Go",
            area: 4,
            date_from: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        }
    }

    fn page_body(more: bool, total: u64, objects: &[&str]) -> String {
        format!(
            r#"{{"objects": [{}], "more": {}, "total": {}}}"#,
            objects.join(","),
            more,
            total
        )
    }

    fn vacancy(from: Option<f64>, to: Option<f64>, currency: &str) -> SjVacancy {
        SjVacancy {
            payment_from: from,
            payment_to: to,
            currency: Some(currency.to_string()),
            ..Default::default()
        }
    }

    // ========== fetch_vacancies tests ==========

    #[test]
    fn test_fetch_follows_more_flag_inclusive() {
        let client = ScriptedClient::bodies(vec![
            page_body(true, 3, &[r#"{"id": 1}"#]),
            page_body(true, 3, &[r#"{"id": 2}"#]),
            page_body(false, 3, &[r#"{"id": 3}"#]),
        ]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        let fetched = source.fetch_vacancies(&query()).unwrap();

        assert_eq!(client.pages_requested(), vec!["0", "1", "2"]);
        assert_eq!(fetched.vacancies.len(), 3);
        assert_eq!(fetched.found, 3);
    }

    #[test]
    fn test_fetch_ignores_total_for_termination() {
        // total says 1 but the provider still reports more pages
        let client = ScriptedClient::bodies(vec![
            page_body(true, 1, &[]),
            page_body(true, 1, &[]),
            page_body(false, 7, &[]),
        ]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        let fetched = source.fetch_vacancies(&query()).unwrap();

        assert_eq!(client.requests().len(), 3);
        assert_eq!(fetched.found, 7);
    }

    #[test]
    fn test_fetch_sends_credential_and_parameters() {
        let client = ScriptedClient::bodies(vec![page_body(false, 0, &[])]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        source.fetch_vacancies(&query()).unwrap();

        let request = &client.requests()[0];
        assert_eq!(request.url, "http://sj.test/2.0/vacancies/");
        assert_eq!(request.headers, vec![("X-Api-App-Id", "tok".to_string())]);
        assert_eq!(request.query_value("town"), Some("4"));
        assert_eq!(request.query_value("keyword"), Some("Программист Go"));
        assert_eq!(request.query_value("catalogues"), Some("48"));
        assert_eq!(request.query_value("count"), Some("20"));
        assert_eq!(request.query_value("page"), Some("0"));
        // 2024-03-01T00:00:00Z
        assert_eq!(request.query_value("date_published_from"), Some("1709251200"));
    }

    #[test]
    fn test_fetch_missing_more_is_malformed() {
        let client = ScriptedClient::bodies(vec![r#"{"objects": [], "total": 2}"#]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        let err = source.fetch_vacancies(&query()).unwrap_err();

        assert!(matches!(err, JobstatsError::MalformedResponse(_)));
    }

    #[test]
    fn test_fetch_missing_total_is_malformed() {
        let client = ScriptedClient::bodies(vec![r#"{"objects": [], "more": false}"#]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        let err = source.fetch_vacancies(&query()).unwrap_err();

        assert!(matches!(err, JobstatsError::MalformedResponse(_)));
    }

    #[test]
    fn test_fetch_status_failure_aborts() {
        let client = ScriptedClient::new(vec![Reply::Status(403)]);
        let source = SuperJobSource::with_base_url(&client, "bad", "http://sj.test");

        let err = source.fetch_vacancies(&query()).unwrap_err();

        assert!(matches!(err, JobstatsError::Transport(_)));
        assert_eq!(client.requests().len(), 1);
    }

    #[test]
    fn test_fetch_parses_null_and_zero_payments() {
        let client = ScriptedClient::bodies(vec![page_body(
            false,
            2,
            &[
                r#"{"id": 1, "profession": "Go dev", "payment_from": 0, "payment_to": 90000, "currency": "rub"}"#,
                r#"{"id": 2, "payment_from": null, "payment_to": null, "currency": "rub"}"#,
            ],
        )]);
        let source = SuperJobSource::with_base_url(&client, "tok", "http://sj.test");

        let fetched = source.fetch_vacancies(&query()).unwrap();

        assert_eq!(fetched.vacancies[0].payment_from, Some(0.0));
        assert_eq!(fetched.vacancies[0].payment_to, Some(90000.0));
        assert_eq!(fetched.vacancies[1].payment_from, None);
    }

    // ========== predict_rub_salary_sj tests ==========

    #[test]
    fn test_predict_rub_both_bounds() {
        let v = vacancy(Some(50000.0), Some(70000.0), "rub");
        assert_eq!(predict_rub_salary_sj(&v), Some(60000.0));
    }

    #[test]
    fn test_predict_rub_currency_mismatch() {
        let v = vacancy(Some(50000.0), Some(70000.0), "usd");
        assert_eq!(predict_rub_salary_sj(&v), None);
    }

    #[test]
    fn test_predict_rub_uppercase_code_is_mismatch() {
        let v = vacancy(Some(50000.0), Some(70000.0), "RUR");
        assert_eq!(predict_rub_salary_sj(&v), None);
    }

    #[test]
    fn test_predict_rub_zero_bounds_not_estimable() {
        let v = vacancy(Some(0.0), Some(0.0), "rub");
        assert_eq!(predict_rub_salary_sj(&v), None);
    }

    #[test]
    fn test_predict_rub_missing_currency() {
        assert_eq!(predict_rub_salary_sj(&SjVacancy::default()), None);
    }
}
