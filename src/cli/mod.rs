use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::config::{
    Settings, SourceSelection, DEFAULT_AREA_LABEL, DEFAULT_LANGUAGES, DEFAULT_SEARCH_DAYS,
    HH_MOSCOW_AREA, SJ_MOSCOW_TOWN,
};
use crate::report::{self, SourceReport};
use crate::services::aggregator::DEFAULT_SEARCH_PREFIX;
use crate::services::http::DEFAULT_TIMEOUT_SECS;
use crate::services::{Aggregator, HttpClient, PageClient, StatisticsRequest};
use crate::sources::{HeadHunterSource, SuperJobSource, VacancySource};
use crate::types::Result;

/// Average developer salaries per programming language from HeadHunter and SuperJob
#[derive(Parser, Debug)]
#[command(name = "jobstats")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sources to query
    #[arg(long, value_enum, default_value_t = SourceSelection::All)]
    source: SourceSelection,

    /// Programming languages, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_LANGUAGES.map(String::from))]
    languages: Vec<String>,

    /// Only vacancies published within this many days
    #[arg(long, default_value_t = DEFAULT_SEARCH_DAYS)]
    days: u32,

    /// Word prepended to each language in the search phrase
    #[arg(long, default_value = DEFAULT_SEARCH_PREFIX)]
    search_prefix: String,

    /// HeadHunter area id
    #[arg(long, default_value_t = HH_MOSCOW_AREA)]
    hh_area: u32,

    /// SuperJob town id
    #[arg(long, default_value_t = SJ_MOSCOW_TOWN)]
    sj_town: u32,

    /// Area name shown in table titles
    #[arg(long, default_value = DEFAULT_AREA_LABEL)]
    area_label: String,

    /// SuperJob application key
    #[arg(long, env = "SUPERJOB_API_KEY", hide_env_values = true)]
    superjob_api_key: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Result of running one source: the table title and either a report or the failure
pub struct SourceOutcome {
    pub title: String,
    pub result: Result<SourceReport>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            sources: self.source,
            languages: self.languages.clone(),
            days: self.days,
            search_prefix: self.search_prefix.clone(),
            hh_area: self.hh_area,
            sj_town: self.sj_town,
            area_label: self.area_label.clone(),
            superjob_api_key: self.superjob_api_key.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            json: self.json,
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let settings = self.settings().validate()?;
        let today = chrono::Local::now().date_naive();
        let client = HttpClient::with_timeout(settings.timeout)?;

        let outcomes = run_sources(&settings, today, &client);

        let mut reports = Vec::new();
        let mut failed = 0usize;
        for outcome in outcomes {
            match outcome.result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(title = outcome.title.as_str(), error = %e, "source failed");
                    eprintln!("[jobstats] {}: {}", outcome.title, e);
                }
            }
        }

        if settings.json {
            println!("{}", report::to_json(&reports)?);
        } else {
            for report in &reports {
                println!("{}", report.to_table());
            }
        }

        if failed > 0 {
            anyhow::bail!("{} of {} sources failed", failed, failed + reports.len());
        }
        Ok(())
    }
}

/// Run every selected source; HeadHunter and SuperJob run in parallel when both are selected
pub fn run_sources<C>(settings: &Settings, today: chrono::NaiveDate, client: &C) -> Vec<SourceOutcome>
where
    C: PageClient + Sync,
{
    let headhunter = || {
        let source = HeadHunterSource::new(client);
        let request = settings.statistics_request(settings.hh_area, today);
        run_source(&source, settings.headhunter_title(), &request)
    };
    let superjob = |api_key: &str| {
        let source = SuperJobSource::new(client, api_key);
        let request = settings.statistics_request(settings.sj_town, today);
        run_source(&source, settings.superjob_title(), &request)
    };

    let api_key = settings.superjob_api_key.as_deref().unwrap_or_default();
    let sources = settings.sources;

    match (sources.includes_headhunter(), sources.includes_superjob()) {
        (true, true) => {
            let (hh, sj) = rayon::join(headhunter, || superjob(api_key));
            vec![hh, sj]
        }
        (true, false) => vec![headhunter()],
        (false, true) => vec![superjob(api_key)],
        (false, false) => Vec::new(),
    }
}

/// Aggregate one source into a titled report
pub fn run_source<S: VacancySource>(
    source: &S,
    title: String,
    request: &StatisticsRequest,
) -> SourceOutcome {
    let result = Aggregator::vacancy_statistics(source, request).map(|statistics| SourceReport {
        source: source.name().to_string(),
        title: title.clone(),
        statistics,
    });
    SourceOutcome { title, result }
}

/// Log to stderr so stdout stays a clean report; `RUST_LOG` overrides the verbosity flag
fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "jobstats=info,warn",
        _ => "jobstats=debug,warn",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{Reply, ScriptedClient};
    use crate::types::JobstatsError;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    // ========== argument parsing tests ==========

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["jobstats"]).unwrap();
        assert_eq!(cli.source, SourceSelection::All);
        assert_eq!(cli.languages.len(), 9);
        assert_eq!(cli.languages[0], "Java");
        assert_eq!(cli.days, 30);
        assert_eq!(cli.hh_area, 1);
        assert_eq!(cli.sj_town, 4);
        assert_eq!(cli.search_prefix, "Программист");
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_cli_parse_languages_list() {
        let cli = Cli::try_parse_from(["jobstats", "--languages", "Go,Rust"]).unwrap();
        assert_eq!(cli.languages, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_cli_parse_source_and_flags() {
        let cli = Cli::try_parse_from([
            "jobstats",
            "--source",
            "headhunter",
            "--days",
            "7",
            "--json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.source, SourceSelection::Headhunter);
        assert_eq!(cli.days, 7);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_parse_unknown_source() {
        assert!(Cli::try_parse_from(["jobstats", "--source", "linkedin"]).is_err());
    }

    #[test]
    fn test_cli_settings_api_key_flag() {
        let cli = Cli::try_parse_from(["jobstats", "--superjob-api-key", "tok"]).unwrap();
        let settings = cli.settings().validate().unwrap();
        assert_eq!(settings.superjob_api_key.as_deref(), Some("tok"));
    }

    // ========== run_sources tests ==========

    #[test]
    fn test_run_sources_headhunter_only() {
        let client = ScriptedClient::bodies(vec![r#"{"items": [], "pages": 1, "found": 2}"#]);
        let settings = Settings {
            sources: SourceSelection::Headhunter,
            languages: vec!["Go".into()],
            ..Default::default()
        };

        let outcomes = run_sources(&settings, today(), &client);

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].title, "HeadHunter Moscow");
        let report = outcomes[0].result.as_ref().unwrap();
        assert_eq!(report.source, "headhunter");
        assert_eq!(report.statistics.get("Go").unwrap().found, 2);
        assert_eq!(client.requests()[0].query_value("date_from"), Some("2024-03-01"));
    }

    #[test]
    fn test_run_source_failure_keeps_title() {
        let client = ScriptedClient::new(vec![Reply::Status(403)]);
        let source = SuperJobSource::with_base_url(&client, "bad", "http://sj.test");
        let request = StatisticsRequest::new(vec!["Go".into()], 4, today());

        let outcome = run_source(&source, "SuperJob Moscow".into(), &request);

        assert_eq!(outcome.title, "SuperJob Moscow");
        assert!(matches!(outcome.result, Err(JobstatsError::Transport(_))));
    }
}
