//! Page transport: one GET per listing page
//!
//! Sources build [`PageRequest`]s and decode the returned bytes themselves;
//! the client only knows how to send a request and reject non-success statuses.

use crate::types::{JobstatsError, Result};
use std::time::Duration;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request (HeadHunter rejects requests without one)
pub const USER_AGENT: &str = concat!("jobstats/", env!("CARGO_PKG_VERSION"));

/// A single listing page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    /// Query pairs in the order they are sent
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
}

impl PageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn header(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((key, value.into()));
        self
    }

    /// Value of a query parameter, if set
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Fetches the raw body of one listing page
pub trait PageClient {
    fn get_page(&self, request: &PageRequest) -> Result<Vec<u8>>;
}

impl<C: PageClient + ?Sized> PageClient for &C {
    fn get_page(&self, request: &PageRequest) -> Result<Vec<u8>> {
        (**self).get_page(request)
    }
}

/// Blocking reqwest-backed page client
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| JobstatsError::Transport(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }
}

impl PageClient for HttpClient {
    fn get_page(&self, request: &PageRequest) -> Result<Vec<u8>> {
        let mut builder = self.client.get(&request.url).query(&request.query);
        for (key, value) in &request.headers {
            builder = builder.header(*key, value);
        }

        let response = builder.send().map_err(|e| {
            JobstatsError::Transport(format!("HTTP request to {} failed: {}", request.url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(JobstatsError::Transport(format!(
                "{} responded with status {}",
                request.url, status
            )));
        }

        let body = response.bytes().map_err(|e| {
            JobstatsError::Transport(format!("Failed to read body from {}: {}", request.url, e))
        })?;

        Ok(body.to_vec())
    }
}
