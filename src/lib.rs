//! jobstats: paginated vacancy fetching from HeadHunter and SuperJob,
//! salary estimation and per-language aggregation.

pub mod cli;
pub mod config;
pub mod report;
pub mod services;
pub mod sources;
pub mod types;
