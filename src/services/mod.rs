//! Services for fetching, salary estimation and aggregation

pub mod aggregator;
pub mod http;
pub mod salary;

pub use aggregator::{Aggregator, StatisticsRequest};
pub use http::{HttpClient, PageClient, PageRequest};
pub use salary::predict_salary;
