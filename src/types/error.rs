use thiserror::Error;

/// jobstats error types
#[derive(Error, Debug)]
pub enum JobstatsError {
    /// Request could not be sent or the listing endpoint answered with a non-success status
    #[error("transport error: {0}")]
    Transport(String),

    /// A page response could not be decoded or lacked a required field
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid or missing configuration
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for jobstats
pub type Result<T> = std::result::Result<T, JobstatsError>;
