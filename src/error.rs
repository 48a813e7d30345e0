use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TripInsightsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed trip record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),
}
