use std::fmt;

/// Unified error type for the scrape pipeline
#[derive(Debug)]
pub enum ScrapeError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// HTTP error status code from the catalog page or the document store
    HttpStatus(reqwest::StatusCode),
    /// An expected markup node is absent for a listing item
    MissingNode {
        item: String,
        node: &'static str,
    },
    /// Price text does not conform to the expected numeric format,
    /// or a regular price is non-positive
    Price(String),
    /// Failed to serialize the snapshot document
    Json(serde_json::Error),
    /// File I/O error
    Io(std::io::Error),
    /// CSV encoding error
    Csv(csv::Error),
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::Network(e) => write!(f, "Network error: {}", e),
            ScrapeError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            ScrapeError::MissingNode { item, node } => {
                write!(f, "Missing node `{}` for item `{}`", node, item)
            }
            ScrapeError::Price(text) => write!(f, "Unparseable price text: {:?}", text),
            ScrapeError::Json(e) => write!(f, "Serialization error: {}", e),
            ScrapeError::Io(e) => write!(f, "I/O error: {}", e),
            ScrapeError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScrapeError::Network(e) => Some(e),
            ScrapeError::Json(e) => Some(e),
            ScrapeError::Io(e) => Some(e),
            ScrapeError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(err: reqwest::Error) -> Self {
        ScrapeError::Network(err)
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(err: serde_json::Error) -> Self {
        ScrapeError::Json(err)
    }
}

impl From<std::io::Error> for ScrapeError {
    fn from(err: std::io::Error) -> Self {
        ScrapeError::Io(err)
    }
}

impl From<csv::Error> for ScrapeError {
    fn from(err: csv::Error) -> Self {
        ScrapeError::Csv(err)
    }
}

/// Result type alias for pipeline operations
pub type ScrapeResult<T> = Result<T, ScrapeError>;
