use thiserror::Error;

/// Failure to retrieve a page at all. Fatal for the listings page,
/// absorbed for rental lookups.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Cannot build a request URL from {0:?}")]
    InvalidUrl(String),

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

/// A single listing card that could not be turned into a record.
/// Always recovered by skipping the card.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Unparseable price: {0:?}")]
    BadPrice(String),

    #[error("Unusable address: {0:?}")]
    BadAddress(String),

    #[error("Unresolvable link: {0:?}")]
    BadLink(String),
}
