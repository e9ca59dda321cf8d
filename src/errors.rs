// errors.rs
use crate::scraper::FetchError;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, bad form input) or downstream layers (listings site, exports).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Listings unavailable: {0}")]
    Upstream(#[from] FetchError),

    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),

    #[error("CSV Error: {0}")]
    CsvError(String),

    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::Upstream(_) => 502,
            ServerError::XlsxError(_) | ServerError::CsvError(_) | ServerError::InternalError => 500,
        }
    }
}
