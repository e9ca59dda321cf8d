use crate::domain::listing::{RentEstimate, ResultRow};
use crate::errors::ServerError;
use crate::responses::{csv_response, ResultResp};
use crate::spreadsheets::HEADERS;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    address: &'a str,
    price: String,
    hoa: String,
    rental_estimate: String,
    down_payment: String,
    loan_amount: String,
    monthly_payment: String,
    monthly_tax: String,
    url: &'a str,
}

impl<'a> From<&'a ResultRow> for CsvRow<'a> {
    fn from(row: &'a ResultRow) -> Self {
        let money = |v: f64| format!("{v:.2}");
        Self {
            address: &row.listing.address,
            price: money(row.listing.price),
            hoa: row.listing.hoa.map(money).unwrap_or_default(),
            rental_estimate: match row.rent {
                RentEstimate::Available(v) => money(v),
                RentEstimate::Unavailable => row.rent.to_string(),
            },
            down_payment: money(row.figures.down_payment),
            loan_amount: money(row.figures.loan_amount),
            monthly_payment: money(row.figures.monthly_payment),
            monthly_tax: money(row.figures.monthly_tax),
            url: &row.listing.url,
        }
    }
}

/// Serializes the result table with a fixed header row, even when empty.
pub fn results_csv_bytes(rows: &[ResultRow]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(HEADERS)
        .map_err(|e| ServerError::CsvError(format!("Failed to write header: {e}")))?;

    for row in rows {
        writer
            .serialize(CsvRow::from(row))
            .map_err(|e| ServerError::CsvError(format!("Failed to write row: {e}")))?;
    }

    writer
        .into_inner()
        .map_err(|e| ServerError::CsvError(format!("Failed to flush CSV: {e}")))
}

pub fn export_results_csv(rows: &[ResultRow], filename: &str) -> ResultResp {
    csv_response(results_csv_bytes(rows)?, filename)
}
