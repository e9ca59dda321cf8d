use crate::domain::listing::ResultRow;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use crate::spreadsheets::HEADERS;
use rust_xlsxwriter::{Format, Workbook};

pub fn results_xlsx_bytes(rows: &[ResultRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let bold = Format::new().set_bold();
    let money = Format::new().set_num_format("$#,##0.00");

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, &row.listing.address)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write address: {}", e)))?;

        worksheet
            .write_number_with_format(r, 1, row.listing.price, &money)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write price: {}", e)))?;

        if let Some(hoa) = row.listing.hoa {
            worksheet
                .write_number_with_format(r, 2, hoa, &money)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write HOA: {}", e)))?;
        }

        match row.rent.amount() {
            Some(rent) => worksheet.write_number_with_format(r, 3, rent, &money),
            None => worksheet.write_string(r, 3, row.rent.to_string()),
        }
        .map_err(|e| ServerError::XlsxError(format!("Failed to write rent: {}", e)))?;

        let figures = [
            row.figures.down_payment,
            row.figures.loan_amount,
            row.figures.monthly_payment,
            row.figures.monthly_tax,
        ];
        for (offset, value) in figures.into_iter().enumerate() {
            worksheet
                .write_number_with_format(r, 4 + offset as u16, value, &money)
                .map_err(|e| ServerError::XlsxError(format!("Failed to write figure: {}", e)))?;
        }

        worksheet
            .write_string(r, 8, &row.listing.url)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write url: {}", e)))?;
    }

    worksheet.autofit();

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_results_xlsx(rows: &[ResultRow], filename: &str) -> ResultResp {
    xlsx_response(results_xlsx_bytes(rows)?, filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_workbook_is_a_zip() {
        let bytes = results_xlsx_bytes(&[]).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
