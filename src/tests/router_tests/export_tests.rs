use crate::router::handle;
use crate::tests::utils::*;

fn one_listing_state() -> crate::router::AppState {
    let page = listings_page(&[listing_card(
        "41 Vineyard Way, Temecula, CA 92592",
        Some("$650,000"),
        "/CA/Temecula/home/1",
        None,
    )]);
    app_state(StubFetcher::default().page(LISTINGS_URL, &page))
}

#[test]
fn csv_export_is_an_attachment_with_fixed_header() {
    let state = one_listing_state();

    let resp = handle(get("/export.csv?county=Temecula"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"house_finder_temecula_"));
    assert!(disposition.ends_with(".csv\""));

    let body = body_string(resp);
    let mut lines = body.lines();
    assert_eq!(
        lines.next(),
        Some("Address,Price,HOA,Rental Estimate,Down Payment,Loan Amount,Monthly Payment,Monthly Tax,URL")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("\"41 Vineyard Way, Temecula, CA 92592\",650000.00,,Not Available,130000.00,520000.00,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn xlsx_export_has_spreadsheet_content_type() {
    let state = one_listing_state();

    let resp = handle(get("/export.xlsx?county=Temecula"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").and_then(|v| v.to_str().ok()),
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
    );
}
