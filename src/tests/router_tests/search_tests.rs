// src/tests/router_tests/search_tests.rs

use crate::router::handle;
use crate::tests::utils::*;
use std::sync::Arc;
use std::time::Duration;

const SEARCH_QUERY: &str = "county=Temecula&max_price=700000&min_beds=3&min_baths=2.5&max_hoa=250&down_percent=0.2&rate=0.0625&tax_rate=0.011&term_months=360&num_properties=30";

fn stocked_fetcher() -> StubFetcher {
    let page = listings_page(&[
        listing_card(
            "41 Vineyard Way, Temecula, CA 92592",
            Some("$650,000"),
            "/CA/Temecula/home/1",
            Some("$150/month HOA"),
        ),
        listing_card("9 Oak Ridge Dr, Temecula, CA 92591", Some("$680,000"), "/CA/Temecula/home/2", None),
    ]);

    StubFetcher::default()
        .page(LISTINGS_URL, &page)
        .page(&format!("{RENTAL_BASE}/41-vineyard-way-temecula-ca-92592"), &rent_page(2800))
}

#[test]
fn home_page_shows_prefilled_form() {
    let state = app_state(StubFetcher::default());

    let resp = handle(get("/"), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"action="/search""#));
    assert!(body.contains(r#"value="Temecula""#));
    assert!(body.contains(r#"name="num_properties""#));
}

#[test]
fn search_renders_result_table() {
    let state = app_state(stocked_fetcher());

    let resp = handle(get(&format!("/search?{SEARCH_QUERY}")), &state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("41 Vineyard Way, Temecula, CA 92592"));
    assert!(body.contains("$650,000"));
    assert!(body.contains("$2,800"));
    assert!(body.contains("Not Available"));
    assert!(body.contains("$520,000.00"));
    assert!(body.contains("$595.83"));
    assert!(body.contains("$3,201.73"));
    assert!(body.contains("https://www.redfin.com/CA/Temecula/home/1"));
    assert!(body.contains(&format!("/export.csv?{}", SEARCH_QUERY.replace('&', "&amp;"))));
}

#[test]
fn unstubbed_county_fails_closed() {
    let state = app_state(StubFetcher::default());

    // the San-Diego listings URL 404s, which aborts the whole run
    let err = handle(get("/search?county=San+Diego"), &state).err().expect("search should fail");
    assert_eq!(err.status(), 502);
}

#[test]
fn listings_outage_is_bad_gateway() {
    let state = app_state(StubFetcher::default().status(LISTINGS_URL, 500));

    let err = handle(get(&format!("/search?{SEARCH_QUERY}")), &state).err().expect("search should fail");
    assert_eq!(err.status(), 502);

    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Listings unavailable"));
}

#[test]
fn missing_county_is_bad_request() {
    let state = app_state(stocked_fetcher());

    let err = handle(get("/search?max_price=700000"), &state).err().expect("search should fail");
    assert_eq!(err.status(), 400);
}

#[test]
fn unknown_route_is_not_found() {
    let state = app_state(StubFetcher::default());

    let err = handle(get("/admin"), &state).err().expect("request should fail");
    assert_eq!(err.status(), 404);
}


#[test]
fn concurrent_searches_share_the_rental_throttle() {
    let interval = Duration::from_millis(100);
    let fetcher = Arc::new(stocked_fetcher());
    let state = app_state_throttled(Arc::clone(&fetcher), interval);

    std::thread::scope(|scope| {
        for _ in 0..2 {
            scope.spawn(|| {
                let resp = handle(get(&format!("/search?{SEARCH_QUERY}")), &state).unwrap();
                assert_eq!(resp.status(), 200);
            });
        }
    });

    // two rows per search, so four lookups from two overlapping runs
    let lookups = fetcher.requested_at(RENTAL_BASE);
    assert_eq!(lookups.len(), 4);
    for pair in lookups.windows(2) {
        let gap = pair[1].duration_since(pair[0]);
        assert!(gap >= interval, "lookups only {gap:?} apart");
    }
}
