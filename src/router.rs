use crate::domain::mortgage::FinancingParams;
use crate::domain::pipeline::{run_search, SearchRequest, DEFAULT_LIMIT};
use crate::domain::listing::ResultRow;
use crate::errors::ServerError;
use crate::responses::html_response;
use crate::responses::ResultResp;
use crate::scraper::{ListingRules, PageFetcher, RentalEstimator, RentalRules, SearchFilter, Throttle};
use crate::spreadsheets::{export_filename, export_results_csv, export_results_xlsx};
use crate::templates;
use astra::Request;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

/// Everything a request handler needs, shared across workers.
pub struct AppState {
    pub fetcher: Box<dyn PageFetcher + Send + Sync>,
    pub listing_rules: ListingRules,
    pub rental_rules: RentalRules,
    /// One clock for the whole process, so concurrent searches still space
    /// out their rental lookups.
    pub throttle: Mutex<Throttle>,
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::home_page(&SearchRequest::default())),

        ("GET", "/search") => {
            let query = req.uri().query().unwrap_or("");
            let search = parse_search_request(&parse_query(&req))?;
            let rows = search_rows(state, &search)?;
            html_response(templates::pages::results_page(&search, &rows, query))
        }

        ("GET", "/export.csv") => {
            let search = parse_search_request(&parse_query(&req))?;
            let rows = search_rows(state, &search)?;
            export_results_csv(&rows, &export_filename(&search.filter.county, "csv"))
        }

        ("GET", "/export.xlsx") => {
            let search = parse_search_request(&parse_query(&req))?;
            let rows = search_rows(state, &search)?;
            export_results_xlsx(&rows, &export_filename(&search.filter.county, "xlsx"))
        }

        _ => Err(ServerError::NotFound),
    }
}

fn search_rows(state: &AppState, search: &SearchRequest) -> Result<Vec<ResultRow>, ServerError> {
    let mut estimator = RentalEstimator::new(state.fetcher.as_ref(), &state.rental_rules, &state.throttle);
    Ok(run_search(
        state.fetcher.as_ref(),
        &state.listing_rules,
        &mut estimator,
        search,
    )?)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}

/// Builds a search from form fields. Absent fields take the form defaults;
/// present-but-invalid ones are rejected.
pub fn parse_search_request(params: &HashMap<String, String>) -> Result<SearchRequest, ServerError> {
    let defaults = SearchRequest::default();

    let county = params
        .get("county")
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ServerError::BadRequest("county is required".into()))?
        .to_string();

    let filter = SearchFilter {
        county,
        max_price: field(params, "max_price", defaults.filter.max_price)?,
        min_beds: field(params, "min_beds", defaults.filter.min_beds)?,
        min_baths: non_negative(params, "min_baths", defaults.filter.min_baths)?,
        max_hoa: field(params, "max_hoa", defaults.filter.max_hoa)?,
    };

    let down_fraction = non_negative(params, "down_percent", defaults.financing.down_fraction)?;
    if down_fraction > 1.0 {
        return Err(ServerError::BadRequest(
            "down_percent must be a fraction between 0 and 1".into(),
        ));
    }

    let financing = FinancingParams {
        down_fraction,
        annual_rate: finite(params, "rate", defaults.financing.annual_rate)?,
        term_months: field(params, "term_months", defaults.financing.term_months)?,
        annual_tax_rate: non_negative(params, "tax_rate", defaults.financing.annual_tax_rate)?,
    };

    let limit: usize = field(params, "num_properties", DEFAULT_LIMIT)?;

    Ok(SearchRequest {
        filter,
        financing,
        limit,
    })
}

fn field<T: FromStr>(params: &HashMap<String, String>, name: &str, default: T) -> Result<T, ServerError> {
    match params.get(name).map(|v| v.trim()) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::BadRequest(format!("invalid {name}: {raw:?}"))),
    }
}

fn finite(params: &HashMap<String, String>, name: &str, default: f64) -> Result<f64, ServerError> {
    let value: f64 = field(params, name, default)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ServerError::BadRequest(format!("invalid {name}: not a number")))
    }
}

fn non_negative(params: &HashMap<String, String>, name: &str, default: f64) -> Result<f64, ServerError> {
    let value = finite(params, name, default)?;
    if value < 0.0 {
        return Err(ServerError::BadRequest(format!("{name} must not be negative")));
    }
    Ok(value)
}
