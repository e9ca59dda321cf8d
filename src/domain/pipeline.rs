// src/domain/pipeline.rs

use crate::domain::listing::{EnrichedListing, ResultRow};
use crate::domain::mortgage::{compute, FinancingParams};
use crate::scraper::{
    extract_listings, FetchError, ListingRules, PageFetcher, RentalEstimator, SearchFilter,
};

pub const DEFAULT_LIMIT: usize = 30;

/// Everything the form submits for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub filter: SearchFilter,
    pub financing: FinancingParams,
    /// Upper bound on rows returned (and rental lookups made).
    pub limit: usize,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            filter: SearchFilter::default(),
            financing: FinancingParams::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Runs one search end to end.
///
/// Only the listings page is allowed to fail the run. Cards that cannot be
/// parsed are dropped, and rental lookups that fail leave the row in place
/// with an unavailable estimate.
pub fn run_search(
    fetcher: &dyn PageFetcher,
    rules: &ListingRules,
    estimator: &mut RentalEstimator<'_>,
    request: &SearchRequest,
) -> Result<Vec<ResultRow>, FetchError> {
    let url = rules.search_url(&request.filter)?;
    tracing::info!(%url, "fetching listings page");

    let html = fetcher.fetch(&url)?;

    let mut listings = extract_listings(&html, &request.filter, rules);
    listings.truncate(request.limit);

    tracing::info!(count = listings.len(), "fetching rental estimates");

    let rows: Vec<ResultRow> = listings
        .into_iter()
        .map(|listing| {
            let rent = estimator.estimate(&listing.address);
            let figures = compute(listing.price, &request.financing);
            ResultRow::new(EnrichedListing { listing, rent }, figures)
        })
        .collect();

    let with_rent = rows.iter().filter(|r| r.rent.amount().is_some()).count();
    tracing::info!(rows = rows.len(), with_rent, "search complete");

    Ok(rows)
}
