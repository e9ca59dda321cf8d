mod fetcher;
mod listings;
mod models;
mod rentals;
mod scraper_error;

pub use fetcher::{HttpFetcher, PageFetcher};
pub use listings::{extract_listings, ListingRules};
pub use models::{RawListing, SearchFilter};
pub use rentals::{RentalEstimator, RentalRules, Throttle};
pub use scraper_error::{FetchError, ParseError};
