// rentals.rs
use crate::domain::listing::RentEstimate;
use crate::domain::money::{first_currency_in, parse_currency};
use crate::scraper::PageFetcher;
use ::scraper::{Html, Selector};
use rand::Rng;
use regex::Regex;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// How to find a rental estimate for an address.
#[derive(Debug, Clone)]
pub struct RentalRules {
    /// Lookup URL prefix; the address slug is appended as the last segment.
    pub base_url: String,
    /// Tried in order against the raw page text; capture group 1 is the amount.
    pub patterns: Vec<String>,
    /// Used when no pattern matches.
    pub fallback_selector: String,
}

impl Default for RentalRules {
    fn default() -> Self {
        Self {
            base_url: "https://www.zillow.com/rental-manager/price-my-rental/results".to_string(),
            patterns: vec![
                r#""rentZestimate"\s*:\s*"?\$?([\d,]+(?:\.\d+)?)"#.to_string(),
                r"Rent Zestimate[^$]{0,80}\$([\d,]+(?:\.\d+)?)".to_string(),
            ],
            fallback_selector: "span.ds-value".to_string(),
        }
    }
}

/// Minimum spacing between consecutive lookups against the rental site.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Duration,
    jitter: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(min_interval: Duration, jitter: Duration) -> Self {
        Self {
            min_interval,
            jitter,
            last: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    /// Runs `request` once the interval since the previous request finished
    /// has passed. The first request never waits.
    pub fn pace<T>(&mut self, request: impl FnOnce() -> T) -> T {
        if let Some(last) = self.last {
            let target = self.min_interval + self.random_jitter();
            let elapsed = last.elapsed();
            if elapsed < target {
                std::thread::sleep(target - elapsed);
            }
        }
        let out = request();
        self.last = Some(Instant::now());
        out
    }

    fn random_jitter(&self) -> Duration {
        let max_ms = self.jitter.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(rand::thread_rng().gen_range(0..=max_ms))
    }
}

/// Turns an address into the lookup slug: commas dropped, whitespace runs
/// become single hyphens, all lowercase.
///
/// Returns `None` when nothing addressable is left.
pub fn address_slug(address: &str) -> Option<String> {
    let slug = address
        .replace(',', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    slug.chars().any(char::is_alphanumeric).then_some(slug)
}

/// Looks up rent estimates one address at a time.
///
/// The throttle is borrowed so every estimator in the process paces against
/// the same clock; the lock is held for the whole request.
pub struct RentalEstimator<'a> {
    fetcher: &'a dyn PageFetcher,
    base_url: String,
    patterns: Vec<Regex>,
    fallback: Option<Selector>,
    throttle: &'a Mutex<Throttle>,
}

impl<'a> RentalEstimator<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, rules: &RentalRules, throttle: &'a Mutex<Throttle>) -> Self {
        let patterns = rules
            .patterns
            .iter()
            .filter_map(|p| match Regex::new(p) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::error!(pattern = %p, error = %e, "invalid rental pattern, ignoring");
                    None
                }
            })
            .collect();

        let fallback = match Selector::parse(&rules.fallback_selector) {
            Ok(sel) => Some(sel),
            Err(e) => {
                tracing::error!(selector = %rules.fallback_selector, error = %e, "invalid rental selector, ignoring");
                None
            }
        };

        Self {
            fetcher,
            base_url: rules.base_url.trim_end_matches('/').to_string(),
            patterns,
            fallback,
            throttle,
        }
    }

    pub fn lookup_url(&self, address: &str) -> Option<String> {
        address_slug(address).map(|slug| format!("{}/{}", self.base_url, slug))
    }

    /// Never fails: anything that goes wrong is `Unavailable`.
    pub fn estimate(&mut self, address: &str) -> RentEstimate {
        let Some(url) = self.lookup_url(address) else {
            tracing::debug!(%address, "address has no usable slug");
            return RentEstimate::Unavailable;
        };

        let fetched = {
            let mut throttle = self.throttle.lock().unwrap_or_else(PoisonError::into_inner);
            throttle.pace(|| self.fetcher.fetch(&url))
        };

        let body = match fetched {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(%address, error = %e, "rental lookup failed");
                return RentEstimate::Unavailable;
            }
        };

        match self.find_estimate(&body) {
            Some(amount) => {
                tracing::debug!(%address, amount, "found rental estimate");
                RentEstimate::Available(amount)
            }
            None => {
                tracing::debug!(%address, "no rental estimate on page");
                RentEstimate::Unavailable
            }
        }
    }

    fn find_estimate(&self, body: &str) -> Option<f64> {
        let positive = |amount: &f64| *amount > 0.0;

        let from_patterns = self.patterns.iter().find_map(|re| {
            re.captures(body)
                .and_then(|caps| caps.get(1))
                .and_then(|m| parse_currency(m.as_str()))
                .filter(positive)
        });

        from_patterns.or_else(|| {
            let sel = self.fallback.as_ref()?;
            let document = Html::parse_document(body);
            let text = document.select(sel).next()?.text().collect::<String>();
            first_currency_in(&text).filter(positive)
        })
    }
}
