// listings.rs
use crate::domain::money::{first_currency_in, parse_currency};
use crate::scraper::{FetchError, ParseError, RawListing, SearchFilter};
use ::scraper::{ElementRef, Html, Selector};
use url::Url;

/// Where to find things on the results page.
///
/// The target site's markup is undocumented and changes without notice, so
/// every selector lives here rather than in the extraction code.
#[derive(Debug, Clone)]
pub struct ListingRules {
    pub base_url: String,
    /// Site-specific region segment placed before the county, e.g. `city/19701/CA`.
    pub region_path: String,
    pub card: String,
    pub address: String,
    pub price: String,
    pub link: String,
    pub key_fact: String,
    /// Key facts containing this text (any case) carry the HOA fee.
    pub hoa_marker: String,
}

impl Default for ListingRules {
    fn default() -> Self {
        Self {
            base_url: "https://www.redfin.com".to_string(),
            region_path: "city/19701/CA".to_string(),
            card: "div.HomeCardContainer".to_string(),
            address: ".bp-Homecard__Address".to_string(),
            price: ".bp-Homecard__Price--value".to_string(),
            link: "a[href]".to_string(),
            key_fact: ".KeyFacts-item, .HomeStatsV2 .stats".to_string(),
            hoa_marker: "HOA".to_string(),
        }
    }
}

impl ListingRules {
    /// Results page URL with the filters embedded in the path.
    ///
    /// The county becomes a single path segment, so characters such as `/`,
    /// `?` or `#` are percent-encoded rather than changing the URL's shape.
    pub fn search_url(&self, filter: &SearchFilter) -> Result<String, FetchError> {
        let invalid = || FetchError::InvalidUrl(self.base_url.clone());

        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        let county = filter.county.split_whitespace().collect::<Vec<_>>().join("-");
        let filters = format!(
            "property-type=house,max-price={},min-beds={},min-baths={},hoa={}",
            filter.max_price, filter.min_beds, filter.min_baths, filter.max_hoa,
        );

        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(self.region_path.split('/').filter(|s| !s.is_empty()))
            .push(&county)
            .push("filter")
            .push(&filters);

        Ok(url.into())
    }
}

struct CardSelectors {
    card: Selector,
    address: Selector,
    price: Selector,
    link: Selector,
    key_fact: Selector,
}

impl CardSelectors {
    fn compile(rules: &ListingRules) -> Option<Self> {
        let parse = |s: &str| match Selector::parse(s) {
            Ok(sel) => Some(sel),
            Err(e) => {
                tracing::error!(selector = s, error = %e, "invalid listing selector");
                None
            }
        };

        Some(Self {
            card: parse(rules.card.as_str())?,
            address: parse(rules.address.as_str())?,
            price: parse(rules.price.as_str())?,
            link: parse(rules.link.as_str())?,
            key_fact: parse(rules.key_fact.as_str())?,
        })
    }
}

/// Pulls every usable listing card out of a results page, in page order.
///
/// Cards with missing or broken fields are skipped, and a page that no
/// longer matches the rules yields an empty list rather than an error.
pub fn extract_listings(html: &str, filter: &SearchFilter, rules: &ListingRules) -> Vec<RawListing> {
    let Some(selectors) = CardSelectors::compile(rules) else {
        return Vec::new();
    };
    let Ok(base) = Url::parse(&rules.base_url) else {
        tracing::error!(base_url = %rules.base_url, "invalid listing base url");
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let mut listings = Vec::new();
    let mut skipped = 0usize;

    for (index, card) in document.select(&selectors.card).enumerate() {
        match parse_card(card, &selectors, &base, &rules.hoa_marker) {
            Ok(listing) => listings.push(listing),
            Err(e) => {
                skipped += 1;
                tracing::debug!(card = index, error = %e, "skipping listing card");
            }
        }
    }

    tracing::info!(
        county = %filter.county,
        found = listings.len(),
        skipped,
        "extracted listings"
    );

    listings
}

fn parse_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
    base: &Url,
    hoa_marker: &str,
) -> Result<RawListing, ParseError> {
    let address = first_text(card, &selectors.address).ok_or(ParseError::MissingField("address"))?;
    if !address.chars().any(char::is_alphanumeric) {
        return Err(ParseError::BadAddress(address));
    }

    let price_text = first_text(card, &selectors.price).ok_or(ParseError::MissingField("price"))?;
    let price = parse_currency(&price_text).ok_or_else(|| ParseError::BadPrice(price_text.clone()))?;

    let href = card
        .select(&selectors.link)
        .find_map(|a| a.value().attr("href"))
        .ok_or(ParseError::MissingField("link"))?;
    let url = base
        .join(href)
        .map_err(|_| ParseError::BadLink(href.to_string()))?
        .to_string();

    let marker = hoa_marker.to_lowercase();
    let hoa = card
        .select(&selectors.key_fact)
        .map(element_text)
        .find(|text| text.to_lowercase().contains(&marker))
        .and_then(|text| first_currency_in(&text));

    Ok(RawListing {
        address,
        price_text,
        price,
        url,
        hoa,
    })
}

fn first_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    card.select(selector)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())
}

/// Element text with whitespace runs collapsed.
fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
