/// What the buyer is looking for. Built once per search and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub county: String,
    pub max_price: u64,
    pub min_beds: u32,
    pub min_baths: f64,
    pub max_hoa: u64,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            county: "Temecula".to_string(),
            max_price: 700_000,
            min_beds: 3,
            min_baths: 2.5,
            max_hoa: 250,
        }
    }
}

/// One listing card as found on the results page.
#[derive(Debug, Clone, PartialEq)]
pub struct RawListing {
    pub address: String,
    /// Price exactly as displayed, e.g. "$650,000".
    pub price_text: String,
    /// Parsed list price, always >= 0.
    pub price: f64,
    /// Absolute link to the listing's detail page.
    pub url: String,
    /// Monthly HOA fee, `None` when the card shows no HOA fact.
    pub hoa: Option<f64>,
}
