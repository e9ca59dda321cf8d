use crate::domain::money::format_dollars;
use crate::domain::mortgage::MortgageFigures;
use crate::scraper::RawListing;
use std::fmt;

/// Outcome of a rental lookup. A missing estimate is a normal result,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RentEstimate {
    Available(f64),
    Unavailable,
}

impl RentEstimate {
    pub fn amount(&self) -> Option<f64> {
        match self {
            RentEstimate::Available(v) => Some(*v),
            RentEstimate::Unavailable => None,
        }
    }
}

impl fmt::Display for RentEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentEstimate::Available(v) => write!(f, "{}", format_dollars(*v)),
            RentEstimate::Unavailable => write!(f, "Not Available"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedListing {
    pub listing: RawListing,
    pub rent: RentEstimate,
}

/// One line of the final table, in extraction order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub listing: RawListing,
    pub rent: RentEstimate,
    pub figures: MortgageFigures,
}

impl ResultRow {
    pub fn new(enriched: EnrichedListing, figures: MortgageFigures) -> Self {
        Self {
            listing: enriched.listing,
            rent: enriched.rent,
            figures,
        }
    }

    /// Rent minus the monthly carrying cost (P&I + tax + HOA), when rent is known.
    pub fn monthly_cash_flow(&self) -> Option<f64> {
        let rent = self.rent.amount()?;
        let hoa = self.listing.hoa.unwrap_or(0.0);
        Some(
            rent - self.figures.monthly_payment
                - self.figures.monthly_tax
                - self.figures.monthly_insurance
                - hoa,
        )
    }
}
