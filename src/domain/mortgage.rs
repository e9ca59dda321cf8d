// src/domain/mortgage.rs

/// Buyer-supplied financing assumptions, shared by every row of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancingParams {
    /// Fraction of the price paid up front, 0.0..=1.0.
    pub down_fraction: f64,
    /// Annual interest rate as a fraction, e.g. 0.0625.
    pub annual_rate: f64,
    pub term_months: u32,
    /// Annual property tax as a fraction of price.
    pub annual_tax_rate: f64,
}

impl Default for FinancingParams {
    fn default() -> Self {
        Self {
            down_fraction: 0.20,
            annual_rate: 0.0625,
            term_months: 360,
            annual_tax_rate: 0.011,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MortgageFigures {
    pub down_payment: f64,
    pub loan_amount: f64,
    /// Level monthly principal + interest.
    pub monthly_payment: f64,
    pub monthly_tax: f64,
    /// Not estimated yet; always zero.
    pub monthly_insurance: f64,
}

/// Derives the monthly cost picture for a single list price.
///
/// A zero or negative rate amortizes straight-line (`loan / term`) instead of
/// dividing by zero, and a zero term yields no payment at all.
pub fn compute(price: f64, params: &FinancingParams) -> MortgageFigures {
    let down_payment = price * params.down_fraction;
    let loan_amount = price - down_payment;

    MortgageFigures {
        down_payment,
        loan_amount,
        monthly_payment: monthly_payment(loan_amount, params.annual_rate, params.term_months),
        monthly_tax: price * params.annual_tax_rate / 12.0,
        monthly_insurance: 0.0,
    }
}

/// Standard amortization formula.
pub fn monthly_payment(loan_amount: f64, annual_rate: f64, term_months: u32) -> f64 {
    if term_months == 0 {
        return 0.0;
    }

    let n = term_months as f64;
    let monthly_rate = annual_rate / 12.0;
    if monthly_rate <= 0.0 {
        return loan_amount / n;
    }

    let growth = (1.0 + monthly_rate).powf(n);
    if growth <= 1.0 {
        // rate too small to register in f64
        return loan_amount / n;
    }
    loan_amount * monthly_rate * growth / (growth - 1.0)
}
