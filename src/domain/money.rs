// src/domain/money.rs

use regex::Regex;
use std::sync::OnceLock;

static AMOUNT: OnceLock<Regex> = OnceLock::new();

fn amount_regex() -> &'static Regex {
    AMOUNT.get_or_init(|| {
        Regex::new(r"\$?\s*\d[\d,]*(?:\.\d+)?(?:[kKmM]\b)?").expect("amount regex is valid")
    })
}

/// Parses a displayed money amount such as `$650,000`, `750k` or `$1.2M`.
///
/// Returns `None` for empty, negative or non-numeric text.
pub fn parse_currency(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '$' && *c != ',')
        .collect();

    let (digits, multiplier) = match cleaned.chars().last()? {
        'k' | 'K' => (&cleaned[..cleaned.len() - 1], 1_000.0),
        'm' | 'M' => (&cleaned[..cleaned.len() - 1], 1_000_000.0),
        _ => (cleaned.as_str(), 1.0),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = digits.parse::<f64>().ok()? * multiplier;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Finds the first money amount inside free text, e.g. `$150/month HOA` -> 150.
pub fn first_currency_in(text: &str) -> Option<f64> {
    amount_regex()
        .find_iter(text)
        .find_map(|m| parse_currency(m.as_str()))
}

/// `$2,800` style, rounded to whole dollars.
pub fn format_dollars(value: f64) -> String {
    let sign = if value.round() < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{:.0}", value.abs())))
}

/// `$3,201.73` style.
pub fn format_cents(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${}.{}", group_thousands(whole), frac)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
