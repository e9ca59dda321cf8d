pub mod export_csv;
pub mod export_xlsx;

pub use export_csv::export_results_csv;
pub use export_xlsx::export_results_xlsx;

/// Column order shared by every export format.
pub const HEADERS: [&str; 9] = [
    "Address",
    "Price",
    "HOA",
    "Rental Estimate",
    "Down Payment",
    "Loan Amount",
    "Monthly Payment",
    "Monthly Tax",
    "URL",
];

/// `house_finder_temecula_20241017-1530.csv`
pub fn export_filename(county: &str, extension: &str) -> String {
    let county: String = county
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M");
    format!("house_finder_{county}_{stamp}.{extension}")
}
