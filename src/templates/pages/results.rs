use crate::domain::listing::ResultRow;
use crate::domain::money::{format_cents, format_dollars};
use crate::domain::pipeline::SearchRequest;
use crate::templates::desktop_layout;
use crate::templates::pages::home::search_form;
use maud::{html, Markup};

/// `query` is the raw query string of the search, reused for the export links.
pub fn results_page(req: &SearchRequest, rows: &[ResultRow], query: &str) -> Markup {
    desktop_layout(
        &format!("{} results", req.filter.county),
        html! {
            h1 { "Homes in " (req.filter.county) }
            (results_table(rows, query))
            (search_form(req))
        },
    )
}

pub fn results_table(rows: &[ResultRow], query: &str) -> Markup {
    html! {
        section class="card" {
            p {
                "Found " strong { (rows.len()) } " properties."
                @if !rows.is_empty() {
                    " Download: "
                    a href=(format!("/export.csv?{query}")) { "CSV" }
                    " · "
                    a href=(format!("/export.xlsx?{query}")) { "Excel" }
                }
            }

            @if rows.is_empty() {
                p class="muted" { "No listings matched. Try loosening the filters." }
            } @else {
                table {
                    thead {
                        tr {
                            th { "Address" }
                            th { "Price" }
                            th { "HOA" }
                            th { "Rent Estimate" }
                            th { "Down Payment" }
                            th { "Loan" }
                            th { "Monthly P&I" }
                            th { "Monthly Tax" }
                            th { "Cash Flow" }
                        }
                    }
                    tbody {
                        @for row in rows {
                            tr {
                                td { a href=(row.listing.url) target="_blank" rel="noopener" { (row.listing.address) } }
                                td { (row.listing.price_text) }
                                td {
                                    @match row.listing.hoa {
                                        Some(hoa) => { (format_dollars(hoa)) },
                                        None => span class="muted" { "None" },
                                    }
                                }
                                td { (row.rent) }
                                td { (format_cents(row.figures.down_payment)) }
                                td { (format_cents(row.figures.loan_amount)) }
                                td { (format_cents(row.figures.monthly_payment)) }
                                td { (format_cents(row.figures.monthly_tax)) }
                                td {
                                    @if let Some(flow) = row.monthly_cash_flow() {
                                        span class=(if flow < 0.0 { "negative" } else { "positive" }) { (format_cents(flow)) }
                                    } @else {
                                        span class="muted" { "–" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
