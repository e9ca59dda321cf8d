// templates/pages/home.rs

use crate::domain::pipeline::SearchRequest;
use crate::templates::{
    components::{card, number_field},
    desktop_layout,
};
use maud::{html, Markup};

pub fn home_page(defaults: &SearchRequest) -> Markup {
    desktop_layout(
        "Search",
        html! {
            h1 { "Real Estate Analysis" }
            (search_form(defaults))
        },
    )
}

pub fn search_form(req: &SearchRequest) -> Markup {
    let f = &req.filter;
    let fin = &req.financing;

    card(
        "Search",
        html! {
            form method="get" action="/search" {
                div class="grid" {
                    div {
                        label for="county" { "County" }
                        input type="text" id="county" name="county" value=(f.county) required;
                    }
                    (number_field("Max Price", "max_price", f.max_price, "10000"))
                    (number_field("Minimum Beds", "min_beds", f.min_beds, "1"))
                    (number_field("Minimum Bathrooms", "min_baths", f.min_baths, "0.5"))
                    (number_field("Max HOA", "max_hoa", f.max_hoa, "10"))
                    (number_field("Percentage Down", "down_percent", fin.down_fraction, "0.01"))
                    (number_field("Mortgage Rate", "rate", format!("{:.4}", fin.annual_rate), "0.0025"))
                    (number_field("Property Tax Rate", "tax_rate", format!("{:.3}", fin.annual_tax_rate), "0.001"))
                    (number_field("Loan term in months", "term_months", fin.term_months, "1"))
                    (number_field("Properties to display", "num_properties", req.limit, "1"))
                }
                button type="submit" { "Begin Search" }
            }
        },
    )
}
