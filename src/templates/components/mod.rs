use maud::{html, Markup};

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}

/// Labelled numeric input. `step` doubles as the browser's precision hint.
pub fn number_field(label: &str, name: &str, value: impl std::fmt::Display, step: &str) -> Markup {
    html! {
        div {
            label for=(name) { (label) }
            input type="number" id=(name) name=(name) value=(value) step=(step) min="0" required;
        }
    }
}
