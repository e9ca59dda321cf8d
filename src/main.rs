use crate::config::AppConfig;
use crate::responses::error_to_response;
use crate::router::{handle, AppState};
use crate::scraper::{HttpFetcher, ListingRules, RentalRules, Throttle};
use astra::{Request, Server};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scraper;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "configuration failed");
            std::process::exit(1);
        }
    };

    let fetcher = match HttpFetcher::new(config.http_timeout) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(error = %e, "http client init failed");
            std::process::exit(1);
        }
    };

    let state = AppState {
        fetcher: Box::new(fetcher),
        listing_rules: ListingRules::default(),
        rental_rules: RentalRules::default(),
        throttle: Mutex::new(Throttle::new(config.rental_throttle, config.rental_jitter)),
    };

    tracing::info!(addr = %config.bind_addr, workers = config.max_workers, "starting server");

    let server = Server::bind(config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req: Request, _info| {
        let path = req.uri().path().to_string();
        let start = std::time::Instant::now();

        let resp = match handle(req, &state) {
            Ok(resp) => resp,
            Err(err) => error_to_response(err),
        };

        tracing::info!(%path, status = resp.status().as_u16(), elapsed = ?start.elapsed(), "handled request");
        resp
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down cleanly");
}
