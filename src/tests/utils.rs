use crate::router::AppState;
use crate::scraper::{FetchError, ListingRules, PageFetcher, RentalRules, Throttle};
use astra::{Body, Request, Response};
use http::Method;
use std::collections::HashMap;
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Serves canned bodies by exact URL; anything unknown is a 404.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, Result<String, u16>>,
    pub requests: Mutex<Vec<(String, Instant)>>,
}

impl StubFetcher {
    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    /// When each request whose URL starts with `prefix` was made, in order.
    pub fn requested_at(&self, prefix: &str) -> Vec<Instant> {
        let mut times: Vec<Instant> = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(url, _)| url.starts_with(prefix))
            .map(|(_, at)| *at)
            .collect();
        times.sort();
        times
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push((url.to_string(), Instant::now()));
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

pub const LISTINGS_URL: &str = "https://www.redfin.com/city/19701/CA/Temecula/filter/property-type=house,max-price=700000,min-beds=3,min-baths=2.5,hoa=250";
pub const RENTAL_BASE: &str = "https://www.zillow.com/rental-manager/price-my-rental/results";

pub fn listing_card(address: &str, price: Option<&str>, href: &str, hoa_fact: Option<&str>) -> String {
    let price = price
        .map(|p| format!(r#"<span class="bp-Homecard__Price--value">{p}</span>"#))
        .unwrap_or_default();
    let hoa = hoa_fact
        .map(|f| format!(r#"<span class="KeyFacts-item">{f}</span>"#))
        .unwrap_or_default();

    format!(
        r#"<div class="HomeCardContainer">
             <div class="bp-Homecard">
               <a href="{href}" class="link-and-anchor"><img alt="photo"></a>
               <div class="bp-Homecard__Content">
                 {price}
                 <div class="bp-Homecard__Stats"><span>3 beds</span><span>2.5 baths</span></div>
                 <div class="bp-Homecard__Address">{address}</div>
                 <div class="KeyFacts">{hoa}</div>
               </div>
             </div>
           </div>"#
    )
}

pub fn listings_page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Temecula Homes</title></head>
           <body><div id="results">{}</div></body></html>"#,
        cards.concat()
    )
}

pub fn rent_page(amount: u32) -> String {
    format!(r#"<html><script>var data = {{"rentZestimate":{amount},"zestimate":null}};</script></html>"#)
}

pub fn app_state(fetcher: StubFetcher) -> AppState {
    app_state_throttled(fetcher, Duration::ZERO)
}

impl PageFetcher for Arc<StubFetcher> {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.as_ref().fetch(url)
    }
}

pub fn app_state_throttled(fetcher: impl PageFetcher + Send + Sync + 'static, interval: Duration) -> AppState {
    AppState {
        fetcher: Box::new(fetcher),
        listing_rules: ListingRules::default(),
        rental_rules: RentalRules::default(),
        throttle: Mutex::new(Throttle::new(interval, Duration::ZERO)),
    }
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn body_string(mut resp: Response) -> String {
    let mut body = Vec::new();
    resp.body_mut().reader().read_to_end(&mut body).unwrap();
    String::from_utf8(body).unwrap()
}
