use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Runtime settings, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub http_timeout: Duration,
    pub rental_throttle: Duration,
    pub rental_jitter: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            http_timeout: Duration::from_secs(60),
            rental_throttle: Duration::from_millis(1000),
            rental_jitter: Duration::ZERO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, but reads through `lookup` so tests don't touch
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            max_workers: parse_or(&lookup, "MAX_WORKERS", defaults.max_workers)?,
            http_timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                defaults.http_timeout.as_secs(),
            )?),
            rental_throttle: Duration::from_millis(parse_or(
                &lookup,
                "RENTAL_THROTTLE_MS",
                defaults.rental_throttle.as_millis() as u64,
            )?),
            rental_jitter: Duration::from_millis(parse_or(
                &lookup,
                "RENTAL_JITTER_MS",
                defaults.rental_jitter.as_millis() as u64,
            )?),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(cfg.max_workers, 8);
        assert_eq!(cfg.rental_throttle, Duration::from_secs(1));
        assert_eq!(cfg.rental_jitter, Duration::ZERO);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("RENTAL_THROTTLE_MS", "2500"),
            ("RENTAL_JITTER_MS", " 500 "),
            ("HTTP_TIMEOUT_SECS", ""),
        ]))
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.rental_throttle, Duration::from_millis(2500));
        assert_eq!(cfg.rental_jitter, Duration::from_millis(500));
        assert_eq!(cfg.http_timeout, Duration::from_secs(60));
    }

    #[test]
    fn rejects_garbage() {
        let err = AppConfig::from_lookup(lookup(&[("MAX_WORKERS", "lots")])).unwrap_err();
        assert_eq!(err.key, "MAX_WORKERS");
        assert_eq!(err.value, "lots");
    }
}
