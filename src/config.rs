//! Server configuration parsed from environment variables.

use crate::store::{DEFAULT_LATENCY_MAX_MS, DEFAULT_LATENCY_MIN_MS, Latency};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Origin that share URLs are built on, without a trailing slash.
    pub public_base_url: String,
    pub latency: Latency,
}

impl AppConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_BASE_URL`: default `http://localhost:<PORT>`
    /// - `LATENCY_MIN_MS`: default 200
    /// - `LATENCY_MAX_MS`: default 400
    ///
    /// Unparseable values fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = env_parse(&lookup, "PORT", DEFAULT_PORT);
        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("http://localhost:{port}"));
        let latency = Latency::new(
            env_parse(&lookup, "LATENCY_MIN_MS", DEFAULT_LATENCY_MIN_MS),
            env_parse(&lookup, "LATENCY_MAX_MS", DEFAULT_LATENCY_MAX_MS),
        );
        Self { port, public_base_url, latency }
    }
}

fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + Copy,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
