use std::{collections::HashMap, str::FromStr, time::Duration};

use ::reqwest::Url;

pub const DEFAULT_FEED_URL: &str = "https://data.stortinget.no/eksport/regjering?format=json";
pub const DEFAULT_PHOTO_URL_BASE: &str = "https://data.stortinget.no/eksport/personbilde";
/// сутки
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, ::thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("`{key}` has invalid value `{value}`")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub workers: usize,
    pub feed_url: String,
    pub photo_url_base: Url,
    /// How long the daily page keeps a fetched feed
    pub revalidate: Duration,
    /// `None` leaves the HTTP client default in place
    pub upstream_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Result<Self, ConfigError> {
        let vars = vars.into_iter().collect::<HashMap<_, _>>();
        let default = Self::default();

        let photo_url_base = match vars.get("PHOTO_URL_BASE") {
            Some(value) => Url::parse(value).map_err(|_| ConfigError::InvalidValue {
                key: "PHOTO_URL_BASE",
                value: value.clone(),
            })?,
            None => default.photo_url_base,
        };

        Ok(Self {
            bind_addr: vars.get("BIND_ADDR").cloned().unwrap_or(default.bind_addr),
            port: parse(&vars, "PORT")?.unwrap_or(default.port),
            workers: parse(&vars, "WORKERS")?.unwrap_or(default.workers),
            feed_url: vars.get("FEED_URL").cloned().unwrap_or(default.feed_url),
            photo_url_base,
            revalidate: parse(&vars, "REVALIDATE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(default.revalidate),
            upstream_timeout: parse(&vars, "UPSTREAM_TIMEOUT_SECS")?.map(Duration::from_secs),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: String::from("0.0.0.0"),
            port: 8080,
            workers: 2,
            feed_url: String::from(DEFAULT_FEED_URL),
            photo_url_base: Url::parse(DEFAULT_PHOTO_URL_BASE).expect("default photo url"),
            revalidate: DEFAULT_REVALIDATE,
            upstream_timeout: None,
        }
    }
}

fn parse<F: FromStr>(vars: &HashMap<String, String>, key: &'static str) -> Result<Option<F>, ConfigError> {
    vars.get(key)
        .map(|value| {
            value.trim().parse::<F>().map_err(|_| ConfigError::InvalidValue {
                key,
                value: value.clone(),
            })
        })
        .transpose()
}
