use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

use ::chrono::{DateTime, Utc};
use ::log::{debug, error, trace};
use ::tokio::sync::RwLock;

use crate::{config::Config, data::Feed};

#[derive(Debug, ::thiserror::Error)]
pub enum FeedError {
    #[error("upstream request failed: {0}")]
    Http(#[from] ::reqwest::Error),
    #[error("upstream answered with status {0}")]
    Status(u16),
    #[error("upstream document is malformed: {0}")]
    Decode(#[from] ::serde_json::Error),
}

/// Whether a fetched feed may be reused by later requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// always refetch
    NoStore,
    Revalidate(Duration),
}

impl CachePolicy {
    /// `Cache-Control` value for a page built from a feed fetched `age` ago.
    /// `max-age` is what is left of the interval, rounded up to whole seconds.
    pub fn cache_control(&self, age: Duration) -> String {
        match self {
            CachePolicy::NoStore => String::from("no-store"),
            CachePolicy::Revalidate(interval) => {
                let remaining = interval.saturating_sub(age);
                format!("public, max-age={}", remaining.as_secs_f64().ceil() as u64)
            }
        }
    }
}

pub type FeedFuture<'a> = Pin<Box<dyn Future<Output = Result<Feed, FeedError>> + Send + 'a>>;

/// Where the member list comes from
pub trait FeedSource: Send + Sync {
    fn fetch(&self) -> FeedFuture<'_>;
}

pub struct HttpFeedSource {
    client: ::reqwest::Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(config: &Config) -> Result<Self, ::reqwest::Error> {
        let mut builder = ::reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.upstream_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: config.feed_url.clone(),
        })
    }

    async fn get_feed(&self) -> Result<Feed, FeedError> {
        debug!("fetching feed `{}`", self.url);

        let res = self.client.get(&self.url).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = res.bytes().await?;
        Ok(::serde_json::from_slice::<Feed>(&body)?)
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch(&self) -> FeedFuture<'_> {
        Box::pin(self.get_feed())
    }
}

/// Feed together with the moment it was fetched
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub feed: Arc<Feed>,
    pub fetched_at: DateTime<Utc>,
    stored_at: Instant,
}

impl Snapshot {
    /// Time since the fetch, on the monotonic clock
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    fn is_fresh(&self, interval: Duration) -> bool {
        self.age() < interval
    }
}

/// Single-entry cache in front of a [`FeedSource`]
pub struct FeedClient {
    source: Arc<dyn FeedSource>,
    cached: RwLock<Option<Snapshot>>,
}

impl FeedClient {
    pub fn new(source: Arc<dyn FeedSource>) -> Self {
        Self {
            source,
            cached: RwLock::new(None),
        }
    }

    pub async fn get(&self, policy: CachePolicy) -> Result<Snapshot, FeedError> {
        let interval = match policy {
            CachePolicy::NoStore => return self.fetch().await,
            CachePolicy::Revalidate(interval) => interval,
        };

        if let Some(snapshot) = self.cached.read().await.as_ref() {
            if snapshot.is_fresh(interval) {
                trace!("feed cache hit, fetched at {}", snapshot.fetched_at);
                return Ok(snapshot.clone());
            }
        }

        let mut cached = self.cached.write().await;

        // другой запрос мог успеть обновить кэш, пока мы ждали блокировку
        if let Some(snapshot) = cached.as_ref() {
            if snapshot.is_fresh(interval) {
                return Ok(snapshot.clone());
            }
        }

        let snapshot = self.fetch().await?;
        *cached = Some(snapshot.clone());

        Ok(snapshot)
    }

    async fn fetch(&self) -> Result<Snapshot, FeedError> {
        match self.source.fetch().await {
            Ok(feed) => {
                debug!("feed fetched, {} members", feed.members.len());
                Ok(Snapshot {
                    feed: Arc::new(feed),
                    fetched_at: Utc::now(),
                    stored_at: Instant::now(),
                })
            }
            Err(err) => {
                error!("feed fetch failed: {err}");
                Err(err)
            }
        }
    }
}
