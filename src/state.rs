use std::sync::Arc;

use crate::{
    config::Config,
    feed::{FeedClient, FeedSource},
};

pub struct Registry {
    pub config: Config,
    pub feed: FeedClient,
}

impl Registry {
    pub fn new(config: Config, source: Arc<dyn FeedSource>) -> Self {
        Self {
            config,
            feed: FeedClient::new(source),
        }
    }
}
