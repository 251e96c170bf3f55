extern crate actix_web as aw;

use std::sync::Arc;

use ::aw::{web::Data, HttpServer};
use ::dotenvy::dotenv;
use ::log::{info, trace};

pub mod config;
pub mod data;
pub mod date;
pub mod feed;
pub mod handlers;
pub mod state;
use config::{Config, ConfigError};
use feed::HttpFeedSource;
use state::*;

macro_rules! app {
    () => {
        ::actix_web::App::new()
            .wrap(::actix_web::middleware::Logger::default())
            .service(actix_files::Files::new("/static", "./static/").use_last_modified(true))
            .configure(handlers::config)
    };
}

#[derive(Debug, ::thiserror::Error)]
enum StartUpError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("HTTP client error: {0}")]
    Client(#[from] ::reqwest::Error),
    #[error("general IO error: {0}")]
    IO(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartUpError> {
    dotenv().ok();

    env_logger::init();

    trace!("TRACE level enabled");

    let config = Config::from_env()?;
    let source = HttpFeedSource::new(&config)?;

    info!(
        "serving on {}:{}, feed `{}`",
        config.bind_addr, config.port, config.feed_url
    );

    let bind = (config.bind_addr.clone(), config.port);
    let workers = config.workers;
    let registry = Data::new(Registry::new(config, Arc::new(source)));

    let srv = HttpServer::new(move || app!().app_data(Data::clone(&registry)))
        .workers(workers)
        .bind(bind)?
        .run();

    srv.await?;

    Ok(())
}
