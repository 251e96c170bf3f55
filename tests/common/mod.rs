use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

pub use ::aw::{
    dev::ServerHandle,
    http::{header, StatusCode},
    test,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};

use crate::main::{
    config::Config,
    data::Feed,
    feed::{FeedError, FeedFuture, FeedSource},
    state::Registry,
};

pub const FEED: &str = r#"{
    "respons_dato_tid": "/Date(1760000000000+0200)/",
    "versjon": "1.6",
    "regjeringsmedlemmer_liste": [
        {
            "id": "JGS",
            "fornavn": "Jonas Gahr",
            "etternavn": "Støre",
            "foedselsdato": "/Date(-295146000000+0100)/",
            "kjoenn": 2,
            "tittel": "Statsminister",
            "verv": "Statsminister",
            "departement": "Statsministerens kontor",
            "parti": { "id": "A", "navn": "Arbeiderpartiet" }
        },
        {
            "id": "ABE",
            "fornavn": "Anne",
            "etternavn": "Beate",
            "foedselsdato": "garbage",
            "kjoenn": 1,
            "tittel": "Finansminister",
            "parti": { "id": "SP", "navn": "Senterpartiet" }
        }
    ]
}"#;

/// Отдаёт заранее заданный JSON и считает обращения
pub struct StaticFeed {
    body: String,
    calls: AtomicUsize,
}

impl StaticFeed {
    pub fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_owned(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FeedSource for StaticFeed {
    fn fetch(&self) -> FeedFuture<'_> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ::serde_json::from_str::<Feed>(&self.body).map_err(FeedError::from)
        })
    }
}

pub struct DownFeed;

impl FeedSource for DownFeed {
    fn fetch(&self) -> FeedFuture<'_> {
        Box::pin(async { Err::<Feed, _>(FeedError::Status(503)) })
    }
}

pub fn registry(source: Arc<dyn FeedSource>) -> Data<Registry> {
    Data::new(Registry::new(Config::default(), source))
}

/// Local stand-in for `data.stortinget.no`: answers `GET /regjering` with a
/// fixed status and body. Returns the feed URL and a handle to stop it.
pub async fn upstream(status: StatusCode, body: &'static str) -> (String, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new().route(
            "/regjering",
            web::get().to(move || async move {
                HttpResponse::build(status)
                    .content_type("application/json")
                    .body(body)
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    ::aw::rt::spawn(server);

    (format!("http://{addr}/regjering"), handle)
}

pub fn with_feed_url(feed_url: String) -> Config {
    Config {
        feed_url,
        ..Config::default()
    }
}
