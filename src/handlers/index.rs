use super::*;

const POLICY: CachePolicy = CachePolicy::NoStore;

#[derive(Template)]
#[template(path = "index.html")]
struct Index {
    cards: Vec<MemberCard>,
}

pub async fn get(reg: Data<Registry>) -> Result<impl Responder, FeedError> {
    let snapshot = reg.feed.get(POLICY).await?;
    let cards = cards(&snapshot.feed, &reg.config.photo_url_base, Utc::now());

    Ok(Index { cards }
        .customize()
        .insert_header((header::CACHE_CONTROL, POLICY.cache_control(snapshot.age()))))
}
