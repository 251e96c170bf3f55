use super::*;

#[derive(Template)]
#[template(path = "daily.html")]
struct Daily {
    cards: Vec<MemberCard>,
    /// момент получения фида, по Осло
    last_updated: String,
}

pub async fn get(reg: Data<Registry>) -> Result<impl Responder, FeedError> {
    let policy = CachePolicy::Revalidate(reg.config.revalidate);

    let snapshot = reg.feed.get(policy).await?;
    let cards = cards(&snapshot.feed, &reg.config.photo_url_base, Utc::now());

    Ok(Daily {
        cards,
        last_updated: format_last_updated(snapshot.fetched_at),
    }
    .customize()
    .insert_header((header::CACHE_CONTROL, policy.cache_control(snapshot.age()))))
}
