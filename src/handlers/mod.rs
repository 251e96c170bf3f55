use ::askama_actix::{Template, TemplateToResponse};
use ::aw::{
    body::BoxBody,
    http::{header, StatusCode},
    web::{self, Data},
    HttpResponse, Responder, ResponseError,
};
use ::chrono::{DateTime, Utc};
use ::log::warn;
use ::reqwest::Url;

use crate::{
    data::{photo_url, Feed, Gender, Member},
    date::{age_on, format_last_updated, format_medium, parse_date},
    feed::{CachePolicy, FeedError},
    state::*,
};

mod daily;
mod index;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(index::get)));
    cfg.service(web::resource("/daglig").route(web::get().to(daily::get)));
}

/// Одна карточка члена правительства
#[derive(Debug, Clone)]
pub struct MemberCard {
    /// `id` из фида, ключ карточки
    pub key: String,
    pub photo_url: String,
    pub name: String,
    /// пустая строка, если дату не удалось разобрать
    pub birth_date: String,
    pub age: Option<i32>,
    pub gender: Option<&'static str>,
    pub title: String,
    pub department: Option<String>,
    /// `departement`, а если его нет, то `verv`
    pub department_or_role: Option<String>,
    pub party: String,
}

impl MemberCard {
    pub fn new(member: &Member, photo_base: &Url, today: DateTime<Utc>) -> Self {
        if member.id.is_empty() {
            warn!(
                "member `{}` has no id, card key will be empty",
                member.full_name()
            );
        }

        let birth = parse_date(&member.birth_date);

        Self {
            key: member.id.clone(),
            photo_url: photo_url(photo_base, &member.id),
            name: member.full_name(),
            birth_date: birth.as_ref().map(format_medium).unwrap_or_default(),
            age: age_on(birth, today),
            gender: member.gender().and_then(Gender::label),
            title: member.title.clone(),
            department: member.department().map(String::from),
            department_or_role: member.department().or(member.role()).map(String::from),
            party: member.party_name().to_owned(),
        }
    }
}

/// Cards in feed order
pub fn cards(feed: &Feed, photo_base: &Url, today: DateTime<Utc>) -> Vec<MemberCard> {
    feed.members
        .iter()
        .map(|member| MemberCard::new(member, photo_base, today))
        .collect()
}

#[derive(Clone, Template)]
#[template(path = "error.html")]
pub struct ErrorTpl {
    pub status_code: u16,
}

impl ResponseError for FeedError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_GATEWAY
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        let tpl = ErrorTpl {
            status_code: self.status_code().as_u16(),
        };

        let mut res = tpl.to_response();
        *res.status_mut() = self.status_code();
        res.headers_mut().insert(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-store"),
        );
        res
    }
}
