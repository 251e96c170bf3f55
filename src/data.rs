use ::enum_primitive_derive::Primitive;
use ::num_traits::FromPrimitive;
use ::reqwest::Url;
use ::serde::{Deserialize, Serialize};

/// Документ `eksport/regjering?format=json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Feed {
    #[serde(rename = "regjeringsmedlemmer_liste")]
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Member {
    pub id: String,
    #[serde(rename = "fornavn")]
    pub first_name: String,
    #[serde(rename = "etternavn")]
    pub last_name: String,
    /// Encoded date, e.g. `/Date(289090800000+0100)/`
    #[serde(rename = "foedselsdato", default)]
    pub birth_date: String,
    #[serde(rename = "kjoenn", default)]
    pub gender: Option<u8>,
    #[serde(rename = "tittel", default)]
    pub title: String,
    #[serde(rename = "verv", default)]
    pub role: Option<String>,
    #[serde(rename = "departement", default)]
    pub department: Option<String>,
    #[serde(rename = "parti", default)]
    pub party: Option<Party>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Party {
    pub id: String,
    #[serde(rename = "navn")]
    pub name: String,
}

#[derive(Debug, Primitive, Clone, Copy, Eq, PartialEq)]
pub enum Gender {
    Unspecified = 0,
    Female = 1,
    Male = 2,
}

impl Gender {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Gender::Unspecified => None,
            Gender::Female => Some("Kvinne"),
            Gender::Male => Some("Mann"),
        }
    }
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender.and_then(Gender::from_u8)
    }

    /// `departement`, if the feed has a non-empty one
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref().filter(|d| !d.trim().is_empty())
    }

    /// `verv`, if non-empty
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.trim().is_empty())
    }

    pub fn party_name(&self) -> &str {
        self.party.as_ref().map(|p| p.name.as_str()).unwrap_or_default()
    }
}

/// Ссылка на фото члена правительства
pub fn photo_url(base: &Url, member_id: &str) -> String {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("personid", member_id)
        .append_pair("storrelse", "stort")
        .append_pair("erstatningsbilde", "true");
    url.into()
}
