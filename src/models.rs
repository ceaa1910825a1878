use jiff::civil::Date;
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::{
    entities::{AttachmentKind, film},
    error::{CatalogError, CatalogResult},
};

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct GenreForm {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}

impl GenreForm {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct FilmForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub release_date: Option<Date>,
    #[serde(default)]
    pub runtime: Option<i32>,
    #[serde(default = "default_rate")]
    #[validate(range(min = 1.0, max = 10.0))]
    pub rate: Option<f64>,
}

fn default_rate() -> Option<f64> {
    Some(film::DEFAULT_RATE)
}

impl FilmForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            plot: None,
            release_date: None,
            runtime: None,
            rate: default_rate(),
        }
    }

    pub fn released(mut self, date: Date) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn rated(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn check(&self) -> CatalogResult<()> {
        self.validate()?;
        // range() lets NaN through
        if self.rate.is_some_and(|r| !r.is_finite()) {
            return Err(CatalogError::validation("rate: must be a number between 1.0 and 10.0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub struct AttachmentForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(rename = "type", default = "default_kind", deserialize_with = "deserialize_kind")]
    pub kind: Option<AttachmentKind>,
    pub film_id: i32,
}

fn default_kind() -> Option<AttachmentKind> {
    Some(AttachmentKind::default())
}

/// `""` and `null` are the blank choice; other strings must name a type.
fn deserialize_kind<'de, D>(deserializer: D) -> Result<Option<AttachmentKind>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) => AttachmentKind::from_choice(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl AttachmentForm {
    pub fn new(film_id: i32, title: impl Into<String>) -> Self {
        Self { title: title.into(), kind: default_kind(), film_id }
    }

    pub fn kind(mut self, kind: Option<AttachmentKind>) -> Self {
        self.kind = kind;
        self
    }
}
