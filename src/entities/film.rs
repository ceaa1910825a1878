use std::fmt;

use jiff::civil::Date;
use sea_orm::entity::prelude::*;
use serde::Serialize;

pub const DEFAULT_RATE: f64 = 5.0;
pub const MIN_RATE: f64 = 1.0;
pub const MAX_RATE: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "film")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub plot: Option<String>,
    /// ISO `YYYY-MM-DD`, so lexical and chronological order agree.
    pub release_date: Option<String>,
    /// Minutes.
    pub runtime: Option<i32>,
    pub rate: Option<f64>,
    /// Blob store path of the uploaded poster.
    pub poster: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attachment::Entity")]
    Attachment,
    #[sea_orm(has_many = "super::film_genre::Entity")]
    FilmGenre,
}

impl Related<super::attachment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attachment.def()
    }
}

impl Related<super::film_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FilmGenre.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::film_genre::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::film_genre::Relation::Film.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn released_on(&self) -> Option<Date> {
        self.release_date.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn release_year(&self) -> Option<i16> {
        self.released_on().map(|d| d.year())
    }

    /// Address of the film's detail view.
    pub fn absolute_url(&self) -> String {
        format!("/film/{}/", self.id)
    }

    pub fn poster_path(&self, filename: &str) -> String {
        crate::paths::poster_path(self.id, filename)
    }
}

/// `"<title>, year: <year>, rate: <rate>"`. A missing release date or rate
/// renders as `unknown`.
impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, year: ", self.title)?;
        match self.release_year() {
            Some(year) => write!(f, "{year}")?,
            None => f.write_str("unknown")?,
        }
        f.write_str(", rate: ")?;
        match self.rate {
            Some(rate) => write!(f, "{rate:?}"),
            None => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film(release_date: Option<&str>, rate: Option<f64>) -> Model {
        Model {
            id: 3,
            title: "Solaris".to_string(),
            plot: None,
            release_date: release_date.map(str::to_string),
            runtime: Some(167),
            rate,
            poster: None,
        }
    }

    #[test]
    fn summary_includes_year_and_rate() {
        assert_eq!(
            film(Some("1972-03-20"), Some(8.5)).to_string(),
            "Solaris, year: 1972, rate: 8.5"
        );
        assert_eq!(
            film(Some("1972-03-20"), Some(DEFAULT_RATE)).to_string(),
            "Solaris, year: 1972, rate: 5.0"
        );
    }

    #[test]
    fn summary_without_release_date_reports_unknown_year() {
        assert_eq!(film(None, Some(7.0)).to_string(), "Solaris, year: unknown, rate: 7.0");
        assert_eq!(film(None, None).to_string(), "Solaris, year: unknown, rate: unknown");
    }

    #[test]
    fn absolute_url_uses_id() {
        assert_eq!(film(None, None).absolute_url(), "/film/3/");
    }

    #[test]
    fn poster_path_uses_film_id() {
        assert_eq!(film(None, None).poster_path("p.jpg"), "film/3/poster/p.jpg");
    }
}
