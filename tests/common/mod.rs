#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use filmstore::{
    FilmRepository, GenreRepository,
    clock::Clock,
    db,
    entities::{film, genre},
    models::{FilmForm, GenreForm},
};
use jiff::{Timestamp, ToSpan, civil::Date};
use sea_orm::{ConnectOptions, DatabaseConnection};

/// Fresh in-memory catalog with the full schema applied.
pub async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    db::connect_and_migrate(options).await.unwrap()
}

pub fn date(s: &str) -> Date {
    s.parse().unwrap()
}

pub async fn film(db: &DatabaseConnection, title: &str, release: Option<&str>) -> film::Model {
    let mut form = FilmForm::new(title);
    form.release_date = release.map(date);
    FilmRepository::new(db.clone()).create(&form).await.unwrap()
}

pub async fn genre(db: &DatabaseConnection, name: &str) -> genre::Model {
    GenreRepository::new(db.clone()).create(&GenreForm::new(name)).await.unwrap()
}

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<Timestamp>);

impl ManualClock {
    pub fn at(ts: Timestamp) -> Arc<Self> {
        Arc::new(Self(Mutex::new(ts)))
    }

    pub fn advance_secs(&self, secs: i64) -> Timestamp {
        let mut now = self.0.lock().unwrap();
        *now = now.checked_add(secs.seconds()).unwrap();
        *now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.0.lock().unwrap()
    }
}
