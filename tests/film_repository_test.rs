mod common;

use common::date;
use filmstore::{
    AttachmentRepository, CatalogError, FilmRepository,
    entities::{film, film_genre},
    models::{AttachmentForm, FilmForm},
};
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::test]
async fn test_create_applies_default_rate() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db);

    let film = repo.create(&FilmForm::new("Stalker")).await.unwrap();

    assert_eq!(film.rate, Some(5.0));
    assert_eq!(film.poster, None);
    assert_eq!(repo.get(film.id).await.unwrap(), film);
}

#[tokio::test]
async fn test_rate_outside_range_is_rejected() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db);

    for rate in [0.0, 0.999, 10.001, 11.0] {
        let err = repo.create(&FilmForm::new("Heat").rated(rate)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)), "{rate}");
    }
    assert_eq!(repo.count().await.unwrap(), 0);

    for rate in [1.0, 7.3, 10.0] {
        let film = repo.create(&FilmForm::new("Heat").rated(rate)).await.unwrap();
        assert_eq!(film.rate, Some(rate));
    }
}

#[tokio::test]
async fn test_update_validates_and_keeps_poster() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db);
    let film = repo.create(&FilmForm::new("Ran")).await.unwrap();

    let err = repo.update(film.id, &FilmForm::new("Ran").rated(12.0)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)));

    let mut form = FilmForm::new("Ran").released(date("1985-06-01")).rated(8.2);
    form.runtime = Some(162);
    form.plot = Some("An aging warlord divides his kingdom.".to_string());
    let updated = repo.update(film.id, &form).await.unwrap();

    assert_eq!(updated.release_date.as_deref(), Some("1985-06-01"));
    assert_eq!(updated.runtime, Some(162));
    assert_eq!(updated.to_string(), "Ran, year: 1985, rate: 8.2");
    assert_eq!(updated.absolute_url(), format!("/film/{}/", film.id));
}

#[tokio::test]
async fn test_list_orders_by_release_date_then_title() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db.clone());

    common::film(&db, "B", Some("2020-01-01")).await;
    common::film(&db, "A", Some("2021-01-01")).await;
    common::film(&db, "D", Some("2019-06-01")).await;
    common::film(&db, "C", Some("2019-06-01")).await;
    common::film(&db, "Undated", None).await;

    let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|f| f.title).collect();
    assert_eq!(titles, ["A", "B", "C", "D", "Undated"]);
}

#[tokio::test]
async fn test_delete_cascades_to_attachments() {
    let db = common::test_db().await;
    let films = FilmRepository::new(db.clone());
    let attachments = AttachmentRepository::new(db.clone());

    let doomed = common::film(&db, "Doomed", Some("2001-01-01")).await;
    let kept = common::film(&db, "Kept", Some("2002-01-01")).await;
    for title in ["Trailer", "Still", "Script"] {
        attachments.create(&AttachmentForm::new(doomed.id, title)).await.unwrap();
    }
    let survivor = attachments.create(&AttachmentForm::new(kept.id, "Poster art")).await.unwrap();

    let removed = films.delete(doomed.id).await.unwrap();

    assert_eq!(removed, 3);
    assert!(films.find(doomed.id).await.unwrap().is_none());
    assert_eq!(attachments.list().await.unwrap(), vec![survivor]);
    assert!(matches!(
        attachments.list_for_film(doomed.id).await.unwrap_err(),
        CatalogError::NotFound { entity: "film", .. }
    ));
}

#[tokio::test]
async fn test_delete_missing_film_is_not_found() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db);

    assert!(matches!(
        repo.delete(9).await.unwrap_err(),
        CatalogError::NotFound { entity: "film", id: 9 }
    ));
}

#[tokio::test]
async fn test_set_genres_replaces_links() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db.clone());

    let film = common::film(&db, "Alien", Some("1979-05-25")).await;
    let scifi = common::genre(&db, "sci-fi").await;
    let horror = common::genre(&db, "horror").await;
    let comedy = common::genre(&db, "comedy").await;

    repo.set_genres(film.id, &[scifi.id, horror.id, scifi.id]).await.unwrap();
    assert_eq!(repo.genres(film.id).await.unwrap(), vec![horror.clone(), scifi.clone()]);

    repo.set_genres(film.id, &[comedy.id]).await.unwrap();
    assert_eq!(repo.genres(film.id).await.unwrap(), vec![comedy.clone()]);

    repo.set_genres(film.id, &[]).await.unwrap();
    assert!(repo.genres(film.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_genres_with_unknown_genre_changes_nothing() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db.clone());

    let film = common::film(&db, "Alien", None).await;
    let scifi = common::genre(&db, "sci-fi").await;
    repo.add_genre(film.id, scifi.id).await.unwrap();

    let err = repo.set_genres(film.id, &[404]).await.unwrap_err();

    assert!(matches!(err, CatalogError::NotFound { entity: "genre", id: 404 }));
    assert_eq!(repo.genres(film.id).await.unwrap(), vec![scifi]);
}

#[tokio::test]
async fn test_add_and_remove_genre() {
    let db = common::test_db().await;
    let repo = FilmRepository::new(db.clone());

    let film = common::film(&db, "Aliens", Some("1986-07-18")).await;
    let action = common::genre(&db, "action").await;

    repo.add_genre(film.id, action.id).await.unwrap();
    repo.add_genre(film.id, action.id).await.unwrap();
    assert_eq!(repo.genres(film.id).await.unwrap(), vec![action.clone()]);

    assert!(repo.remove_genre(film.id, action.id).await.unwrap());
    assert!(!repo.remove_genre(film.id, action.id).await.unwrap());
    assert!(repo.genres(film.id).await.unwrap().is_empty());

    assert!(matches!(
        repo.add_genre(film.id, 77).await.unwrap_err(),
        CatalogError::NotFound { entity: "genre", .. }
    ));
}

#[tokio::test]
async fn test_schema_cascades_when_film_row_is_deleted_directly() {
    let db = common::test_db().await;
    let attachments = AttachmentRepository::new(db.clone());

    let film = common::film(&db, "Vertigo", Some("1958-05-09")).await;
    let genre = common::genre(&db, "thriller").await;
    FilmRepository::new(db.clone()).add_genre(film.id, genre.id).await.unwrap();
    attachments.create(&AttachmentForm::new(film.id, "Trailer")).await.unwrap();

    film::Entity::delete_by_id(film.id).exec(&db).await.unwrap();

    assert_eq!(attachments.count().await.unwrap(), 0);
    assert_eq!(film_genre::Entity::find().count(&db).await.unwrap(), 0);
}
