use std::collections::BTreeSet;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::{
    entities::{attachment, film, film_genre, genre},
    error::{CatalogError, CatalogResult},
    models::FilmForm,
    paths,
    storage::{self, BlobStore},
};

#[derive(Clone)]
pub struct FilmRepository {
    db: DatabaseConnection,
}

impl FilmRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, form: &FilmForm) -> CatalogResult<film::Model> {
        form.check()?;

        let model = film::ActiveModel {
            id: Default::default(),
            poster: Set(None),
            ..active_fields(form)
        };
        let film = model.insert(&self.db).await?;

        info!(film_id = film.id, title = %film.title, "created film");
        Ok(film)
    }

    pub async fn find(&self, id: i32) -> CatalogResult<Option<film::Model>> {
        Ok(film::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> CatalogResult<film::Model> {
        self.find(id).await?.ok_or(CatalogError::NotFound { entity: "film", id })
    }

    /// Newest release first, then by title. Films without a release date come last.
    pub async fn list(&self) -> CatalogResult<Vec<film::Model>> {
        Ok(ordered(film::Entity::find()).all(&self.db).await?)
    }

    pub async fn count(&self) -> CatalogResult<u64> {
        Ok(film::Entity::find().count(&self.db).await?)
    }

    /// Replaces the editable fields. The poster and genres are left alone.
    pub async fn update(&self, id: i32, form: &FilmForm) -> CatalogResult<film::Model> {
        form.check()?;
        let existing = self.get(id).await?;

        let fields = active_fields(form);
        let mut model: film::ActiveModel = existing.into();
        model.title = fields.title;
        model.plot = fields.plot;
        model.release_date = fields.release_date;
        model.runtime = fields.runtime;
        model.rate = fields.rate;
        let film = model.update(&self.db).await?;

        debug!(film_id = id, "updated film");
        Ok(film)
    }

    /// Deletes the film together with its attachments and genre links in one
    /// transaction. Returns the number of attachments removed.
    pub async fn delete(&self, id: i32) -> CatalogResult<u64> {
        let txn = self.db.begin().await?;

        let Some(film) = film::Entity::find_by_id(id).one(&txn).await? else {
            return Err(CatalogError::NotFound { entity: "film", id });
        };

        let attachments = attachment::Entity::delete_many()
            .filter(attachment::Column::FilmId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        film_genre::Entity::delete_many()
            .filter(film_genre::Column::FilmId.eq(id))
            .exec(&txn)
            .await?;
        film.delete(&txn).await?;

        txn.commit().await?;

        info!(film_id = id, attachments, "deleted film");
        Ok(attachments)
    }

    /// Genres of the film, by name.
    pub async fn genres(&self, id: i32) -> CatalogResult<Vec<genre::Model>> {
        let film = self.get(id).await?;
        Ok(film.find_related(genre::Entity).order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    /// Replaces the film's genres with `genre_ids`. Duplicate ids are ignored.
    pub async fn set_genres(&self, id: i32, genre_ids: &[i32]) -> CatalogResult<()> {
        let genre_ids: BTreeSet<i32> = genre_ids.iter().copied().collect();
        let txn = self.db.begin().await?;

        ensure_film(&txn, id).await?;
        for &genre_id in &genre_ids {
            ensure_genre(&txn, genre_id).await?;
        }

        film_genre::Entity::delete_many()
            .filter(film_genre::Column::FilmId.eq(id))
            .exec(&txn)
            .await?;
        for &genre_id in &genre_ids {
            link(id, genre_id).insert(&txn).await?;
        }

        txn.commit().await?;

        debug!(film_id = id, genres = genre_ids.len(), "set film genres");
        Ok(())
    }

    /// Links the genre to the film. Linking twice is a no-op.
    pub async fn add_genre(&self, id: i32, genre_id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        ensure_film(&txn, id).await?;
        ensure_genre(&txn, genre_id).await?;
        if film_genre::Entity::find_by_id((id, genre_id)).one(&txn).await?.is_none() {
            link(id, genre_id).insert(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Returns whether a link was removed.
    pub async fn remove_genre(&self, id: i32, genre_id: i32) -> CatalogResult<bool> {
        let removed = film_genre::Entity::delete_by_id((id, genre_id)).exec(&self.db).await?;
        Ok(removed.rows_affected > 0)
    }

    /// Writes the poster to the store under `film/<id>/poster/<filename>`
    /// and records its path on the film. A replaced poster is removed from
    /// the store.
    pub async fn upload_poster(
        &self,
        store: &dyn BlobStore,
        id: i32,
        filename: &str,
        bytes: &[u8],
    ) -> CatalogResult<film::Model> {
        paths::check_filename(filename)?;
        let existing = self.get(id).await?;
        let previous = existing.poster.clone();

        let mut model: film::ActiveModel = existing.into();
        let path = paths::poster_path_for(&model, filename)?;
        store.put(&path, bytes).await?;

        model.poster = Set(Some(path.clone()));
        let film = match model.update(&self.db).await {
            Ok(film) => film,
            Err(err) => {
                if previous.as_deref() != Some(path.as_str()) {
                    storage::discard(store, &path).await;
                }
                return Err(err.into());
            },
        };
        if let Some(old) = previous.filter(|old| *old != path) {
            storage::discard(store, &old).await;
        }

        info!(film_id = id, poster = ?film.poster, "uploaded poster");
        Ok(film)
    }
}

pub(super) fn ordered(select: Select<film::Entity>) -> Select<film::Entity> {
    select.order_by_desc(film::Column::ReleaseDate).order_by_asc(film::Column::Title)
}

fn active_fields(form: &FilmForm) -> film::ActiveModel {
    film::ActiveModel {
        title: Set(form.title.clone()),
        plot: Set(form.plot.clone()),
        release_date: Set(form.release_date.map(|d| d.to_string())),
        runtime: Set(form.runtime),
        rate: Set(form.rate),
        ..Default::default()
    }
}

fn link(film_id: i32, genre_id: i32) -> film_genre::ActiveModel {
    film_genre::ActiveModel { film_id: Set(film_id), genre_id: Set(genre_id) }
}

async fn ensure_film<C: ConnectionTrait>(db: &C, id: i32) -> CatalogResult<()> {
    match film::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(CatalogError::NotFound { entity: "film", id }),
    }
}

async fn ensure_genre<C: ConnectionTrait>(db: &C, id: i32) -> CatalogResult<()> {
    match genre::Entity::find_by_id(id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(CatalogError::NotFound { entity: "genre", id }),
    }
}
