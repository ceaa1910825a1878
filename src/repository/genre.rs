use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    entities::{film, film_genre, genre},
    error::{CatalogError, CatalogResult},
    models::GenreForm,
};

#[derive(Clone)]
pub struct GenreRepository {
    db: DatabaseConnection,
}

impl GenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, form: &GenreForm) -> CatalogResult<genre::Model> {
        form.validate()?;
        self.ensure_unique(&form.name, None).await?;

        let model = genre::ActiveModel { id: Default::default(), name: Set(form.name.clone()) };
        let genre = model
            .insert(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, "genre", &form.name))?;

        info!(genre_id = genre.id, name = %genre.name, "created genre");
        Ok(genre)
    }

    pub async fn find(&self, id: i32) -> CatalogResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> CatalogResult<genre::Model> {
        self.find(id).await?.ok_or(CatalogError::NotFound { entity: "genre", id })
    }

    pub async fn find_by_name(&self, name: &str) -> CatalogResult<Option<genre::Model>> {
        Ok(genre::Entity::find().filter(genre::Column::Name.eq(name)).one(&self.db).await?)
    }

    /// All genres by name.
    pub async fn list(&self) -> CatalogResult<Vec<genre::Model>> {
        Ok(genre::Entity::find().order_by_asc(genre::Column::Name).all(&self.db).await?)
    }

    pub async fn count(&self) -> CatalogResult<u64> {
        Ok(genre::Entity::find().count(&self.db).await?)
    }

    pub async fn update(&self, id: i32, form: &GenreForm) -> CatalogResult<genre::Model> {
        form.validate()?;
        let existing = self.get(id).await?;
        self.ensure_unique(&form.name, Some(id)).await?;

        let mut model: genre::ActiveModel = existing.into();
        model.name = Set(form.name.clone());
        let genre = model
            .update(&self.db)
            .await
            .map_err(|e| CatalogError::from_unique(e, "genre", &form.name))?;

        debug!(genre_id = id, name = %genre.name, "updated genre");
        Ok(genre)
    }

    /// Deletes the genre and its film links. Films are kept.
    pub async fn delete(&self, id: i32) -> CatalogResult<()> {
        let txn = self.db.begin().await?;

        let Some(genre) = genre::Entity::find_by_id(id).one(&txn).await? else {
            return Err(CatalogError::NotFound { entity: "genre", id });
        };

        let unlinked = film_genre::Entity::delete_many()
            .filter(film_genre::Column::GenreId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        genre.delete(&txn).await?;

        txn.commit().await?;

        info!(genre_id = id, unlinked_films = unlinked, "deleted genre");
        Ok(())
    }

    /// Films tagged with the genre, in catalog order.
    pub async fn films(&self, id: i32) -> CatalogResult<Vec<film::Model>> {
        let genre = self.get(id).await?;
        Ok(super::film::ordered(genre.find_related(film::Entity)).all(&self.db).await?)
    }

    async fn ensure_unique(&self, name: &str, except: Option<i32>) -> CatalogResult<()> {
        match self.find_by_name(name).await? {
            Some(other) if Some(other.id) != except => {
                Err(CatalogError::Duplicate { entity: "genre", value: name.to_string() })
            },
            _ => Ok(()),
        }
    }
}
