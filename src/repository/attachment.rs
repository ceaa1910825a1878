use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, Set,
};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    clock::{Clock, SystemClock},
    entities::{attachment, film},
    error::{CatalogError, CatalogResult},
    models::AttachmentForm,
    paths,
    storage::{self, BlobStore},
};

/// Attachments of films. `last_update` is stamped from the repository's clock
/// on every write; callers never set it.
#[derive(Clone)]
pub struct AttachmentRepository {
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
}

impl AttachmentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    pub async fn create(&self, form: &AttachmentForm) -> CatalogResult<attachment::Model> {
        form.validate()?;
        self.ensure_film(form.film_id).await?;

        let model = attachment::ActiveModel {
            id: Default::default(),
            title: Set(form.title.clone()),
            last_update: Set(self.stamp()),
            file: Set(None),
            kind: Set(form.kind),
            film_id: Set(form.film_id),
        };
        let attachment = model.insert(&self.db).await?;

        info!(
            attachment_id = attachment.id,
            film_id = attachment.film_id,
            kind = ?attachment.kind,
            "created attachment"
        );
        Ok(attachment)
    }

    pub async fn find(&self, id: i32) -> CatalogResult<Option<attachment::Model>> {
        Ok(attachment::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> CatalogResult<attachment::Model> {
        self.find(id).await?.ok_or(CatalogError::NotFound { entity: "attachment", id })
    }

    /// Most recently updated first, then by type.
    pub async fn list(&self) -> CatalogResult<Vec<attachment::Model>> {
        Ok(ordered(attachment::Entity::find()).all(&self.db).await?)
    }

    pub async fn list_for_film(&self, film_id: i32) -> CatalogResult<Vec<attachment::Model>> {
        self.ensure_film(film_id).await?;
        Ok(ordered(attachment::Entity::find().filter(attachment::Column::FilmId.eq(film_id)))
            .all(&self.db)
            .await?)
    }

    pub async fn count(&self) -> CatalogResult<u64> {
        Ok(attachment::Entity::find().count(&self.db).await?)
    }

    /// Replaces title, type and film. The stored file path is kept, so an
    /// attachment with a file stays with its film.
    pub async fn update(
        &self,
        id: i32,
        form: &AttachmentForm,
    ) -> CatalogResult<attachment::Model> {
        form.validate()?;
        let existing = self.get(id).await?;
        if existing.film_id != form.film_id {
            // the stored path lives under the current film's directory
            if existing.file.is_some() {
                return Err(CatalogError::validation(
                    "film: an attachment with an uploaded file cannot move to another film",
                ));
            }
            self.ensure_film(form.film_id).await?;
        }

        let mut model: attachment::ActiveModel = existing.into();
        model.title = Set(form.title.clone());
        model.kind = Set(form.kind);
        model.film_id = Set(form.film_id);
        model.last_update = Set(self.stamp());
        let attachment = model.update(&self.db).await?;

        debug!(attachment_id = id, last_update = attachment.last_update, "updated attachment");
        Ok(attachment)
    }

    pub async fn delete(&self, id: i32) -> CatalogResult<()> {
        let attachment = self.get(id).await?;
        attachment.delete(&self.db).await?;

        info!(attachment_id = id, "deleted attachment");
        Ok(())
    }

    /// Writes the file to the store under
    /// `film/<film_id>/attachments/<filename>` and records its path. A
    /// replaced file is removed from the store.
    pub async fn upload_file(
        &self,
        store: &dyn BlobStore,
        id: i32,
        filename: &str,
        bytes: &[u8],
    ) -> CatalogResult<attachment::Model> {
        paths::check_filename(filename)?;
        let existing = self.get(id).await?;
        let previous = existing.file.clone();

        let mut model: attachment::ActiveModel = existing.into();
        let path = paths::attachment_path_for(&model, filename)?;
        store.put(&path, bytes).await?;

        model.file = Set(Some(path.clone()));
        model.last_update = Set(self.stamp());
        let attachment = match model.update(&self.db).await {
            Ok(attachment) => attachment,
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

        info!(attachment_id = id, file = ?attachment.file, "uploaded attachment file");
        Ok(attachment)
    }

    fn stamp(&self) -> i64 {
        self.clock.now().as_microsecond()
    }

    async fn ensure_film(&self, film_id: i32) -> CatalogResult<()> {
        match film::Entity::find_by_id(film_id).one(&self.db).await? {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound { entity: "film", id: film_id }),
        }
    }
}

fn ordered(select: Select<attachment::Entity>) -> Select<attachment::Entity> {
    select.order_by_desc(attachment::Column::LastUpdate).order_by_asc(attachment::Column::Kind)
}
