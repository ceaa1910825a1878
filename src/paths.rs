//! Upload locations for posters and attachments.
//!
//! Both layouts are keyed by the film id, so they can only be computed once
//! the film has been saved.

use sea_orm::ActiveValue;

use crate::{
    entities::{attachment, film},
    error::{CatalogError, CatalogResult},
};

/// `film/<film_id>/attachments/<filename>`
pub fn attachment_path(film_id: i32, filename: &str) -> String {
    format!("film/{film_id}/attachments/{filename}")
}

/// `film/<film_id>/poster/<filename>`
pub fn poster_path(film_id: i32, filename: &str) -> String {
    format!("film/{film_id}/poster/{filename}")
}

pub fn poster_path_for(film: &film::ActiveModel, filename: &str) -> CatalogResult<String> {
    let id = assigned(&film.id, "film")?;
    Ok(poster_path(id, filename))
}

pub fn attachment_path_for(
    attachment: &attachment::ActiveModel,
    filename: &str,
) -> CatalogResult<String> {
    let film_id = assigned(&attachment.film_id, "film")?;
    Ok(attachment_path(film_id, filename))
}

/// Rejects names that would escape the record's directory.
pub fn check_filename(filename: &str) -> CatalogResult<()> {
    if filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0'])
    {
        return Err(CatalogError::validation(format!("invalid upload filename {filename:?}")));
    }
    Ok(())
}

fn assigned(id: &ActiveValue<i32>, entity: &'static str) -> CatalogResult<i32> {
    match id {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => Ok(*id),
        ActiveValue::NotSet => Err(CatalogError::MissingId { entity }),
    }
}
