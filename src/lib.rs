//! Persistence layer of a small film catalog: genres, films and the files
//! attached to them.

pub mod clock;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod paths;
pub mod repository;
pub mod storage;

pub use error::{CatalogError, CatalogResult};
pub use repository::{AttachmentRepository, FilmRepository, GenreRepository};
