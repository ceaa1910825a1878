use sea_orm::{DbErr, SqlErr};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} already exists: {value}")]
    Duplicate { entity: &'static str, value: String },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{entity} has no identifier yet, save it first")]
    MissingId { entity: &'static str },

    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Maps a unique-constraint failure to `Duplicate`; any other database
    /// error is kept as-is.
    pub(crate) fn from_unique(err: DbErr, entity: &'static str, value: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Self::Duplicate { entity, value: value.to_string() }
            },
            _ => Self::Db(err),
        }
    }
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
