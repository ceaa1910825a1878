use migration::Migrator;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::error::CatalogResult;

// Foreign keys are not listed: sqlx turns them on for every SQLite
// connection it opens, which the cascading deletes rely on.
const SQLITE_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(
    options: impl Into<ConnectOptions>,
) -> CatalogResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    if db.get_database_backend() == DatabaseBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    info!("catalog schema up to date");

    Ok(db)
}
