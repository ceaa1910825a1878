use anyhow::Context;
use filmstore::{
    AttachmentRepository, FilmRepository, GenreRepository, config::Config, db,
    storage::LocalBlobStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,filmstore=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(config.database_url.as_str())
        .await
        .with_context(|| format!("opening {}", config.database_url))?;

    let store = LocalBlobStore::new(&config.media_root);
    tokio::fs::create_dir_all(store.root())
        .await
        .with_context(|| format!("creating {}", store.root().display()))?;

    let genres = GenreRepository::new(db.clone()).count().await?;
    let films = FilmRepository::new(db.clone()).count().await?;
    let attachments = AttachmentRepository::new(db).count().await?;

    tracing::info!(
        genres,
        films,
        attachments,
        media_root = %store.root().display(),
        "catalog ready"
    );

    Ok(())
}
