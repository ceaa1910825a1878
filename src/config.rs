use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub media_root: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "sqlite://filmstore.db?mode=rwc".to_string());

        let media_root = var("MEDIA_ROOT")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("media"));

        if media_root.is_file() {
            anyhow::bail!("MEDIA_ROOT {} is a file, expected a directory", media_root.display());
        }

        Ok(Self { database_url, media_root })
    }
}
