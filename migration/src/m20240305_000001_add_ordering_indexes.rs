use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_film_release_date_title")
                    .table(Film::Table)
                    .col(Film::ReleaseDate)
                    .col(Film::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_film_genres_genre_id")
                    .table(FilmGenres::Table)
                    .col(FilmGenres::GenreId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attachment_film_id")
                    .table(Attachment::Table)
                    .col(Attachment::FilmId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attachment_last_update_type")
                    .table(Attachment::Table)
                    .col(Attachment::LastUpdate)
                    .col(Attachment::Type)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_attachment_last_update_type")
                    .table(Attachment::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_attachment_film_id").table(Attachment::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_film_genres_genre_id").table(FilmGenres::Table).to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop().name("idx_film_release_date_title").table(Film::Table).to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Film {
    Table,
    ReleaseDate,
    Title,
}

#[derive(DeriveIden)]
enum FilmGenres {
    Table,
    GenreId,
}

#[derive(DeriveIden)]
enum Attachment {
    Table,
    FilmId,
    LastUpdate,
    Type,
}
