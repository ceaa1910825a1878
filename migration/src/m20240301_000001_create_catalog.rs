use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genre::Table)
                    .if_not_exists()
                    .col(pk_auto(Genre::Id))
                    .col(string_len_uniq(Genre::Name, 50))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Film::Table)
                    .if_not_exists()
                    .col(pk_auto(Film::Id))
                    .col(string_len(Film::Title, 200))
                    .col(text_null(Film::Plot))
                    .col(string_len_null(Film::ReleaseDate, 10))
                    .col(integer_null(Film::Runtime))
                    .col(double_null(Film::Rate).default(5.0))
                    .col(string_null(Film::Poster))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FilmGenres::Table)
                    .if_not_exists()
                    .col(integer(FilmGenres::FilmId))
                    .col(integer(FilmGenres::GenreId))
                    .primary_key(Index::create().col(FilmGenres::FilmId).col(FilmGenres::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_genres_film")
                            .from(FilmGenres::Table, FilmGenres::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_film_genres_genre")
                            .from(FilmGenres::Table, FilmGenres::GenreId)
                            .to(Genre::Table, Genre::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Attachment::Table)
                    .if_not_exists()
                    .col(pk_auto(Attachment::Id))
                    .col(string_len(Attachment::Title, 200))
                    .col(big_integer(Attachment::LastUpdate))
                    .col(string_null(Attachment::File))
                    .col(string_len_null(Attachment::Type, 5).default("image"))
                    .col(integer(Attachment::FilmId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attachment_film")
                            .from(Attachment::Table, Attachment::FilmId)
                            .to(Film::Table, Film::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Attachment::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(FilmGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Film::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genre::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genre {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Film {
    Table,
    Id,
    Title,
    Plot,
    ReleaseDate,
    Runtime,
    Rate,
    Poster,
}

#[derive(DeriveIden)]
enum FilmGenres {
    Table,
    FilmId,
    GenreId,
}

#[derive(DeriveIden)]
enum Attachment {
    Table,
    Id,
    Title,
    LastUpdate,
    File,
    Type,
    FilmId,
}
