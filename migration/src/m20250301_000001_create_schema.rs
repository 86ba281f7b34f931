use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_uniq(Users::Email))
                    .col(string_uniq(Users::Username))
                    .col(string(Users::HashedPassword))
                    .col(boolean(Users::IsActive).default(true))
                    .col(json(Users::Preferences).default("{}"))
                    .col(insert_timestamp(Users::CreatedAt))
                    .col(timestamp_with_time_zone_null(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_uniq(Genres::Name))
                    .col(text_null(Genres::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .col(text_null(Movies::Description))
                    .col(date_time_null(Movies::ReleaseDate))
                    .col(integer_null(Movies::Duration))
                    .col(double(Movies::AverageRating).default(0.0))
                    .col(integer(Movies::RatingCount).default(0))
                    .col(string_null(Movies::ImageUrl))
                    .col(string_null(Movies::TrailerUrl))
                    .col(boolean(Movies::IsHiddenGem).default(false))
                    .col(insert_timestamp(Movies::CreatedAt))
                    .col(timestamp_with_time_zone_null(Movies::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovieGenres::Table)
                    .if_not_exists()
                    .col(integer(MovieGenres::MovieId))
                    .col(integer(MovieGenres::GenreId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_movie_id")
                            .from(MovieGenres::Table, MovieGenres::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_genres_genre_id")
                            .from(MovieGenres::Table, MovieGenres::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ratings::Table)
                    .if_not_exists()
                    .col(pk_auto(Ratings::Id))
                    .col(integer(Ratings::UserId))
                    .col(integer(Ratings::MovieId))
                    .col(double(Ratings::Rating))
                    .col(text_null(Ratings::Review))
                    .col(insert_timestamp(Ratings::CreatedAt))
                    .col(timestamp_with_time_zone_null(Ratings::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_user_id")
                            .from(Ratings::Table, Ratings::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ratings_movie_id")
                            .from(Ratings::Table, Ratings::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WatchHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(WatchHistory::Id))
                    .col(integer(WatchHistory::UserId))
                    .col(integer(WatchHistory::MovieId))
                    .col(insert_timestamp(WatchHistory::WatchedAt))
                    .col(integer_null(WatchHistory::WatchDuration))
                    .col(boolean(WatchHistory::Completed).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watch_history_user_id")
                            .from(WatchHistory::Table, WatchHistory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watch_history_movie_id")
                            .from(WatchHistory::Table, WatchHistory::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user with donations on record cannot be deleted.
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(pk_auto(Donations::Id))
                    .col(integer(Donations::UserId))
                    .col(double(Donations::Amount))
                    .col(string(Donations::Currency).default("USD"))
                    .col(string_null(Donations::TransactionId).unique_key())
                    .col(string_null(Donations::Status))
                    .col(insert_timestamp(Donations::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_donations_user_id")
                            .from(Donations::Table, Donations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(pk_auto(Feedback::Id))
                    .col(integer(Feedback::UserId))
                    .col(text(Feedback::Content))
                    .col(string_null(Feedback::Category))
                    .col(string(Feedback::Status).default("pending"))
                    .col(insert_timestamp(Feedback::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedback_user_id")
                            .from(Feedback::Table, Feedback::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        index_foreign_key(manager, "idx_ratings_user_id", Ratings::Table, Ratings::UserId).await?;
        index_foreign_key(manager, "idx_ratings_movie_id", Ratings::Table, Ratings::MovieId).await?;
        index_foreign_key(
            manager,
            "idx_watch_history_user_id",
            WatchHistory::Table,
            WatchHistory::UserId,
        )
        .await?;
        index_foreign_key(
            manager,
            "idx_watch_history_movie_id",
            WatchHistory::Table,
            WatchHistory::MovieId,
        )
        .await?;
        index_foreign_key(manager, "idx_donations_user_id", Donations::Table, Donations::UserId)
            .await?;
        index_foreign_key(manager, "idx_feedback_user_id", Feedback::Table, Feedback::UserId)
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Feedback::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Donations::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(WatchHistory::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Ratings::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(MovieGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await?;
        Ok(())
    }
}

fn insert_timestamp<T>(col: T) -> ColumnDef
where
    T: Iden + 'static,
{
    timestamp_with_time_zone(col).default(Expr::current_timestamp()).take()
}

async fn index_foreign_key<T>(
    manager: &SchemaManager<'_>,
    name: &str,
    table: T,
    col: T,
) -> Result<(), DbErr>
where
    T: Iden + 'static,
{
    manager.create_index(Index::create().name(name).table(table).col(col).to_owned()).await
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Email,
    Username,
    HashedPassword,
    IsActive,
    Preferences,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Description,
    ReleaseDate,
    Duration,
    AverageRating,
    RatingCount,
    ImageUrl,
    TrailerUrl,
    IsHiddenGem,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MovieGenres {
    Table,
    MovieId,
    GenreId,
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    Id,
    UserId,
    MovieId,
    Rating,
    Review,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WatchHistory {
    Table,
    Id,
    UserId,
    MovieId,
    WatchedAt,
    WatchDuration,
    Completed,
}

#[derive(DeriveIden)]
enum Donations {
    Table,
    Id,
    UserId,
    Amount,
    Currency,
    TransactionId,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Feedback {
    Table,
    Id,
    UserId,
    Content,
    Category,
    Status,
    CreatedAt,
}
