use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, Set,
};
use tracing::{debug, warn};

use crate::{
    entities::{donation, feedback, genre, movie, movie_genre, rating, user, watch_history},
    error::{StoreError, StoreResult},
    models::{
        NewDonation, NewFeedback, NewGenre, NewMovie, NewRating, NewUser, NewWatch, TableCounts,
    },
};

/// Write and lookup entry points over the schema. Constraint checks are left
/// to the database; their failures come back as [`StoreError`] variants.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn create_user(&self, new: NewUser) -> StoreResult<user::Model> {
        let mut model = user::ActiveModel {
            email: Set(new.email),
            username: Set(new.username),
            hashed_password: Set(new.hashed_password),
            ..user::ActiveModel::new()
        };
        if let Some(preferences) = new.preferences {
            model.preferences = Set(preferences);
        }

        let user = checked("create_user", model.insert(&self.db).await)?;
        debug!(user_id = user.id, username = %user.username, "created user");
        Ok(user)
    }

    pub async fn create_genre(&self, new: NewGenre) -> StoreResult<genre::Model> {
        let model = genre::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            ..genre::ActiveModel::new()
        };

        let genre = checked("create_genre", model.insert(&self.db).await)?;
        debug!(genre_id = genre.id, name = %genre.name, "created genre");
        Ok(genre)
    }

    pub async fn create_movie(&self, new: NewMovie) -> StoreResult<movie::Model> {
        let model = movie::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            release_date: Set(new.release_date),
            duration: Set(new.duration),
            image_url: Set(new.image_url),
            trailer_url: Set(new.trailer_url),
            is_hidden_gem: Set(new.is_hidden_gem),
            ..movie::ActiveModel::new()
        };

        let movie = checked("create_movie", model.insert(&self.db).await)?;
        debug!(movie_id = movie.id, title = %movie.title, "created movie");
        Ok(movie)
    }

    pub async fn tag_movie(&self, movie_id: i32, genre_id: i32) -> StoreResult<movie_genre::Model> {
        let model =
            movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre_id) };

        checked(
            "tag_movie",
            movie_genre::Entity::insert(model).exec_without_returning(&self.db).await,
        )?;
        debug!(movie_id, genre_id, "tagged movie");
        Ok(movie_genre::Model { movie_id, genre_id })
    }

    /// Returns whether the tag existed.
    pub async fn untag_movie(&self, movie_id: i32, genre_id: i32) -> StoreResult<bool> {
        let res = checked(
            "untag_movie",
            movie_genre::Entity::delete_by_id((movie_id, genre_id)).exec(&self.db).await,
        )?;
        Ok(res.rows_affected > 0)
    }

    pub async fn create_rating(&self, new: NewRating) -> StoreResult<rating::Model> {
        let model = rating::ActiveModel {
            user_id: Set(new.user_id),
            movie_id: Set(new.movie_id),
            rating: Set(new.rating),
            review: Set(new.review),
            ..rating::ActiveModel::new()
        };

        let rating = checked("create_rating", model.insert(&self.db).await)?;
        debug!(
            rating_id = rating.id,
            user_id = rating.user_id,
            movie_id = rating.movie_id,
            "created rating"
        );
        Ok(rating)
    }

    pub async fn record_watch(&self, new: NewWatch) -> StoreResult<watch_history::Model> {
        let model = watch_history::ActiveModel {
            user_id: Set(new.user_id),
            movie_id: Set(new.movie_id),
            watch_duration: Set(new.watch_duration),
            completed: Set(new.completed),
            ..watch_history::ActiveModel::new()
        };

        let watch = checked("record_watch", model.insert(&self.db).await)?;
        debug!(
            watch_id = watch.id,
            user_id = watch.user_id,
            movie_id = watch.movie_id,
            "recorded watch"
        );
        Ok(watch)
    }

    pub async fn create_donation(&self, new: NewDonation) -> StoreResult<donation::Model> {
        let mut model = donation::ActiveModel {
            user_id: Set(new.user_id),
            amount: Set(new.amount),
            transaction_id: Set(new.transaction_id),
            status: Set(new.status),
            ..donation::ActiveModel::new()
        };
        if let Some(currency) = new.currency {
            model.currency = Set(currency);
        }

        let donation = checked("create_donation", model.insert(&self.db).await)?;
        debug!(donation_id = donation.id, user_id = donation.user_id, "created donation");
        Ok(donation)
    }

    pub async fn submit_feedback(&self, new: NewFeedback) -> StoreResult<feedback::Model> {
        let model = feedback::ActiveModel {
            user_id: Set(new.user_id),
            content: Set(new.content),
            category: Set(new.category),
            ..feedback::ActiveModel::new()
        };

        let feedback = checked("submit_feedback", model.insert(&self.db).await)?;
        debug!(feedback_id = feedback.id, user_id = feedback.user_id, "submitted feedback");
        Ok(feedback)
    }

    pub async fn update_user(&self, model: user::ActiveModel) -> StoreResult<user::Model> {
        let id = active_id(&model.id);
        updated("update_user", "user", id, model.update(&self.db).await)
    }

    pub async fn update_movie(&self, model: movie::ActiveModel) -> StoreResult<movie::Model> {
        let id = active_id(&model.id);
        updated("update_movie", "movie", id, model.update(&self.db).await)
    }

    pub async fn update_rating(&self, model: rating::ActiveModel) -> StoreResult<rating::Model> {
        let id = active_id(&model.id);
        updated("update_rating", "rating", id, model.update(&self.db).await)
    }

    /// Ratings, watch history and feedback go with the user. Donations do
    /// not; a user who still has any is refused with a foreign key violation.
    pub async fn delete_user(&self, id: i32) -> StoreResult<()> {
        let res = checked("delete_user", user::Entity::delete_by_id(id).exec(&self.db).await)?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { entity: "user", id });
        }
        debug!(user_id = id, "deleted user");
        Ok(())
    }

    /// Ratings, watch history and genre tags go with the movie.
    pub async fn delete_movie(&self, id: i32) -> StoreResult<()> {
        let res = checked("delete_movie", movie::Entity::delete_by_id(id).exec(&self.db).await)?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { entity: "movie", id });
        }
        debug!(movie_id = id, "deleted movie");
        Ok(())
    }

    pub async fn delete_genre(&self, id: i32) -> StoreResult<()> {
        let res = checked("delete_genre", genre::Entity::delete_by_id(id).exec(&self.db).await)?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound { entity: "genre", id });
        }
        debug!(genre_id = id, "deleted genre");
        Ok(())
    }

    pub async fn user(&self, id: i32) -> StoreResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound { entity: "user", id })
    }

    pub async fn movie(&self, id: i32) -> StoreResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound { entity: "movie", id })
    }

    pub async fn genre(&self, id: i32) -> StoreResult<genre::Model> {
        genre::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound { entity: "genre", id })
    }

    pub async fn counts(&self) -> StoreResult<TableCounts> {
        Ok(TableCounts {
            users: user::Entity::find().count(&self.db).await?,
            genres: genre::Entity::find().count(&self.db).await?,
            movies: movie::Entity::find().count(&self.db).await?,
            movie_genres: movie_genre::Entity::find().count(&self.db).await?,
            ratings: rating::Entity::find().count(&self.db).await?,
            watch_history: watch_history::Entity::find().count(&self.db).await?,
            donations: donation::Entity::find().count(&self.db).await?,
            feedback: feedback::Entity::find().count(&self.db).await?,
        })
    }
}

fn checked<T>(op: &'static str, result: Result<T, DbErr>) -> StoreResult<T> {
    result.map_err(|err| {
        let err = StoreError::from(err);
        if err.is_constraint_violation() {
            warn!(op, error = %err, "write rejected by constraint");
        }
        err
    })
}

// An update that matched no row means the row is gone.
fn updated<T>(
    op: &'static str,
    entity: &'static str,
    id: i32,
    result: Result<T, DbErr>,
) -> StoreResult<T> {
    match result {
        Err(DbErr::RecordNotUpdated) => Err(StoreError::NotFound { entity, id }),
        other => checked(op, other),
    }
}

fn active_id(value: &ActiveValue<i32>) -> i32 {
    match value {
        ActiveValue::Set(id) | ActiveValue::Unchanged(id) => *id,
        ActiveValue::NotSet => 0,
    }
}
