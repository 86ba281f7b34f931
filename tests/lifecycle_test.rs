//! Defaults, timestamps and deletion behaviour.

mod common;

use cinerate::{
    StoreError,
    entities::{donation, sea_orm_active_enums::FeedbackStatus},
    models::{NewDonation, NewFeedback, NewGenre, NewMovie, NewRating, NewUser, NewWatch},
};
use common::{add_movie, add_user, setup_store};
use sea_orm::{EntityTrait, IntoActiveModel, Set};
use serde_json::json;
use time::{Date, Month};

#[tokio::test]
async fn inserts_fill_defaults() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;
    let movie = add_movie(&store, "M").await;

    assert!(user.is_active);
    assert_eq!(user.preferences, json!({}));
    assert!(user.updated_at.is_none());

    assert_eq!(movie.average_rating, 0.0);
    assert_eq!(movie.rating_count, 0);
    assert!(!movie.is_hidden_gem);
    assert!(movie.updated_at.is_none());

    let watch = store
        .record_watch(NewWatch {
            user_id: user.id,
            movie_id: movie.id,
            watch_duration: None,
            completed: false,
        })
        .await
        .unwrap();
    assert!(!watch.completed);
    assert!(watch.watched_at >= user.created_at);

    let donation = store
        .create_donation(NewDonation {
            user_id: user.id,
            amount: 5.0,
            currency: None,
            transaction_id: None,
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(donation.currency, "USD");
    assert!(donation.status.is_none());

    let feedback = store
        .submit_feedback(NewFeedback {
            user_id: user.id,
            content: "Nice".to_string(),
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(feedback.status, FeedbackStatus::Pending);
}

#[tokio::test]
async fn explicit_preferences_are_kept() {
    let store = setup_store().await;
    let mut new = NewUser::new("p@x.com", "p", "h");
    new.preferences = Some(json!({"favorite_genres": ["Drama"]}));

    let user = store.create_user(new).await.unwrap();
    assert_eq!(user.preferences["favorite_genres"][0], "Drama");
}

#[tokio::test]
async fn ids_increase_with_each_insert() {
    let store = setup_store().await;
    let first = add_movie(&store, "A").await;
    let second = add_movie(&store, "B").await;
    assert!(second.id > first.id);
}

#[tokio::test]
async fn updates_move_updated_at_forward() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;

    let mut active = user.clone().into_active_model();
    active.is_active = Set(false);
    let once = store.update_user(active).await.unwrap();
    let first_stamp = once.updated_at.expect("updated_at set on update");
    assert!(!once.is_active);
    assert!(first_stamp >= user.created_at);
    assert_eq!(once.created_at, user.created_at);

    let mut active = once.into_active_model();
    active.preferences = Set(json!({"theme": "dark"}));
    let twice = store.update_user(active).await.unwrap();
    assert!(twice.updated_at.expect("updated_at still set") >= first_stamp);
}

#[tokio::test]
async fn movie_and_rating_updates_are_stamped() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;
    let movie = add_movie(&store, "M").await;
    let rating = store
        .create_rating(NewRating {
            user_id: user.id,
            movie_id: movie.id,
            rating: 3.0,
            review: None,
        })
        .await
        .unwrap();

    let mut active = movie.into_active_model();
    active.average_rating = Set(3.0);
    active.rating_count = Set(1);
    let movie = store.update_movie(active).await.unwrap();
    assert_eq!(movie.rating_count, 1);
    assert!(movie.updated_at.is_some());

    let mut active = rating.into_active_model();
    active.review = Set(Some("Better on a second watch".to_string()));
    let rating = store.update_rating(active).await.unwrap();
    assert!(rating.updated_at.is_some());
}

#[tokio::test]
async fn deleting_movie_removes_its_ratings_and_tags() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;
    let movie = add_movie(&store, "M").await;
    let drama = store.create_genre(NewGenre::new("Drama")).await.unwrap();
    store.tag_movie(movie.id, drama.id).await.unwrap();
    store
        .create_rating(NewRating {
            user_id: user.id,
            movie_id: movie.id,
            rating: 4.0,
            review: None,
        })
        .await
        .unwrap();

    store.delete_movie(movie.id).await.unwrap();

    let counts = store.counts().await.unwrap();
    assert_eq!(counts.movies, 0);
    assert_eq!(counts.ratings, 0);
    assert_eq!(counts.movie_genres, 0);
    assert_eq!(counts.genres, 1);
    assert!(matches!(store.movie(movie.id).await, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn user_with_donations_cannot_be_deleted() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;
    let movie = add_movie(&store, "M").await;
    store
        .create_donation(NewDonation {
            user_id: user.id,
            amount: 1.0,
            currency: None,
            transaction_id: None,
            status: None,
        })
        .await
        .unwrap();
    store
        .submit_feedback(NewFeedback {
            user_id: user.id,
            content: "Hi".to_string(),
            category: None,
        })
        .await
        .unwrap();
    store
        .record_watch(NewWatch {
            user_id: user.id,
            movie_id: movie.id,
            watch_duration: Some(30),
            completed: false,
        })
        .await
        .unwrap();
    store
        .create_rating(NewRating {
            user_id: user.id,
            movie_id: movie.id,
            rating: 2.0,
            review: None,
        })
        .await
        .unwrap();

    let err = store.delete_user(user.id).await.unwrap_err();
    assert!(matches!(err, StoreError::ForeignKeyViolation(_)), "got {err:?}");
    assert_eq!(store.user(user.id).await.unwrap().id, user.id);

    donation::Entity::delete_many().exec(store.db()).await.unwrap();
    store.delete_user(user.id).await.unwrap();

    let counts = store.counts().await.unwrap();
    assert_eq!(counts.users, 0);
    assert_eq!(counts.feedback, 0);
    assert_eq!(counts.watch_history, 0);
    assert_eq!(counts.ratings, 0);
    assert_eq!(counts.movies, 1);
}

#[tokio::test]
async fn deleting_missing_rows_reports_not_found() {
    let store = setup_store().await;

    assert!(matches!(
        store.delete_user(5).await,
        Err(StoreError::NotFound { entity: "user", id: 5 })
    ));
    assert!(matches!(store.delete_genre(1).await, Err(StoreError::NotFound { .. })));
    assert!(matches!(store.genre(1).await, Err(StoreError::NotFound { .. })));
}

#[tokio::test]
async fn deleting_genre_removes_its_tags() {
    let store = setup_store().await;
    let movie = add_movie(&store, "M").await;
    let drama = store.create_genre(NewGenre::new("Drama")).await.unwrap();
    let crime = store.create_genre(NewGenre::new("Crime")).await.unwrap();
    store.tag_movie(movie.id, drama.id).await.unwrap();
    store.tag_movie(movie.id, crime.id).await.unwrap();

    store.delete_genre(drama.id).await.unwrap();

    let counts = store.counts().await.unwrap();
    assert_eq!(counts.genres, 1);
    assert_eq!(counts.movie_genres, 1);
    assert_eq!(counts.movies, 1);
    let names: Vec<String> =
        movie.genres(store.db()).await.unwrap().into_iter().map(|g| g.name).collect();
    assert_eq!(names, vec!["Crime"]);
}

#[tokio::test]
async fn updating_deleted_row_reports_not_found() {
    let store = setup_store().await;
    let user = add_user(&store, "a").await;
    let movie = add_movie(&store, "M").await;
    store.delete_user(user.id).await.unwrap();
    store.delete_movie(movie.id).await.unwrap();

    let mut active = user.into_active_model();
    active.is_active = Set(false);
    assert!(matches!(
        store.update_user(active).await,
        Err(StoreError::NotFound { entity: "user", id }) if id > 0
    ));

    let mut active = movie.clone().into_active_model();
    active.rating_count = Set(3);
    let err = store.update_movie(active).await.unwrap_err();
    assert!(
        matches!(err, StoreError::NotFound { entity: "movie", id } if id == movie.id),
        "got {err:?}"
    );
}

#[tokio::test]
async fn release_date_keeps_time_of_day() {
    let store = setup_store().await;
    let premiere = Date::from_calendar_date(1995, Month::December, 15)
        .unwrap()
        .with_hms(20, 30, 0)
        .unwrap();

    let mut new = NewMovie::new("Heat");
    new.release_date = Some(premiere);
    let movie = store.create_movie(new).await.unwrap();

    assert_eq!(movie.release_date, Some(premiere));
    assert_eq!(store.movie(movie.id).await.unwrap().release_date, Some(premiere));
}
