#![allow(dead_code)]

use cinerate::{
    Store,
    config::Config,
    db,
    entities::{movie, user},
    models::{NewMovie, NewUser},
};

pub async fn setup_store() -> Store {
    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        sql_logging: false,
    };
    let db = db::connect_and_migrate(&config).await.expect("in-memory store should migrate");
    Store::new(db)
}

pub async fn add_user(store: &Store, name: &str) -> user::Model {
    store
        .create_user(NewUser::new(format!("{name}@x.com"), name, "argon2-hash"))
        .await
        .expect("user insert")
}

pub async fn add_movie(store: &Store, title: &str) -> movie::Model {
    store.create_movie(NewMovie::new(title)).await.expect("movie insert")
}
