use cinerate::{Store, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,cinerate=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config).await?;
    let store = Store::new(db);

    let counts = store.counts().await?;
    tracing::info!(
        database_url = %config.database_url,
        users = counts.users,
        genres = counts.genres,
        movies = counts.movies,
        movie_genres = counts.movie_genres,
        ratings = counts.ratings,
        watch_history = counts.watch_history,
        donations = counts.donations,
        feedback = counts.feedback,
        "store ready"
    );

    Ok(())
}
