use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use tracing::{debug, info};

use crate::{config::Config, error::StoreResult};

const SQLITE_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys=ON",
    "PRAGMA journal_mode=WAL",
    "PRAGMA synchronous=NORMAL",
    "PRAGMA cache_size=-64000",
];

/// Connects and brings the schema up to date. Call once at startup and share
/// the returned handle.
pub async fn connect_and_migrate(config: &Config) -> StoreResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.database_url.clone());
    opts.max_connections(pool_size(config)).sqlx_logging(config.sql_logging);

    let db = Database::connect(opts).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DbBackend::Sqlite, pragma.to_string())).await?;
        }
        debug!(count = SQLITE_PRAGMAS.len(), "applied sqlite pragmas");
    }

    let pending = Migrator::get_pending_migrations(&db).await?.len();
    Migrator::up(&db, None).await?;
    info!(applied = pending, "schema up to date");

    Ok(db)
}

// Every pooled connection to an in-memory sqlite database opens its own
// empty database.
fn pool_size(config: &Config) -> u32 {
    let url = config.database_url.as_str();
    if url.contains(":memory:") || url.contains("mode=memory") {
        1
    } else {
        config.max_connections
    }
}
