//! The migration set applies cleanly and leaves an empty schema behind.

mod common;

use common::setup_store;
use migration::{Migrator, MigratorTrait};

#[tokio::test]
async fn startup_applies_every_migration() {
    let store = setup_store().await;

    let applied = Migrator::get_applied_migrations(store.db()).await.unwrap();
    assert_eq!(applied.len(), Migrator::migrations().len());
    assert!(Migrator::get_pending_migrations(store.db()).await.unwrap().is_empty());

    let counts = store.counts().await.unwrap();
    assert_eq!(counts, Default::default());
}

#[tokio::test]
async fn rerunning_migrations_is_a_no_op() {
    let store = setup_store().await;

    Migrator::up(store.db(), None).await.unwrap();
    assert!(Migrator::get_pending_migrations(store.db()).await.unwrap().is_empty());
}

#[tokio::test]
async fn migrations_roll_back_and_reapply() {
    let store = setup_store().await;

    Migrator::down(store.db(), None).await.unwrap();
    assert_eq!(
        Migrator::get_pending_migrations(store.db()).await.unwrap().len(),
        Migrator::migrations().len()
    );

    Migrator::up(store.db(), None).await.unwrap();
    assert_eq!(store.counts().await.unwrap(), Default::default());
}
