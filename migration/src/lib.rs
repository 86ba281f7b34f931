pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_schema;
mod m20250301_000002_add_movie_genre_unique;

/// Ordered list of every schema change. Applied once at startup.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_schema::Migration),
            Box::new(m20250301_000002_add_movie_genre_unique::Migration),
        ]
    }
}
