//! Database migrations.
//!
//! Schema migrations for the catalog tables.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_content_node_table;
mod m20250101_000002_create_image_table;
mod m20250101_000003_create_reference_tables;
mod m20250101_000004_create_actor_table;
mod m20250101_000005_create_movie_tables;
mod m20250101_000006_create_movie_shots_table;
mod m20250101_000007_create_rating_table;
mod m20250101_000008_create_reviews_table;
mod m20250101_000009_create_home_page_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_content_node_table::Migration),
            Box::new(m20250101_000002_create_image_table::Migration),
            Box::new(m20250101_000003_create_reference_tables::Migration),
            Box::new(m20250101_000004_create_actor_table::Migration),
            Box::new(m20250101_000005_create_movie_tables::Migration),
            Box::new(m20250101_000006_create_movie_shots_table::Migration),
            Box::new(m20250101_000007_create_rating_table::Migration),
            Box::new(m20250101_000008_create_reviews_table::Migration),
            Box::new(m20250101_000009_create_home_page_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_unique() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        assert_eq!(names.len(), 9);
        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }
}
