#![allow(elided_lifetimes_in_paths)]
#![allow(clippy::wildcard_imports)]
pub use sea_orm_migration::prelude::*;
mod m20220101_000001_roles;
mod m20220101_000002_users;
mod m20220101_000003_photos;
mod m20220101_000004_tags;
mod m20220101_000005_comments;
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220101_000001_roles::Migration),
            Box::new(m20220101_000002_users::Migration),
            Box::new(m20220101_000003_photos::Migration),
            Box::new(m20220101_000004_tags::Migration),
            Box::new(m20220101_000005_comments::Migration),
            // inject-above (do not remove this comment)
        ]
    }
}
