pub use sea_orm_migration::prelude::*;

mod m20241101_120000_create_teams_table;
mod m20241101_120100_create_users_table;
mod m20241101_120200_create_pull_requests_table;
mod m20241101_120300_create_pull_request_reviewers_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241101_120000_create_teams_table::Migration),
            Box::new(m20241101_120100_create_users_table::Migration),
            Box::new(m20241101_120200_create_pull_requests_table::Migration),
            Box::new(m20241101_120300_create_pull_request_reviewers_table::Migration),
        ]
    }
}
