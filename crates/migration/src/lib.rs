pub use sea_orm_migration::prelude::*;

mod m20260301_000001_categories;
mod m20260308_000001_category_order_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_categories::Migration),
            Box::new(m20260308_000001_category_order_indexes::Migration),
        ]
    }
}
