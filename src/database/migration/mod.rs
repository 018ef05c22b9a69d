use sea_orm_migration::prelude::*;

pub use sea_orm_migration::MigratorTrait;

mod m20250101_000000_create_well_aggregates_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250101_000000_create_well_aggregates_table::Migration,
        )]
    }
}

/// Common table and column identifiers
#[derive(Iden)]
pub enum WellAggregates {
    Table,
    Id,
    WellIdentifier,
    OilTotal,
    GasTotal,
    BrineTotal,
}
