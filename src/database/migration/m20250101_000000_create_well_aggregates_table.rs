use super::WellAggregates;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WellAggregates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WellAggregates::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WellAggregates::WellIdentifier)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WellAggregates::OilTotal).double().not_null())
                    .col(ColumnDef::new(WellAggregates::GasTotal).double().not_null())
                    .col(
                        ColumnDef::new(WellAggregates::BrineTotal)
                            .double()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WellAggregates::Table).to_owned())
            .await
    }
}
