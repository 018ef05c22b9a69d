use crate::database::DatabaseResult;
use crate::database::entities::{NewWellAggregate, WellAggregate, well_aggregates};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

/// Rows per multi-row INSERT, kept well under SQLite's bound-parameter limit
const INSERT_CHUNK_SIZE: usize = 500;

/// Well aggregates DAO for database operations
#[derive(Clone)]
pub struct WellAggregatesDao {
    db: DatabaseConnection,
}

impl WellAggregatesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert every aggregate inside a single transaction.
    ///
    /// Either all rows are committed or none are: any failure, including a
    /// unique violation on `well_identifier`, rolls the whole batch back.
    pub async fn insert_all(&self, aggregates: &[NewWellAggregate]) -> DatabaseResult<usize> {
        if aggregates.is_empty() {
            return Ok(0);
        }

        let txn = self.db.begin().await?;

        for chunk in aggregates.chunks(INSERT_CHUNK_SIZE) {
            let models = chunk
                .iter()
                .cloned()
                .map(NewWellAggregate::into_active_model);

            // Dropping `txn` on error rolls back
            well_aggregates::Entity::insert_many(models)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(aggregates.len())
    }

    /// Find the aggregate for an exact well identifier
    pub async fn find_by_well_identifier(
        &self,
        well_identifier: &str,
    ) -> DatabaseResult<Option<WellAggregate>> {
        let aggregate = well_aggregates::Entity::find()
            .filter(well_aggregates::Column::WellIdentifier.eq(well_identifier))
            .one(&self.db)
            .await?;

        Ok(aggregate)
    }

    pub async fn count(&self) -> DatabaseResult<u64> {
        let count = well_aggregates::Entity::find().count(&self.db).await?;
        Ok(count)
    }
}
