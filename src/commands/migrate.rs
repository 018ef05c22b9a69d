use crate::Config;
use crate::database::migration::Migrator;
use crate::database::{DatabaseManager, DatabaseManagerImpl};
use clap::Subcommand;
use sea_orm_migration::{MigratorTrait, SchemaManager};
use std::fmt;
use tracing::info;

const WELL_AGGREGATES_TABLE: &str = "well_aggregates";

#[derive(Subcommand)]
pub enum MigrateAction {
    /// Run all pending migrations
    Up,
    /// Rollback the last migration
    Down {
        #[arg(
            short,
            long,
            help = "Number of migrations to rollback",
            default_value = "1"
        )]
        steps: u32,
    },
    /// Show applied and pending migrations and the stored well count
    Status,
}

/// Schema state of the aggregate store
#[derive(Debug)]
pub struct SchemaStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
    /// `None` while the `well_aggregates` table does not exist
    pub stored_wells: Option<u64>,
}

impl SchemaStatus {
    pub async fn collect(
        database: &DatabaseManagerImpl,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let connection = database.connection();
        let names = |migrations: Vec<sea_orm_migration::Migration>| {
            migrations
                .iter()
                .map(|m| m.name().to_string())
                .collect::<Vec<_>>()
        };

        let applied = names(Migrator::get_applied_migrations(connection).await?);
        let pending = names(Migrator::get_pending_migrations(connection).await?);

        let stored_wells = if SchemaManager::new(connection)
            .has_table(WELL_AGGREGATES_TABLE)
            .await?
        {
            Some(database.well_aggregates().count().await?)
        } else {
            None
        };

        Ok(Self {
            applied,
            pending,
            stored_wells,
        })
    }
}

impl fmt::Display for SchemaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in &self.applied {
            writeln!(f, "applied  {}", name)?;
        }
        for name in &self.pending {
            writeln!(f, "pending  {}", name)?;
        }
        match self.stored_wells {
            Some(count) => write!(f, "{}: {} well(s) stored", WELL_AGGREGATES_TABLE, count),
            None => write!(f, "{}: table not created", WELL_AGGREGATES_TABLE),
        }
    }
}

pub async fn handle_migrate_command(
    action: MigrateAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_manager = DatabaseManagerImpl::new_from_config(config).await?;
    let connection = db_manager.connection();

    match action {
        MigrateAction::Up => {
            info!("Creating the well aggregate schema");
            Migrator::up(connection, None).await?;
            info!("Well aggregate schema is up to date");
        }
        MigrateAction::Down { steps } => {
            info!(steps, "Rolling back well aggregate migrations");
            Migrator::down(connection, Some(steps)).await?;
            info!(steps, "Rollback completed");
        }
        MigrateAction::Status => {
            let status = SchemaStatus::collect(&db_manager).await?;
            info!(
                applied = status.applied.len(),
                pending = status.pending.len(),
                stored_wells = ?status.stored_wells,
                "Migration status"
            );
            println!("{}", status);
        }
    }

    Ok(())
}
