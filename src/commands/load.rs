use crate::Config;
use crate::database::{DatabaseManager, DatabaseManagerImpl};
use crate::loader::Loader;
use clap::Args;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Spreadsheet to load; defaults to `loader.source_path`
    #[arg(short, long)]
    pub file: Option<String>,
    /// Worksheet name for workbook sources; defaults to `loader.sheet`
    #[arg(short, long)]
    pub sheet: Option<String>,
}

pub async fn handle_load_command(
    args: LoadArgs,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let db_manager: Arc<dyn DatabaseManager> =
        Arc::new(DatabaseManagerImpl::new_from_config(config).await?);
    db_manager.migrate().await?;

    let path = args
        .file
        .unwrap_or_else(|| config.loader.source_path.clone());
    let sheet = args.sheet.or_else(|| config.loader.sheet.clone());

    let count = Loader::new(db_manager).with_sheet(sheet).load(&path).await?;

    info!(path = %path, wells = count, "Load completed");
    println!("Loaded {} well aggregates from {}", count, path);
    Ok(())
}
