use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use super::dao::{DaoBase, TodoDao};
use super::memory::InMemoryTodoStore;
use super::providers;
use super::repository::TodoRepository;
use crate::config::{AppConfig, DatabaseConfig};

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let registry = providers::default_registry()?;
    let provider = registry.provider_for_url(&cfg.url)?;
    info!(provider = provider.id().as_str(), "connecting to database");

    let db = provider.connect(cfg).await?;

    info!("syncing database schema from entities");
    db.get_schema_registry("todo_api::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}

/// Picks the storage engine: the configured database, or process memory when
/// no database section is present.
pub async fn open_repository(cfg: &AppConfig) -> anyhow::Result<Arc<dyn TodoRepository>> {
    match cfg.database.as_ref() {
        Some(database) => {
            let db = connect(database).await?;
            Ok(Arc::new(TodoDao::new(&db)))
        }
        None => {
            warn!("no database configured; todos live in memory and vanish on restart");
            Ok(Arc::new(InMemoryTodoStore::new()))
        }
    }
}
