// Application state shared across request handlers

use std::sync::Arc;

use tokio::sync::RwLock;

use courtside_lib::repositories::{EventRepository, SettingsRepository};
use courtside_lib::services::AssetDirectory;
use courtside_lib::utils::Database;

use crate::auth::SessionStore;
use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub assets: AssetDirectory,
    pub sessions: Arc<SessionStore>,
    pub config: Arc<ServerConfig>,
    /// Serializes backup traffic: exports run concurrently with each other
    /// (read side), a restore runs alone (write side). The engine itself
    /// assumes at most one restore at a time against the store/asset pair.
    pub backup_gate: Arc<RwLock<()>>,
}

impl AppState {
    pub fn new(db: Database, assets: AssetDirectory, config: ServerConfig) -> Self {
        Self {
            db,
            assets,
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
            backup_gate: Arc::new(RwLock::new(())),
        }
    }

    pub fn settings_repo(&self) -> SettingsRepository {
        SettingsRepository::new(self.db.clone())
    }

    pub fn event_repo(&self) -> EventRepository {
        EventRepository::new(self.db.clone())
    }
}
