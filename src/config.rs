//! Runtime configuration shared by the CLI and the HTTP server

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::core::protocols::ProtocolCatalog;
use crate::core::storage::{AnalysisStore, JsonlStore, MemoryStore};
use crate::error::Result;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for `--serve`
    pub addr: String,
    /// JSON-lines history file; in-memory when unset
    pub store_path: Option<PathBuf>,
    /// Protocol catalog JSON; built-in catalog when unset
    pub catalog_path: Option<PathBuf>,
    /// Salt for alert pseudonyms
    pub alert_salt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            store_path: None,
            catalog_path: None,
            alert_salt: String::new(),
        }
    }
}

impl Config {
    pub fn load_catalog(&self) -> Result<Arc<ProtocolCatalog>> {
        match &self.catalog_path {
            Some(path) => {
                let catalog = ProtocolCatalog::from_file(path)?;
                info!(path = %path.display(), protocols = catalog.len(), "protocol catalog loaded");
                Ok(Arc::new(catalog))
            }
            None => Ok(Arc::new(ProtocolCatalog::builtin().clone())),
        }
    }

    pub fn open_store(&self) -> Arc<dyn AnalysisStore> {
        match &self.store_path {
            Some(path) => Arc::new(JsonlStore::new(path)),
            None => Arc::new(MemoryStore::new()),
        }
    }
}
