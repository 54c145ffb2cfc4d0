use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub dataset: DatasetConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub collection: String,
    pub embedding_cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Nearest neighbors requested per query; only the closest is shown.
    pub result_count: usize,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let dataset_path = std::env::var("DATASET_PATH")
            .unwrap_or_else(|_| "data/recipes.csv".to_string())
            .into();

        let store_path = std::env::var("STORE_PATH")
            .unwrap_or_else(|_| "./data/vectorstore".to_string())
            .into();

        let collection = std::env::var("COLLECTION").unwrap_or_else(|_| "recipes".to_string());

        let embedding_cache_dir = std::env::var("EMBEDDING_CACHE_DIR").ok().map(PathBuf::from);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let external_url = std::env::var("EXTERNAL_URL").ok();

        let result_count = std::env::var("RESULT_COUNT")
            .unwrap_or_else(|_| "2".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid RESULT_COUNT value".to_string()))?;

        Ok(Settings {
            dataset: DatasetConfig { path: dataset_path },
            store: StoreConfig {
                path: store_path,
                collection,
                embedding_cache_dir,
            },
            server: ServerConfig {
                host,
                port,
                external_url,
            },
            search: SearchConfig { result_count },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.search.result_count == 0 {
            return Err(Error::Config("Result count must be non-zero".to_string()));
        }

        if self.store.collection.is_empty() {
            return Err(Error::Config(
                "Collection name must be non-empty".to_string(),
            ));
        }

        Ok(())
    }
}
