//! Configuration service.
//!
//! Loads `config.toml` from the finpanel config directory, writing a default
//! file on first run, and caches the result.

use std::sync::{Arc, RwLock};

use finpanel_core::config::ClientConfig;
use finpanel_core::error::Result;

use crate::paths::FinpanelPaths;
use crate::storage::AtomicTomlFile;

/// Overrides `[backend] base_url` for deployments; not exposed in the UI.
pub const BACKEND_URL_ENV: &str = "FINPANEL_BACKEND_URL";

#[derive(Clone)]
pub struct ConfigService {
    paths: FinpanelPaths,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: FinpanelPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// The environment override is applied on every load, never persisted.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let cached = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref config) = *cached {
                return Ok(config.clone());
            }
        }

        let mut loaded = self.load_or_create()?;
        if let Ok(url) = std::env::var(BACKEND_URL_ENV)
            && !url.trim().is_empty()
        {
            tracing::debug!(base_url = %url, "Backend URL taken from environment");
            loaded.backend.base_url = url.trim().to_string();
        }

        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = Some(loaded.clone());
        Ok(loaded)
    }

    /// Forces a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut cache = self.config.write().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }

    fn load_or_create(&self) -> Result<ClientConfig> {
        let file = AtomicTomlFile::<ClientConfig>::new(self.paths.config_file());
        match file.load()? {
            Some(config) => Ok(config),
            None => {
                let config = ClientConfig::default();
                file.save(&config)?;
                tracing::info!(path = ?file.path(), "Wrote default configuration");
                Ok(config)
            }
        }
    }
}
