//! Platform-facing implementations: paths, file storage, configuration.

pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::FinpanelPaths;
pub use crate::session_store::{FileSessionStore, InMemorySessionStore};
