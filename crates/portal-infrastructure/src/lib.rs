//! File-backed infrastructure for the portal shell.
//!
//! - `paths`: where configuration, secrets, preferences and logs live
//! - `storage`: atomic TOML file handling
//! - `config_service`: `config.toml` and `secret.json` loading
//! - `preference_repository`: the durable theme preference

pub mod config_service;
pub mod paths;
pub mod preference_repository;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::{PathError, PortalPaths};
pub use crate::preference_repository::TomlPreferenceRepository;
pub use crate::storage::{AtomicTomlFile, StorageError};
