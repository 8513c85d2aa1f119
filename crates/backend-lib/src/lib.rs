// ============================
// cms-backend-lib/src/lib.rs
// ============================
//! Credential hashing backend for the content-management platform.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;

use std::sync::Arc;

use crate::auth::{Authentication, CredentialService, DefaultCredentials};
use crate::config::Settings;
use crate::error::AppError;

/// Application state shared across all callers
#[derive(Clone)]
pub struct AppState {
    /// Credential service
    pub credentials: Arc<dyn CredentialService>,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state from validated settings
    pub fn new(config: Settings) -> Result<Self, AppError> {
        config.validate()?;
        let auth = Authentication::from_settings(&config.hashing)?;
        Ok(Self {
            credentials: Arc::new(DefaultCredentials::new(auth)),
            settings: Arc::new(config),
        })
    }

    /// Create a new application state from `cms.toml` and the environment
    pub fn new_default() -> Result<Self, AppError> {
        Self::new(Settings::load()?)
    }
}
