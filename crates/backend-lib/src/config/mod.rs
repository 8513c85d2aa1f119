// ============================
// cms-backend-lib/src/config/mod.rs
// ============================
//! Configuration management.
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::auth::policy::{policy_from_settings, HashAlgorithm};
use crate::auth::PasswordRequirements;
use crate::error::AppError;


/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "cms.toml";

/// Prefix for environment overrides. Nested keys use `__`, e.g. `CMS_HASHING__ALGORITHM`.
pub const ENV_PREFIX: &str = "CMS_";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level
    pub log_level: String,
    /// Password hashing algorithm and cost parameters
    pub hashing: HashingSettings,
    /// Password requirements
    pub password_requirements: PasswordRequirements,
}

/// Which algorithm new hashes use, and with what cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingSettings {
    pub algorithm: HashAlgorithm,
    pub argon2: Argon2Settings,
    pub scrypt: ScryptSettings,
}

/// Argon2id cost parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Settings {
    /// Memory size in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

/// scrypt cost parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScryptSettings {
    /// log2 of the CPU/memory cost
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            hashing: HashingSettings::default(),
            password_requirements: PasswordRequirements::default(),
        }
    }
}

impl Default for HashingSettings {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Argon2id,
            argon2: Argon2Settings::default(),
            scrypt: ScryptSettings::default(),
        }
    }
}

impl Default for Argon2Settings {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

impl Default for ScryptSettings {
    fn default() -> Self {
        Self {
            log_n: scrypt::Params::RECOMMENDED_LOG_N,
            r: scrypt::Params::RECOMMENDED_R,
            p: scrypt::Params::RECOMMENDED_P,
        }
    }
}

impl Settings {
    /// Load settings from `cms.toml` in the working directory plus environment
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from the given TOML file plus environment, then validate
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let settings: Settings = Self::figment(path).extract()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`Settings::load_from`], but the file must exist. Used for paths named explicitly by the user.
    pub fn load_required(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AppError::Config(format!(
                "config file '{}' not found",
                path.display()
            )));
        }
        Self::load_from(path)
    }

    /// Layered sources: defaults, then the TOML file (if present), then `CMS_*` env vars
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check the settings for values that would fail later at runtime
    pub fn validate(&self) -> Result<(), AppError> {
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        if self.password_requirements.min_length == 0 {
            return Err(AppError::Config(
                "password_requirements.min_length must be at least 1".to_string(),
            ));
        }

        policy_from_settings(&self.hashing)?;
        Ok(())
    }
}
