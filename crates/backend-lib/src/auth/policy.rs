// ============================
// cms-backend-lib/src/auth/policy.rs
// ============================
//! Pluggable password hashing policies.
//!
//! A policy decides how *new* hashes are produced and whether an existing hash
//! is still up to date. Verification always follows whatever algorithm the
//! stored hash names (an Argon2 or scrypt PHC string, or a modular-crypt
//! bcrypt string), so hashes from an older configuration keep working after
//! the policy changes. bcrypt is verify-only: such hashes always need a rehash.
use std::fmt::Debug;
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params as Argon2Params, Version,
};
use scrypt::{Params as ScryptParams, Scrypt};
use serde::{Deserialize, Serialize};

use crate::config::HashingSettings;
use crate::error::AppError;

const SCRYPT_IDENT: &str = "scrypt";

/// Modular-crypt prefixes of the bcrypt variants we accept
const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// Algorithms a policy can hash with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Argon2id,
    Scrypt,
}

impl HashAlgorithm {
    /// PHC identifier, as it appears after the leading `$`
    pub fn ident(self) -> &'static str {
        match self {
            HashAlgorithm::Argon2id => "argon2id",
            HashAlgorithm::Scrypt => SCRYPT_IDENT,
        }
    }
}

/// Produces password hashes and judges whether stored hashes are current.
pub trait HashPolicy: Send + Sync + Debug {
    fn algorithm(&self) -> HashAlgorithm;

    /// Hash `password` with a fresh random salt. Returns a PHC string.
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// True if `hash` was not produced with this policy's algorithm and parameters.
    fn needs_rehash(&self, hash: &str) -> bool;

    fn verify(&self, password: &str, hash: &str) -> bool {
        verify_encoded(password, hash)
    }
}

pub fn is_bcrypt(hash: &str) -> bool {
    BCRYPT_PREFIXES.iter().any(|prefix| hash.starts_with(prefix))
}

/// Check `password` against any supported stored hash (Argon2, scrypt or bcrypt)
pub fn verify_encoded(password: &str, hash: &str) -> bool {
    if is_bcrypt(hash) {
        return bcrypt::verify(password, hash).unwrap_or(false);
    }

    let parsed = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };
    let argon2 = Argon2::default();
    let verifiers: [&dyn PasswordVerifier; 2] = [&argon2, &Scrypt];
    parsed.verify_password(&verifiers, password).is_ok()
}

/// Build the policy selected by the settings.
///
/// Both parameter sets are validated so a bad value is caught even when its
/// algorithm is not the active one.
pub fn policy_from_settings(settings: &HashingSettings) -> Result<Arc<dyn HashPolicy>, AppError> {
    let argon2 = Argon2Policy::new(
        settings.argon2.memory_kib,
        settings.argon2.iterations,
        settings.argon2.parallelism,
    )?;
    let scrypt = ScryptPolicy::new(settings.scrypt.log_n, settings.scrypt.r, settings.scrypt.p)?;

    match settings.algorithm {
        HashAlgorithm::Argon2id => Ok(Arc::new(argon2)),
        HashAlgorithm::Scrypt => Ok(Arc::new(scrypt)),
    }
}

/// Argon2id, version 0x13
#[derive(Debug, Clone)]
pub struct Argon2Policy {
    params: Argon2Params,
}

impl Argon2Policy {
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, AppError> {
        let params = Argon2Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::Config(format!("invalid argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Policy {
    fn default() -> Self {
        Self {
            params: Argon2Params::default(),
        }
    }
}

impl HashPolicy for Argon2Policy {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Argon2id
    }

    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("argon2 hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        if is_bcrypt(hash) {
            return true;
        }
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return true,
        };
        if parsed.algorithm.as_str() != HashAlgorithm::Argon2id.ident() {
            return true;
        }
        if parsed.version != Some(u32::from(Version::V0x13)) {
            return true;
        }
        match Argon2Params::try_from(&parsed) {
            Ok(stored) => {
                stored.m_cost() != self.params.m_cost()
                    || stored.t_cost() != self.params.t_cost()
                    || stored.p_cost() != self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

/// scrypt with a 32-byte output
#[derive(Debug, Clone)]
pub struct ScryptPolicy {
    params: ScryptParams,
}

impl ScryptPolicy {
    pub fn new(log_n: u8, r: u32, p: u32) -> Result<Self, AppError> {
        let params = ScryptParams::new(log_n, r, p, ScryptParams::RECOMMENDED_LEN)
            .map_err(|e| AppError::Config(format!("invalid scrypt parameters: {e}")))?;
        Ok(Self { params })
    }
}

impl Default for ScryptPolicy {
    fn default() -> Self {
        Self {
            params: ScryptParams::recommended(),
        }
    }
}

impl HashPolicy for ScryptPolicy {
    fn algorithm(&self) -> HashAlgorithm {
        HashAlgorithm::Scrypt
    }

    fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(password.as_bytes(), None, None, self.params.clone(), &salt)
            .map_err(|e| AppError::Internal(format!("scrypt hashing failed: {e}")))?
            .to_string();
        Ok(hash)
    }

    fn needs_rehash(&self, hash: &str) -> bool {
        if is_bcrypt(hash) {
            return true;
        }
        let parsed = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return true,
        };
        if parsed.algorithm.as_str() != SCRYPT_IDENT {
            return true;
        }
        match ScryptParams::try_from(&parsed) {
            Ok(stored) => {
                stored.log_n() != self.params.log_n()
                    || stored.r() != self.params.r()
                    || stored.p() != self.params.p()
            }
            Err(_) => true,
        }
    }
}
