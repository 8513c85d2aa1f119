// ============================
// cms-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use std::sync::Arc;

use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::policy::{policy_from_settings, Argon2Policy, HashPolicy};
use crate::config::HashingSettings;
use crate::error::AppError;
use crate::metrics::{CREDENTIALS_CREATED, CREDENTIALS_CREATE_FAILED, CREDENTIALS_VERIFIED};

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Result of checking a password against a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Verification {
    /// Empty input or wrong password
    NoMatch = 0,
    /// Password matches and the hash uses current parameters
    MatchCurrent = 1,
    /// Password matches, but the caller should re-hash and store the new hash
    MatchNeedsRehash = 2,
}

impl Verification {
    pub fn is_match(self) -> bool {
        !matches!(self, Verification::NoMatch)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verification::NoMatch => "no_match",
            Verification::MatchCurrent => "match_current",
            Verification::MatchNeedsRehash => "match_needs_rehash",
        }
    }
}

impl From<Verification> for u8 {
    fn from(v: Verification) -> Self {
        v as u8
    }
}

/// Stateless password hasher bound to a [`HashPolicy`].
#[derive(Clone, Debug)]
pub struct Authentication {
    policy: Arc<dyn HashPolicy>,
}

impl Default for Authentication {
    fn default() -> Self {
        Self::new(Arc::new(Argon2Policy::default()))
    }
}

impl Authentication {
    pub fn new(policy: Arc<dyn HashPolicy>) -> Self {
        Self { policy }
    }

    /// Build from the `[hashing]` settings section
    pub fn from_settings(settings: &HashingSettings) -> Result<Self, AppError> {
        Ok(Self::new(policy_from_settings(settings)?))
    }

    /// Create a password hash from a plaintext password.
    ///
    /// Fails with [`AppError::InvalidInput`] for an empty password and with
    /// [`AppError::Internal`] if the hashing primitive itself fails.
    pub fn create(&self, password: &str) -> Result<String, AppError> {
        if password.is_empty() {
            return Err(AppError::InvalidInput(
                "password hashing failed: no password provided".to_string(),
            ));
        }

        match self.policy.hash(password) {
            Ok(hash) => {
                counter!(CREDENTIALS_CREATED).increment(1);
                debug!(algorithm = self.policy.algorithm().ident(), "password hashed");
                Ok(hash)
            }
            Err(err) => {
                counter!(CREDENTIALS_CREATE_FAILED).increment(1);
                warn!(error = %err, "password hashing failed");
                Err(match err {
                    AppError::Internal(msg) => AppError::Internal(msg),
                    other => AppError::Internal(other.to_string()),
                })
            }
        }
    }

    /// Hash the password, then wipe the caller's buffer whether or not hashing succeeded
    pub fn create_secure(&self, plain: &mut String) -> Result<String, AppError> {
        let hash = self.create(plain);
        plain.zeroize();
        hash
    }

    /// Verify that a password matches a hash.
    ///
    /// Never fails: empty input and mismatches both yield [`Verification::NoMatch`].
    pub fn verify(&self, password: &str, hash: &str) -> Verification {
        let outcome = if password.is_empty() || hash.is_empty() || !self.policy.verify(password, hash) {
            Verification::NoMatch
        } else if self.policy.needs_rehash(hash) {
            Verification::MatchNeedsRehash
        } else {
            Verification::MatchCurrent
        };

        counter!(CREDENTIALS_VERIFIED, "outcome" => outcome.as_str()).increment(1);
        debug!(outcome = outcome.as_str(), "password verified");
        outcome
    }
}

/// Hash a password with the default policy
pub fn create(password: &str) -> Result<String, AppError> {
    Authentication::default().create(password)
}

/// Verify a password against a hash with the default policy
pub fn verify(password: &str, hash: &str) -> Verification {
    Authentication::default().verify(password, hash)
}

/// Securely hash a password with the default policy and zeroize the original
pub fn create_secure(plain: &mut String) -> Result<String, AppError> {
    Authentication::default().create_secure(plain)
}

/// Password complexity requirements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRequirements {
    pub min_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_digit: bool,
    pub require_special: bool,
}

impl Default for PasswordRequirements {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            require_uppercase: true,
            require_lowercase: true,
            require_digit: true,
            require_special: true,
        }
    }
}

/// Check if a password meets the complexity requirements
pub fn validate_password_strength(password: &str, requirements: &PasswordRequirements) -> bool {
    if password.chars().count() < requirements.min_length {
        return false;
    }

    if requirements.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return false;
    }

    if requirements.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return false;
    }

    if requirements.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    if requirements.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return false;
    }

    true
}
