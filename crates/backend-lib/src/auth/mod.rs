// ============================
// cms-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod policy;
mod service;
mod service_impl;

pub use password::{
    create, create_secure, validate_password_strength, verify, Authentication, PasswordRequirements,
    Verification, MIN_PASSWORD_LENGTH,
};
pub use policy::{is_bcrypt, verify_encoded, Argon2Policy, HashAlgorithm, HashPolicy, ScryptPolicy};
pub use service::CredentialService;
pub use service_impl::DefaultCredentials;
