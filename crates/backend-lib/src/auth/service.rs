// ============================
// cms-backend-lib/src/auth/service.rs
// ============================
//! Async credential service used by request-handling code.
use async_trait::async_trait;

use super::{PasswordRequirements, Verification};
use crate::error::AppError;

#[async_trait]
pub trait CredentialService: Send + Sync {
    async fn create(&self, password: &str) -> Result<String, AppError>;
    async fn verify(&self, password: &str, hash: &str) -> Verification;
    fn password_ok(&self, pwd: &str, req: &PasswordRequirements) -> bool;
}
