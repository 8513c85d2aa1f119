// ============================
// cms-backend-lib/src/auth/service_impl.rs
// ============================
//! Default [`CredentialService`] implementation.
use async_trait::async_trait;
use tokio::task;
use tracing::warn;
use zeroize::Zeroizing;

use super::{validate_password_strength, Authentication, CredentialService, PasswordRequirements, Verification};
use crate::error::AppError;

/// [`CredentialService`] backed by [`Authentication`]; hashing runs on the blocking pool.
#[derive(Clone, Debug, Default)]
pub struct DefaultCredentials {
    auth: Authentication,
}

impl DefaultCredentials {
    pub fn new(auth: Authentication) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl CredentialService for DefaultCredentials {
    async fn create(&self, password: &str) -> Result<String, AppError> {
        let auth = self.auth.clone();
        let plain = Zeroizing::new(password.to_owned());
        task::spawn_blocking(move || auth.create(&plain))
            .await
            .map_err(|e| {
                warn!(error = %e, "hashing task failed");
                AppError::Internal(format!("hashing task failed: {e}"))
            })?
    }

    async fn verify(&self, password: &str, hash: &str) -> Verification {
        let auth = self.auth.clone();
        let plain = Zeroizing::new(password.to_owned());
        let hash = hash.to_owned();
        match task::spawn_blocking(move || auth.verify(&plain, &hash)).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "verification task failed");
                Verification::NoMatch
            }
        }
    }

    fn password_ok(&self, pwd: &str, req: &PasswordRequirements) -> bool {
        validate_password_strength(pwd, req)
    }
}
