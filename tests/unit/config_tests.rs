// ==========================
// tests/unit/config_tests.rs
// ==========================
//! Unit tests for the configuration module
use cms_backend_lib::auth::HashAlgorithm;
use cms_backend_lib::config::Settings;
use cms_backend_lib::error::AppError;
use cms_backend_lib::AppState;
use figment::Jail;

use crate::test_utils::test_settings;

#[test]
fn test_app_state_from_settings() {
    let state = AppState::new(test_settings()).unwrap();
    assert_eq!(state.settings.hashing.algorithm, HashAlgorithm::Argon2id);
    assert_eq!(state.settings.log_level, "info");
}

#[test]
fn test_app_state_rejects_invalid_settings() {
    let mut settings = test_settings();
    settings.hashing.argon2.parallelism = 0;
    assert!(matches!(AppState::new(settings), Err(AppError::Config(_))));
}

#[test]
fn test_env_selects_algorithm() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
            [hashing.argon2]
            memory_kib = 1024
            iterations = 1

            [hashing.scrypt]
            log_n = 8
            "#,
        )?;
        jail.set_env("CMS_HASHING__ALGORITHM", "scrypt");

        let settings = Settings::load_from("custom.toml").map_err(|e| e.to_string())?;
        assert_eq!(settings.hashing.algorithm, HashAlgorithm::Scrypt);
        assert_eq!(settings.hashing.scrypt.log_n, 8);
        assert_eq!(settings.hashing.argon2.memory_kib, 1024);
        Ok(())
    });
}
