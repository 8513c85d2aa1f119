// ===========================
// tests/unit/password_tests.rs
// ===========================
//! Unit tests for password hashing and verification
use cms_backend_lib::auth::{self, validate_password_strength, PasswordRequirements, Verification};
use cms_backend_lib::error::AppError;

use crate::test_utils::{auth_with, cheap_argon2, weakened_argon2};

#[test]
fn test_default_policy_scenario() {
    let hash = auth::create("correct horse battery staple").unwrap();

    assert_ne!(hash, "correct horse battery staple");
    assert!(hash.starts_with("$argon2id$"));
    assert_eq!(
        auth::verify("correct horse battery staple", &hash),
        Verification::MatchCurrent
    );
    assert_eq!(auth::verify("wrong password", &hash), Verification::NoMatch);
}

#[test]
fn test_create_empty_password_is_invalid_input() {
    assert!(matches!(auth::create(""), Err(AppError::InvalidInput(_))));

    // An absent password reaches the backend as an empty string
    let absent: Option<&str> = None;
    assert!(matches!(
        auth::create(absent.unwrap_or_default()),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn test_verify_empty_inputs_never_match() {
    let auth = auth_with(cheap_argon2());
    let hash = auth.create("non-empty").unwrap();

    assert_eq!(auth.verify("", &hash), Verification::NoMatch);
    assert_eq!(auth.verify("non-empty", ""), Verification::NoMatch);
    assert_eq!(auth.verify("", ""), Verification::NoMatch);
}

#[test]
fn test_distinct_passwords_do_not_cross_verify() {
    let auth = auth_with(cheap_argon2());
    let passwords = ["alpha", "Alpha", "alpha ", "béta", "0"];
    let hashes: Vec<String> = passwords.iter().map(|p| auth.create(p).unwrap()).collect();

    for (i, p) in passwords.iter().enumerate() {
        for (j, h) in hashes.iter().enumerate() {
            let outcome = auth.verify(p, h);
            if i == j {
                assert!(outcome.is_match(), "{p:?} should match its own hash");
            } else {
                assert_eq!(outcome, Verification::NoMatch, "{p:?} matched hash #{j}");
            }
        }
    }
}

#[test]
fn test_weakened_hash_needs_rehash() {
    let old_hash = auth_with(weakened_argon2()).create("hunter2hunter2").unwrap();
    let current = auth_with(cheap_argon2());

    assert_eq!(
        current.verify("hunter2hunter2", &old_hash),
        Verification::MatchNeedsRehash
    );
    // Wrong password against a stale hash is still just a miss
    assert_eq!(current.verify("hunter3hunter3", &old_hash), Verification::NoMatch);
}

#[test]
fn test_malformed_hash_is_no_match() {
    let auth = auth_with(cheap_argon2());
    assert_eq!(auth.verify("pw", "$2y$10$abcdefghijklmnopqrstuv"), Verification::NoMatch);
    assert_eq!(auth.verify("pw", "plain-text"), Verification::NoMatch);
}

#[test]
fn test_php_bcrypt_hash_matches_and_needs_rehash() {
    // password_hash("rasmuslerdorf", PASSWORD_DEFAULT) from the PHP manual
    let stored = "$2y$10$.vGA1O9wmRjrwAVXD98HNOgsNpDczlqm3Jq7KnEd1rVAGv3Fykk1a";
    let auth = auth_with(cheap_argon2());

    assert_eq!(auth.verify("rasmuslerdorf", stored), Verification::MatchNeedsRehash);
    assert_eq!(auth.verify("rasmuslerdorf!", stored), Verification::NoMatch);

    let migrated = auth.create("rasmuslerdorf").unwrap();
    assert_eq!(auth.verify("rasmuslerdorf", &migrated), Verification::MatchCurrent);
}

#[test]
fn test_password_strength_validation() {
    let requirements = PasswordRequirements::default();

    assert!(validate_password_strength("SecureP@ssw0rd", &requirements));
    assert!(!validate_password_strength("Short1!", &requirements));
    // Length counts characters, not bytes
    assert!(!validate_password_strength("Ää1!Ää1!Ä", &requirements));
}
