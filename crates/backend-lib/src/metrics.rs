// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const CREDENTIALS_CREATED: &str = "credentials.created";
pub const CREDENTIALS_CREATE_FAILED: &str = "credentials.create_failed";
/// Labelled with `outcome` = `no_match` | `match_current` | `match_needs_rehash`
pub const CREDENTIALS_VERIFIED: &str = "credentials.verified";
