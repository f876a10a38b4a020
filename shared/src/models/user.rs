//! Staff identity models

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Claims carried in the session token (and mirrored in the companion
/// cookie blob the UI can read without decoding the token)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Staff account identifier
    pub sub: String,
    /// Display name, also stamped into submissions as `updatedBy`
    pub name: String,
    pub branch_id: i64,
    pub role: String,
    /// Expiry, Unix seconds
    pub exp: i64,
    /// Issued-at, Unix seconds
    pub iat: i64,
}

impl SessionClaims {
    /// Whether the embedded expiry has passed `now` (Unix seconds),
    /// allowing `leeway_secs` of clock skew.
    pub fn is_expired(&self, now: i64, leeway_secs: i64) -> bool {
        self.exp + leeway_secs <= now
    }
}

/// Display subset for the header bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffProfile {
    pub name: String,
    pub role: String,
    pub branch_id: i64,
    pub branch_name: Option<String>,
    pub preferred_language: Language,
}
