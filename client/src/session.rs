//! Session handling
//!
//! The login response carries a signed token plus a companion claims blob;
//! the browser host stores both in cookies. The expiry check here is
//! advisory only: it decides whether to render a protected view or bounce
//! to login, while real authorization stays server-side on every call.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use shared::models::SessionClaims;

use crate::error::{AppError, AppResult};

/// An installed session: the raw bearer token plus its decoded claims
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub claims: SessionClaims,
}

/// Advisory session state at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active { remaining_secs: i64 },
    Expired,
}

impl Session {
    /// Build a session by reading the claims out of the token
    pub fn from_token(token: &str) -> AppResult<Session> {
        let claims = decode_claims_unverified(token)?;
        Ok(Session {
            token: token.to_string(),
            claims,
        })
    }

    /// Advisory expiry check against `now` (Unix seconds)
    pub fn status(&self, now: i64, leeway_secs: i64) -> SessionStatus {
        if self.claims.is_expired(now, leeway_secs) {
            SessionStatus::Expired
        } else {
            SessionStatus::Active {
                remaining_secs: self.claims.exp + leeway_secs - now,
            }
        }
    }
}

/// Read the claims embedded in a token without verifying its signature.
///
/// The client never holds the signing secret, so the signature cannot be
/// checked here. Expiry validation is disabled as well: the status check
/// owns the clock and applies the configured leeway itself, which lets it
/// distinguish an expired token from a malformed one.
fn decode_claims_unverified(token: &str) -> AppResult<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    decode::<SessionClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| AppError::InvalidToken(e.to_string()))
}

/// In-memory stand-in for the cookie pair: installed on login (or from
/// cookies read back at startup), consulted before every protected view.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<Session>,
    leeway_secs: i64,
}

impl SessionStore {
    pub fn new(leeway_secs: i64) -> Self {
        Self {
            session: None,
            leeway_secs,
        }
    }

    pub fn install(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Install from a raw token, e.g. cookies read back at startup
    pub fn install_token(&mut self, token: &str) -> AppResult<()> {
        self.session = Some(Session::from_token(token)?);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.session = None;
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The route-guard decision: a missing session or an expired token
    /// sends the user to the login view.
    pub fn guard(&self, now: i64) -> AppResult<&Session> {
        let session = self.session.as_ref().ok_or(AppError::SessionMissing)?;
        match session.status(now, self.leeway_secs) {
            SessionStatus::Active { .. } => Ok(session),
            SessionStatus::Expired => Err(AppError::SessionExpired),
        }
    }
}
