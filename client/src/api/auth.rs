//! Authentication endpoint

use serde::{Deserialize, Serialize};

use shared::models::StaffProfile;
use shared::types::Language;

use super::{decode, ApiClient};
use crate::error::{AppError, AppResult};

/// A successful login: the signed token plus the profile beside it
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub profile: StaffProfile,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: LoginUser,
}

#[derive(Debug, Deserialize)]
struct LoginUser {
    name: String,
    role: String,
    #[serde(rename = "branchId")]
    branch_id: i64,
    #[serde(rename = "branchName")]
    branch_name: Option<String>,
    language: Option<String>,
}

impl ApiClient {
    /// Exchange credentials for a session token. A 401 maps to the
    /// credential error; anything else non-2xx stays a generic API error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginOutcome> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::InvalidCredentials);
        }

        let body: LoginResponse = decode(response).await?;
        let preferred_language = match body.user.language.as_deref() {
            Some("en") => Language::English,
            _ => Language::Thai,
        };

        Ok(LoginOutcome {
            token: body.token,
            profile: StaffProfile {
                name: body.user.name,
                role: body.user.role,
                branch_id: body.user.branch_id,
                branch_name: body.user.branch_name,
                preferred_language,
            },
        })
    }
}
