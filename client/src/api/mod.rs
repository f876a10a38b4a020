//! HTTP client for the remote POS API
//!
//! One client shared by every endpoint group; each group lives in its own
//! module together with the wire structs for its endpoints. A response
//! body is decoded exactly once, at this boundary: a non-2xx status maps
//! to an API error carrying the raw body, and a shape mismatch maps to a
//! typed decode error rather than a silent fallback.

pub mod auth;
pub mod stock;
pub mod summary;
pub mod worktime;

pub use auth::LoginOutcome;
pub use stock::{
    build_count_payload, build_receive_payload, CountSubmissionRow, ReceiveSubmission,
    ReceiveSubmissionRow,
};
pub use worktime::{build_punch_payload, PunchRequest};

use std::time::Duration;

use chrono::{Local, NaiveDate, NaiveTime};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Client for the remote POS API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }
}

/// Map the status and decode the body once
async fn decode<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Api {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Local date, time and author stamped onto every submission
#[derive(Debug, Clone)]
pub struct SubmissionStamp {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub updated_by: String,
}

impl SubmissionStamp {
    /// Stamp for a submission happening now, authored by the session's
    /// display name
    pub fn now(updated_by: &str) -> Self {
        let now = Local::now();
        Self {
            date: now.date_naive(),
            time: now.time(),
            updated_by: updated_by.to_string(),
        }
    }

    fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    // The wire format carries no subseconds
    fn time_string(&self) -> String {
        self.time.format("%H:%M:%S").to_string()
    }
}
