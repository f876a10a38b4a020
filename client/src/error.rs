//! Error handling for the POS back-office client
//!
//! Provides consistent error messages in Thai and English. Nothing here is
//! fatal to the host process: every variant resolves to a blocked action,
//! a retryable notification, or a redirect to the login view.

use serde::Serialize;
use thiserror::Error;

use shared::models::SheetError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Session errors: all of these send the user back to the login view
    #[error("No session")]
    SessionMissing,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Local validation errors: the action is blocked before any network call
    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("Outside the work site geofence: {distance_m:.0} m away, allowed {allowed_m:.0} m")]
    OutsideGeofence { distance_m: f64, allowed_m: f64 },

    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_th: String,
    },

    // Network errors: local state is preserved for a manual retry
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: u16, body: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    // Internal errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

/// Error payload handed to the UI layer
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_th: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// Bilingual detail for rendering
    pub fn detail(&self) -> ErrorDetail {
        match self {
            AppError::SessionMissing => ErrorDetail {
                code: "SESSION_MISSING".to_string(),
                message_en: "Please sign in to continue".to_string(),
                message_th: "กรุณาเข้าสู่ระบบก่อนใช้งาน".to_string(),
                field: None,
            },
            AppError::SessionExpired => ErrorDetail {
                code: "SESSION_EXPIRED".to_string(),
                message_en: "Your session has expired, please sign in again".to_string(),
                message_th: "เซสชันหมดอายุแล้ว กรุณาเข้าสู่ระบบใหม่".to_string(),
                field: None,
            },
            AppError::InvalidToken(msg) => ErrorDetail {
                code: "INVALID_TOKEN".to_string(),
                message_en: format!("Invalid token: {}", msg),
                message_th: "โทเค็นไม่ถูกต้อง".to_string(),
                field: None,
            },
            AppError::InvalidCredentials => ErrorDetail {
                code: "INVALID_CREDENTIALS".to_string(),
                message_en: "Invalid username or password".to_string(),
                message_th: "ชื่อผู้ใช้หรือรหัสผ่านไม่ถูกต้อง".to_string(),
                field: None,
            },
            AppError::Sheet(err) => ErrorDetail {
                code: "SHEET_INVALID".to_string(),
                message_en: err.to_string(),
                message_th: err.message_th(),
                field: None,
            },
            AppError::OutsideGeofence {
                distance_m,
                allowed_m,
            } => ErrorDetail {
                code: "OUTSIDE_GEOFENCE".to_string(),
                message_en: format!(
                    "You are {:.0} m from the work site (allowed {:.0} m)",
                    distance_m, allowed_m
                ),
                message_th: format!(
                    "คุณอยู่ห่างจากสาขา {:.0} เมตร (อนุญาต {:.0} เมตร)",
                    distance_m, allowed_m
                ),
                field: None,
            },
            AppError::Validation {
                field,
                message,
                message_th,
            } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message_en: message.clone(),
                message_th: message_th.clone(),
                field: Some(field.clone()),
            },
            AppError::Http(err) => ErrorDetail {
                code: "NETWORK_ERROR".to_string(),
                message_en: format!("Request failed: {}", err),
                message_th: "การเชื่อมต่อล้มเหลว กรุณาลองใหม่".to_string(),
                field: None,
            },
            AppError::Api { status, body } => ErrorDetail {
                code: "API_ERROR".to_string(),
                message_en: format!("Server responded {}: {}", status, body),
                message_th: format!("เซิร์ฟเวอร์ตอบกลับผิดพลาด ({})", status),
                field: None,
            },
            AppError::Decode(msg) => ErrorDetail {
                code: "DECODE_ERROR".to_string(),
                message_en: format!("Unexpected response shape: {}", msg),
                message_th: "รูปแบบข้อมูลจากเซิร์ฟเวอร์ไม่ถูกต้อง".to_string(),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message_en: format!("Configuration error: {}", msg),
                message_th: "เกิดข้อผิดพลาดในการตั้งค่า".to_string(),
                field: None,
            },
            AppError::Internal(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message_en: "An internal error occurred".to_string(),
                message_th: "เกิดข้อผิดพลาดภายในระบบ".to_string(),
                field: None,
            },
        }
    }

    /// Whether the UI should clear local session state and show the
    /// login view
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            AppError::SessionMissing
                | AppError::SessionExpired
                | AppError::InvalidToken(_)
                | AppError::InvalidCredentials
        )
    }

    /// Whether local state was preserved and a manual retry can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::Api { .. })
    }
}

/// Result type alias for client operations
pub type AppResult<T> = Result<T, AppError>;
