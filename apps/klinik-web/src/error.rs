//! # Page Error Type
//!
//! Unified error type for page handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Klinik Sehat                           │
//! │                                                                         │
//! │  Browser                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  GET /data                                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Page Handler                                                    │  │
//! │  │  PageResult<Html<String>>                                        │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  File corrupt? ──── StoreError::Malformed ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Bad input? ─────── CoreError::Validation ──────► PageError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── HTML page with a red notice box and the matching HTTP status    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Expected outcomes (missing fields, unreadable QR, unknown code) are NOT
//! errors. Handlers render those as notices with status 200.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use klinik_core::CoreError;
use klinik_qr::QrError;
use klinik_store::StoreError;

use crate::render;

/// Error returned from page handlers.
#[derive(Debug, Clone, Error)]
#[error("[{code:?}] {message}")]
pub struct PageError {
    /// Machine-readable category, decides the HTTP status.
    pub code: ErrorCode,

    /// Message shown in the error box.
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown page or medicine code (404)
    NotFound,

    /// Form input rejected (400)
    ValidationError,

    /// Inventory or scan log file unreadable (500)
    StorageError,

    /// QR rendering or image handling failed (500)
    QrError,

    /// Capture device missing or failed (503)
    CameraUnavailable,

    /// Malformed request body (400)
    BadRequest,

    /// Anything else (500)
    Internal,
}

impl ErrorCode {
    /// Wire name, as shown in the error box.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::QrError => "QR_ERROR",
            ErrorCode::CameraUnavailable => "CAMERA_UNAVAILABLE",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError | ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::CameraUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::StorageError | ErrorCode::QrError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl PageError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        PageError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        PageError::new(ErrorCode::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        PageError::new(ErrorCode::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PageError::new(ErrorCode::Internal, message)
    }
}

/// Converts store errors. A corrupt inventory file must be visible to staff.
impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Storage failure");
        match err {
            StoreError::Malformed { .. } => PageError::new(
                ErrorCode::StorageError,
                format!("File data obat rusak: {err}"),
            ),
            StoreError::Csv(_) | StoreError::Io(_) => PageError::new(
                ErrorCode::StorageError,
                format!("Gagal membaca/menulis file: {err}"),
            ),
        }
    }
}

impl From<CoreError> for PageError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MedicineNotFound(_) => PageError::not_found("Data obat tidak ditemukan"),
            CoreError::Validation(e) => PageError::new(ErrorCode::ValidationError, e.to_string()),
        }
    }
}

impl From<QrError> for PageError {
    fn from(err: QrError) -> Self {
        match err {
            QrError::CameraUnavailable(reason) => PageError::new(
                ErrorCode::CameraUnavailable,
                format!("Kamera tidak tersedia: {reason}"),
            ),
            QrError::InvalidCode(reason) => PageError::new(ErrorCode::ValidationError, reason),
            other => {
                tracing::error!(error = %other, "QR failure");
                PageError::new(ErrorCode::QrError, other.to_string())
            }
        }
    }
}

impl From<MultipartError> for PageError {
    fn from(err: MultipartError) -> Self {
        PageError::bad_request(format!("Upload gagal: {}", err.body_text()))
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let body = render::error_page(&self);
        (self.code.status(), body).into_response()
    }
}

/// Result type for page handlers.
pub type PageResult<T> = Result<T, PageError>;

// =============================================================================
// Startup Errors
// =============================================================================

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
