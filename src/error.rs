use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Malformed encoded polyline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("polyline truncated at byte {position}: continuation bit still set")]
    Truncated { position: usize },

    #[error("invalid polyline character {character:?} at byte {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("polyline value at byte {position} is larger than any coordinate delta")]
    Overflow { position: usize },

    #[error("invalid polyline: {0}")]
    Invalid(String),
}

/// A path that cannot be sampled.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("path needs at least 2 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("path length is degenerate: {length_meters}")]
    DegenerateLength { length_meters: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Network failure or timeout
    Transport,
    /// Response body could not be parsed
    BadResponse,
    /// Upstream answered with status >= 400 (or nothing usable)
    Upstream,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderErrorKind::Transport => write!(f, "transport"),
            ProviderErrorKind::BadResponse => write!(f, "bad response"),
            ProviderErrorKind::Upstream => write!(f, "upstream"),
        }
    }
}

/// Failure of a routing or place search collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{provider} {kind} error: {detail}")]
pub struct ProviderError {
    pub provider: &'static str,
    pub kind: ProviderErrorKind,
    pub detail: String,
}

impl ProviderError {
    pub fn transport(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Transport, detail)
    }

    pub fn bad_response(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::BadResponse, detail)
    }

    pub fn upstream(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::new(provider, ProviderErrorKind::Upstream, detail)
    }

    fn new(provider: &'static str, kind: ProviderErrorKind, detail: impl Into<String>) -> Self {
        ProviderError {
            provider,
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Polyline decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Decode(ref e) => {
                tracing::error!("Route polyline could not be decoded: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service returned an invalid path".to_string())
            }
            AppError::Geometry(ref e) => {
                tracing::warn!("Route geometry unusable: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Provider(ref e) => {
                tracing::error!(
                    provider = e.provider,
                    kind = %e.kind,
                    "Provider error: {}",
                    e.detail
                );
                (StatusCode::BAD_GATEWAY, format!("{} service error", e.provider))
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::Timeout(ref e) => {
                tracing::warn!("Request timed out: {}", e);
                (StatusCode::GATEWAY_TIMEOUT, e.clone())
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
