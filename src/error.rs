use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::types::FailureKind;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures of the market-data collaborator.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Status(u16),

    #[error("provider error: {code} - {description}")]
    Api { code: String, description: String },

    #[error("empty response: {0}")]
    EmptyResponse(&'static str),

    #[error("no data for symbol {0}")]
    MissingSymbol(String),
}

/// Failures while turning price series into a signal.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("insufficient data: need {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("numeric result undefined: {0}")]
    NumericUndefined(&'static str),
}

impl SignalError {
    /// Coarse failure category reported on sentinel records.
    pub fn kind(&self) -> FailureKind {
        match self {
            SignalError::Source(_) | SignalError::InsufficientData { .. } => {
                FailureKind::DataUnavailable
            }
            SignalError::NumericUndefined(_) => FailureKind::NumericUndefined,
        }
    }

    pub(crate) fn require(required: usize, actual: usize) -> std::result::Result<(), Self> {
        if actual < required {
            Err(SignalError::InsufficientData { required, actual })
        } else {
            Ok(())
        }
    }
}
