//! Error types for the trippy API client.
//!
//! # Design
//! Every failure the UI can see collapses to the same contract: a message, a
//! short code, and optional structured details (`ErrorPayload`). Network and
//! timeout failures are kept apart from server responses because only the
//! former are eligible for the warmup retry. `NotFound` is synthesized
//! locally when a mock lookup misses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error - please check your connection";

/// Errors returned by the client, services, and hooks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request was sent but no response arrived.
    #[error("{message}")]
    Network { message: String },

    /// The request exceeded the configured timeout.
    #[error("{message}")]
    Timeout { message: String },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    /// A mock lookup found no entity with this id.
    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// The wire/UI shape of an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorPayload {
    pub message: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn network() -> Self {
        ApiError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn timeout(ms: u128) -> Self {
        ApiError::Timeout {
            message: format!("timeout of {ms}ms exceeded"),
        }
    }

    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Timeouts and connection failures: the backend may be asleep.
    pub fn is_network_class(&self) -> bool {
        matches!(self, ApiError::Network { .. } | ApiError::Timeout { .. })
    }

    pub fn code(&self) -> String {
        match self {
            ApiError::Network { .. } => "NETWORK_ERROR".to_string(),
            ApiError::Timeout { .. } => "ECONNABORTED".to_string(),
            ApiError::Status { status, .. } => status.to_string(),
            ApiError::NotFound { .. } => "NOT_FOUND".to_string(),
            ApiError::Deserialization(_) => "DESERIALIZATION_ERROR".to_string(),
            ApiError::Serialization(_) => "SERIALIZATION_ERROR".to_string(),
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn details(&self) -> Option<&Value> {
        match self {
            ApiError::Status { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            message: self.message(),
            code: self.code(),
            details: self.details().cloned(),
        }
    }
}

impl From<&ApiError> for ErrorPayload {
    fn from(err: &ApiError) -> Self {
        err.to_payload()
    }
}
