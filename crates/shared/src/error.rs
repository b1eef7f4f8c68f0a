use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown by the detail view for any failed lookup.
pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    NetworkOrParseFailure,
}

#[derive(Debug, Clone, Error)]
#[error("{code:?}: {message}")]
pub struct CatalogError {
    pub code: ErrorCode,
    pub message: String,
}

impl CatalogError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn network_or_parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NetworkOrParseFailure, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Text the detail view surfaces to the user. Every failure kind maps to
    /// the same literal.
    pub fn user_message(&self) -> &'static str {
        NOT_FOUND_MESSAGE
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::network_or_parse(format!("malformed catalog payload: {value}"))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
