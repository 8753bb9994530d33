//! Error types for taskdesk
//!
//! HTTP status per class:
//! - 401: login failures, missing/expired session
//! - 403: operation refused for the caller's role
//! - 404: unknown task id
//! - 422: rejected input (unknown status literal, malformed field)
//! - 500: storage and serialization failures

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taskdesk operations
#[derive(Error, Debug)]
pub enum Error {
    // Login failures (401)
    #[error("Email not found in user table: {0}")]
    UnauthorizedEmail(String),

    #[error("Wrong password for {0}")]
    InvalidPassword(String),

    #[error("Use a company email ({0})")]
    DomainMismatch(String),

    #[error("Not logged in or session expired")]
    NotLoggedIn,

    // Permission refusals (403)
    #[error("{role} may not {action}")]
    Forbidden { role: String, action: String },

    // Lookup failures (404)
    #[error("No task with id {0}")]
    TaskNotFound(i64),

    // Rejected input (422)
    #[error("Unrecognized status: {0}")]
    UnknownStatus(String),

    #[error("Invalid field value: {0}")]
    InvalidField(String),

    // Startup preconditions
    #[error("User file not found: {0} (it must be provisioned externally)")]
    UserFileMissing(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Storage failures (500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),

    #[error("Table column missing: {0}")]
    ColumnMissing(String),
}

impl Error {
    /// HTTP status code surfaced by the API layer for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Error::UnauthorizedEmail(_)
            | Error::InvalidPassword(_)
            | Error::DomainMismatch(_)
            | Error::NotLoggedIn => 401,

            Error::Forbidden { .. } => 403,

            Error::TaskNotFound(_) => 404,

            Error::UnknownStatus(_) | Error::InvalidField(_) => 422,

            Error::UserFileMissing(_)
            | Error::InvalidConfig(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::LockFailed(_)
            | Error::ColumnMissing(_) => 500,
        }
    }
}

/// Result type alias for taskdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for returning errors as a JSON body
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub status: u16,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            status: err.http_status(),
        }
    }
}
