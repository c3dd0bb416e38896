// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::tracker::RemoteError;

/// All possible errors that can occur while migrating an export.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] ferry_core::Error),

    #[error("issue for story {pivotal_id} has not been created yet\n  hint: notes and state changes need the remote issue id")]
    NotPersisted { pivotal_id: String },

    #[error("{operation} failed after {attempts} attempts: rate limited\n  hint: raise [retry] max_attempts or cooldown_secs in the config")]
    MaxRetriesExceeded { operation: String, attempts: u32 },

    #[error("{operation} failed: {source}")]
    Remote {
        operation: String,
        #[source]
        source: RemoteError,
    },

    #[error("story {id}: {source}")]
    Story {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
