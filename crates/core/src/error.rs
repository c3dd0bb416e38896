// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ferry-core operations.

use thiserror::Error;

/// All possible errors that can occur while reading or mapping an export.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    #[error("unknown story state: '{0}'\n  hint: known states are: unstarted, started, finished, delivered, rejected, accepted")]
    UnknownStatus(String),

    #[error("invalid timestamp '{value}'\n  hint: expected RFC 3339, YYYY-MM-DD, or 'Mon D, YYYY'")]
    InvalidTimestamp { value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for ferry-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
