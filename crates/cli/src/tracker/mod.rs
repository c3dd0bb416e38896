// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote tracker port.
//!
//! The sink talks to the target service only through [`Tracker`], which
//! keeps the migration logic testable with an in-memory fake. The GitLab
//! REST adapter lives in [`gitlab`].

pub mod gitlab;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use ferry_core::Issue;
use serde::{Deserialize, Serialize};

pub use gitlab::GitlabClient;

/// Error type for remote calls.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The service asked us to slow down (HTTP 429).
    #[error("rate limited")]
    RateLimited,

    /// Any other non-success response.
    #[error("status {code}: {message}")]
    Status { code: u16, message: String },

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// A local file needed by the request could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, RemoteError::RateLimited)
    }
}

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Attributes sent when creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO-8601, second precision.
    pub created_at: String,
    /// Comma-joined, in mapping order.
    pub labels: String,
    #[serde(rename = "epic_id", skip_serializing_if = "Option::is_none")]
    pub epic: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl From<&Issue> for NewIssue {
    fn from(issue: &Issue) -> Self {
        NewIssue {
            title: issue.title.clone(),
            description: issue.description.clone(),
            created_at: iso8601(issue.created_at),
            labels: issue.labels_csv(),
            epic: issue.epic,
            weight: issue.weight,
        }
    }
}

/// The part of a created issue the sink needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CreatedIssue {
    pub iid: u64,
}

/// A file stored by the service, ready to be linked from Markdown.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedFile {
    /// Display name.
    pub alt: String,
    #[serde(default)]
    pub url: String,
    /// Snippet that embeds or links the file.
    pub markdown: String,
}

/// Operations the migration needs from the target service.
pub trait Tracker {
    fn create_issue(&mut self, project: &str, issue: &NewIssue) -> RemoteResult<CreatedIssue>;

    fn close_issue(&mut self, project: &str, iid: u64) -> RemoteResult<()>;

    fn create_note(
        &mut self,
        project: &str,
        iid: u64,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> RemoteResult<()>;

    fn upload_file(&mut self, project: &str, path: &Path) -> RemoteResult<UploadedFile>;
}

/// Formats a timestamp the way the service expects it.
pub fn iso8601(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
