// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Target-side issue types.
//!
//! An [`Issue`] is built from a story by the mapper and handed to the sink.
//! Its notes are [`PendingNote`]s: most are plain text known up front, but
//! attachment notes only get their body once the files have been uploaded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Open/closed state of a target issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// Still in the workflow; a status label carries the detail.
    Open,
    /// Accepted in the source tracker.
    Closed,
}

impl IssueState {
    /// Returns the string representation used in display and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "open",
            IssueState::Closed => "closed",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow state of a source story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryState {
    Unstarted,
    Started,
    Finished,
    Delivered,
    Rejected,
    Accepted,
}

impl StoryState {
    /// Returns the source tracker's spelling of the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryState::Unstarted => "unstarted",
            StoryState::Started => "started",
            StoryState::Finished => "finished",
            StoryState::Delivered => "delivered",
            StoryState::Rejected => "rejected",
            StoryState::Accepted => "accepted",
        }
    }

    /// Human label used in the `Sts::` status label.
    pub fn label(&self) -> &'static str {
        match self {
            StoryState::Unstarted => "Unstarted",
            StoryState::Started => "Dev Started",
            StoryState::Finished => "Tl code review",
            StoryState::Delivered => "For deploy to prod",
            StoryState::Rejected => "Update post code review",
            StoryState::Accepted => "Closed",
        }
    }

    /// Returns the status label for open issues, `None` for accepted stories.
    pub fn status_label(&self) -> Option<String> {
        match self {
            StoryState::Accepted => None,
            other => Some(format!("Sts::{}", other.label())),
        }
    }
}

impl fmt::Display for StoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoryState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "unstarted" => Ok(StoryState::Unstarted),
            "started" => Ok(StoryState::Started),
            "finished" => Ok(StoryState::Finished),
            "delivered" => Ok(StoryState::Delivered),
            "rejected" => Ok(StoryState::Rejected),
            "accepted" => Ok(StoryState::Accepted),
            _ => Err(Error::UnknownStatus(s.to_string())),
        }
    }
}

/// A comment to be posted on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub author: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(author: Option<String>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Note {
            author,
            text: text.into(),
            created_at,
        }
    }

    /// Renders the note body, crediting the original author in bold.
    pub fn body(&self) -> String {
        match &self.author {
            Some(author) => format!("**{}**: {}", author, self.text),
            None => self.text.clone(),
        }
    }
}

/// A note whose body may still depend on uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PendingNote {
    /// Body fully known when the issue is built.
    Text(Note),
    /// Files in `dir` must be uploaded before the body can be rendered.
    Attachments {
        dir: PathBuf,
        created_at: DateTime<Utc>,
    },
}

impl PendingNote {
    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            PendingNote::Text(note) => note.created_at,
            PendingNote::Attachments { created_at, .. } => *created_at,
        }
    }

    /// Returns the attachment folder for deferred notes.
    pub fn attachments_dir(&self) -> Option<&Path> {
        match self {
            PendingNote::Text(_) => None,
            PendingNote::Attachments { dir, .. } => Some(dir),
        }
    }

    /// Turns the pending note into a postable one.
    ///
    /// Text notes pass through untouched; `render` is called once for an
    /// attachment folder and its output becomes the unauthored note body.
    pub fn resolve<E, F>(self, render: F) -> std::result::Result<Note, E>
    where
        F: FnOnce(&Path) -> std::result::Result<String, E>,
    {
        match self {
            PendingNote::Text(note) => Ok(note),
            PendingNote::Attachments { dir, created_at } => {
                Ok(Note::new(None, render(&dir)?, created_at))
            }
        }
    }
}

/// The target-side representation of one story.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// Remote issue id; `None` until the issue has been created remotely.
    pub id: Option<u64>,
    /// Target project reference (numeric id or `group/project` path).
    pub project: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic: Option<u64>,
    pub state: IssueState,
    /// Labels in insertion order; duplicates are kept.
    pub labels: Vec<String>,
    /// Source story id, kept for diagnostics.
    pub pivotal_id: String,
    pub notes: Vec<PendingNote>,
}

impl Issue {
    /// Creates an open, unlabelled issue with no notes.
    pub fn new(
        project: impl Into<String>,
        pivotal_id: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Issue {
            id: None,
            project: project.into(),
            title: title.into(),
            description: None,
            created_at,
            weight: None,
            epic: None,
            state: IssueState::Open,
            labels: Vec::new(),
            pivotal_id: pivotal_id.into(),
            notes: Vec::new(),
        }
    }

    /// Labels joined for APIs that take a comma-separated list.
    pub fn labels_csv(&self) -> String {
        self.labels.join(",")
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
