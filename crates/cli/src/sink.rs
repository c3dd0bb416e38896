// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persists mapped issues against the remote tracker.
//!
//! One issue is written as: create the issue, post each note in order,
//! then close it if the story was accepted. Every remote call goes through
//! the retry policy; only rate limiting is retried.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ferry_core::{Issue, IssueState, PendingNote};

use crate::error::{Error, Result};
use crate::retry::{with_retry, RetryError, RetryPolicy, Sleeper, ThreadSleeper};
use crate::tracker::{NewIssue, RemoteError, RemoteResult, Tracker};

/// Separator between per-file snippets in an attachments note.
const ATTACHMENT_SEPARATOR: &str = "\n\n---\n\n";

pub struct MigrationSink<T, S = ThreadSleeper> {
    tracker: T,
    policy: RetryPolicy,
    sleeper: S,
}

impl<T: Tracker> MigrationSink<T> {
    pub fn new(tracker: T, policy: RetryPolicy) -> Self {
        MigrationSink::with_sleeper(tracker, policy, ThreadSleeper)
    }
}

impl<T: Tracker, S: Sleeper> MigrationSink<T, S> {
    pub fn with_sleeper(tracker: T, policy: RetryPolicy, sleeper: S) -> Self {
        MigrationSink {
            tracker,
            policy,
            sleeper,
        }
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Writes the whole issue: create, notes in order, then close.
    ///
    /// Stops at the first error; anything already created stays on the
    /// remote side.
    pub fn persist(&mut self, issue: &mut Issue) -> Result<()> {
        let iid = self.create_issue(issue)?;
        tracing::info!(story = %issue.pivotal_id, iid, "created issue");

        for note in issue.notes.clone() {
            self.persist_note(issue, note)?;
        }

        if issue.state == IssueState::Closed {
            self.close_issue(issue)?;
        }
        Ok(())
    }

    /// Creates the remote issue and records its id on `issue`.
    pub fn create_issue(&mut self, issue: &mut Issue) -> Result<u64> {
        let new = NewIssue::from(&*issue);
        let project = issue.project.clone();
        let created = self.call("create issue", |t| t.create_issue(&project, &new))?;
        issue.id = Some(created.iid);
        Ok(created.iid)
    }

    /// Posts one note, uploading attachment files first if needed.
    ///
    /// An attachments note with nothing to upload is skipped; text notes are
    /// always posted, even when only the author line remains.
    pub fn persist_note(&mut self, issue: &Issue, note: PendingNote) -> Result<()> {
        let iid = require_id(issue)?;
        let is_attachments = note.attachments_dir().is_some();
        let note = note.resolve(|dir| self.resolve_attachments(&issue.project, dir))?;

        if is_attachments && note.text.is_empty() {
            tracing::debug!(story = %issue.pivotal_id, "no attachments to post");
            return Ok(());
        }

        let body = note.body();
        tracing::debug!(story = %issue.pivotal_id, iid, created_at = %note.created_at, "creating note");
        self.call("create note", |t| {
            t.create_note(&issue.project, iid, &body, note.created_at)
        })
    }

    pub fn close_issue(&mut self, issue: &Issue) -> Result<()> {
        let iid = require_id(issue)?;
        self.call("close issue", |t| t.close_issue(&issue.project, iid))?;
        tracing::info!(story = %issue.pivotal_id, iid, "closed issue");
        Ok(())
    }

    /// Uploads every file in `dir` and renders the attachments note body.
    ///
    /// Files are taken in name order. A missing or empty folder renders as
    /// an empty body.
    pub fn resolve_attachments(&mut self, project: &str, dir: &Path) -> Result<String> {
        let files = list_files(dir)?;
        let mut snippets = Vec::with_capacity(files.len());

        for path in files {
            tracing::info!(file = %path.display(), "uploading attachment");
            let uploaded = self.call("upload file", |t| t.upload_file(project, &path))?;
            snippets.push(format!("{}\n{}", uploaded.alt, uploaded.markdown));
        }

        Ok(snippets.join(ATTACHMENT_SEPARATOR))
    }

    fn call<R, F>(&mut self, operation: &str, mut f: F) -> Result<R>
    where
        F: FnMut(&mut T) -> RemoteResult<R>,
    {
        let tracker = &mut self.tracker;
        with_retry(
            &self.policy,
            &self.sleeper,
            operation,
            RemoteError::is_rate_limited,
            || f(tracker),
        )
        .map_err(|e| match e {
            RetryError::Exhausted { attempts, .. } => Error::MaxRetriesExceeded {
                operation: operation.to_string(),
                attempts,
            },
            RetryError::Fatal(source) => Error::Remote {
                operation: operation.to_string(),
                source,
            },
        })
    }
}

fn require_id(issue: &Issue) -> Result<u64> {
    issue.id.ok_or_else(|| Error::NotPersisted {
        pivotal_id: issue.pivotal_id.clone(),
    })
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "sink_tests.rs"]
mod tests;
