// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory tracker for sink and command tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{CreatedIssue, NewIssue, RemoteError, RemoteResult, Tracker, UploadedFile};
use crate::retry::Sleeper;

/// A remote call as seen by [`MockTracker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateIssue {
        project: String,
        issue: NewIssue,
    },
    CloseIssue {
        project: String,
        iid: u64,
    },
    CreateNote {
        project: String,
        iid: u64,
        body: String,
        created_at: DateTime<Utc>,
    },
    UploadFile {
        project: String,
        path: PathBuf,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::CreateIssue { .. } => "create_issue",
            Call::CloseIssue { .. } => "close_issue",
            Call::CreateNote { .. } => "create_note",
            Call::UploadFile { .. } => "upload_file",
        }
    }
}

/// Records every call and replays scripted failures per operation.
///
/// Each call first pops the next scripted failure for its operation, if
/// any; otherwise it succeeds. Issue ids count up from 1.
#[derive(Debug, Default)]
pub struct MockTracker {
    pub calls: Vec<Call>,
    failures: HashMap<&'static str, VecDeque<RemoteError>>,
    next_iid: u64,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a failure for the next call to `operation`.
    pub fn fail_next(&mut self, operation: &'static str, error: RemoteError) {
        self.failures.entry(operation).or_default().push_back(error);
    }

    /// Names of recorded calls, in order.
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.iter().map(Call::name).collect()
    }

    /// Bodies of the notes created so far.
    pub fn note_bodies(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::CreateNote { body, .. } => Some(body.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: Call) -> RemoteResult<()> {
        let name = call.name();
        self.calls.push(call);
        match self.failures.get_mut(name).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Tracker for MockTracker {
    fn create_issue(&mut self, project: &str, issue: &NewIssue) -> RemoteResult<CreatedIssue> {
        self.record(Call::CreateIssue {
            project: project.to_string(),
            issue: issue.clone(),
        })?;
        self.next_iid += 1;
        Ok(CreatedIssue { iid: self.next_iid })
    }

    fn close_issue(&mut self, project: &str, iid: u64) -> RemoteResult<()> {
        self.record(Call::CloseIssue {
            project: project.to_string(),
            iid,
        })
    }

    fn create_note(
        &mut self,
        project: &str,
        iid: u64,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> RemoteResult<()> {
        self.record(Call::CreateNote {
            project: project.to_string(),
            iid,
            body: body.to_string(),
            created_at,
        })
    }

    fn upload_file(&mut self, project: &str, path: &Path) -> RemoteResult<UploadedFile> {
        self.record(Call::UploadFile {
            project: project.to_string(),
            path: path.to_path_buf(),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(UploadedFile {
            url: format!("/uploads/{}", name),
            markdown: format!("[{}](/uploads/{})", name, name),
            alt: name,
        })
    }
}

/// Sleeper that only records the requested durations.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pub slept: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn count(&self) -> usize {
        self.slept.borrow().len()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.borrow_mut().push(duration);
    }
}
