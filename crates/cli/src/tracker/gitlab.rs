// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! GitLab REST adapter.
//!
//! Blocking client for the handful of v4 endpoints the migration uses.
//! The project reference may be a numeric id or a `group/project` path; it
//! is always sent as a single encoded path segment.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{multipart, Client, Response};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{StatusCode, Url};
use serde::Serialize;

use super::{iso8601, CreatedIssue, NewIssue, RemoteError, RemoteResult, Tracker, UploadedFile};
use crate::error::{Error, Result};

const TOKEN_HEADER: &str = "PRIVATE-TOKEN";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Tracker backed by the GitLab REST API.
#[derive(Debug, Clone)]
pub struct GitlabClient {
    client: Client,
    endpoint: Url,
}

#[derive(Serialize)]
struct NoteBody<'a> {
    body: &'a str,
    created_at: String,
}

#[derive(Serialize)]
struct StateEvent {
    state_event: &'static str,
}

impl GitlabClient {
    /// Builds a client for `endpoint` (e.g. `https://gitlab.com/api/v4`).
    pub fn new(endpoint: &str, private_token: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid gitlab endpoint '{}': {}", endpoint, e)))?;

        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(private_token)
            .map_err(|e| Error::Config(format!("invalid private token header value: {}", e)))?;
        token.set_sensitive(true);
        headers.insert(TOKEN_HEADER, token);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(GitlabClient { client, endpoint })
    }

    /// Joins path segments onto the endpoint, encoding each one.
    pub fn url(&self, segments: &[&str]) -> RemoteResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::Transport(format!("endpoint cannot be a base: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn issue_url(&self, project: &str, iid: u64, rest: &[&str]) -> RemoteResult<Url> {
        let iid = iid.to_string();
        let mut segments = vec!["projects", project, "issues", iid.as_str()];
        segments.extend_from_slice(rest);
        self.url(&segments)
    }
}

impl Tracker for GitlabClient {
    fn create_issue(&mut self, project: &str, issue: &NewIssue) -> RemoteResult<CreatedIssue> {
        let url = self.url(&["projects", project, "issues"])?;
        let response = self.client.post(url).json(issue).send().map_err(transport)?;
        check_status(response)?.json().map_err(transport)
    }

    fn close_issue(&mut self, project: &str, iid: u64) -> RemoteResult<()> {
        let url = self.issue_url(project, iid, &[])?;
        let response = self
            .client
            .put(url)
            .json(&StateEvent {
                state_event: "close",
            })
            .send()
            .map_err(transport)?;
        check_status(response)?;
        Ok(())
    }

    fn create_note(
        &mut self,
        project: &str,
        iid: u64,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> RemoteResult<()> {
        let url = self.issue_url(project, iid, &["notes"])?;
        let note = NoteBody {
            body,
            created_at: iso8601(created_at),
        };
        let response = self.client.post(url).json(&note).send().map_err(transport)?;
        check_status(response)?;
        Ok(())
    }

    fn upload_file(&mut self, project: &str, path: &Path) -> RemoteResult<UploadedFile> {
        let url = self.url(&["projects", project, "uploads"])?;
        let form = multipart::Form::new().file("file", path)?;
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(transport)?;
        check_status(response)?.json().map_err(transport)
    }
}

fn transport(e: reqwest::Error) -> RemoteError {
    RemoteError::Transport(e.to_string())
}

/// Maps non-success responses to errors, keeping the body as the message.
fn check_status(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(status_error(status, body))
}

pub(crate) fn status_error(status: StatusCode, body: String) -> RemoteError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return RemoteError::RateLimited;
    }
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown").to_string()
    } else {
        body
    };
    RemoteError::Status {
        code: status.as_u16(),
        message,
    }
}

#[cfg(test)]
#[path = "gitlab_tests.rs"]
mod tests;
