// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Story to issue mapping.
//!
//! Mapping is pure: the same story and target references always produce the
//! same [`Issue`]. Label and note order is significant and fixed:
//!
//! 1. metadata table note (always first)
//! 2. status label, unless the story was accepted
//! 3. `piv:id:<id>` identity label
//! 4. one `piv:<label>` per source label
//! 5. attachments note, if the story has files
//! 6. one note per comment, each nudged `index + 1` seconds later so
//!    comments sharing a date keep their order

use chrono::Duration;

use crate::error::Result;
use crate::issue::{Issue, IssueState, Note, PendingNote, StoryState};
use crate::story::StoryRecord;

/// Prefix applied to every label carried over from the source tracker.
pub const LABEL_PREFIX: &str = "piv:";

/// Target references shared by every story in one migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryMapper {
    project: String,
    epic: Option<u64>,
}

impl StoryMapper {
    pub fn new(project: impl Into<String>, epic: Option<u64>) -> Self {
        StoryMapper {
            project: project.into(),
            epic,
        }
    }

    /// Builds the issue for one story.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownStatus`] when the story's state is
    /// missing or not in the status vocabulary.
    pub fn map(&self, story: &StoryRecord) -> Result<Issue> {
        let title = story
            .title
            .clone()
            .unwrap_or_else(|| format!("Pivotal story {}", story.id));
        let mut issue = Issue::new(&self.project, &story.id, title, story.created_at);
        issue.description = story.description.clone();
        issue.weight = story
            .estimate
            .as_deref()
            .and_then(|e| e.trim().parse().ok());
        issue.epic = self.epic;

        issue.notes.push(PendingNote::Text(Note::new(
            None,
            metadata_table(story),
            story.created_at,
        )));

        let state: StoryState = story.current_state.as_deref().unwrap_or_default().parse()?;
        match state.status_label() {
            Some(label) => {
                issue.state = IssueState::Open;
                issue.labels.push(label);
            }
            None => issue.state = IssueState::Closed,
        }

        issue.labels.push(format!("{}id:{}", LABEL_PREFIX, story.id));
        if let Some(labels) = &story.labels {
            issue.labels.extend(split_labels(labels));
        }

        if let Some(dir) = &story.attachments {
            issue.notes.push(PendingNote::Attachments {
                dir: dir.clone(),
                created_at: story.created_at,
            });
        }

        for (idx, comment) in story.comments.iter().enumerate() {
            let base = comment.created_at.unwrap_or(story.created_at);
            let offset = Duration::seconds(idx as i64 + 1);
            issue.notes.push(PendingNote::Text(Note::new(
                comment.author.clone(),
                comment.text.clone(),
                base + offset,
            )));
        }

        Ok(issue)
    }
}

/// Splits a comma-separated label string into prefixed labels.
pub fn split_labels(labels: &str) -> impl Iterator<Item = String> + '_ {
    labels
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("{}{}", LABEL_PREFIX, piece))
}

/// Renders the fields with no target-side home as a Markdown table.
pub fn metadata_table(story: &StoryRecord) -> String {
    let accepted_at = story.accepted_at.map(|dt| dt.to_rfc3339());
    let owners = (!story.owners.is_empty()).then(|| story.owners.join(", "));

    let rows = [
        ("id", Some(story.id.as_str())),
        ("type", story.story_type.as_deref()),
        ("requested_by", story.requested_by.as_deref()),
        ("accepted_at", accepted_at.as_deref()),
        ("url", story.url.as_deref()),
        ("owned_by", owners.as_deref()),
    ];

    let mut table = String::from("| Field | Value |\n| --- | --- |\n");
    for (name, value) in rows {
        let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        table.push_str(&format!("| {} | {} |\n", name, escape_cell(value)));
    }
    table
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
#[path = "mapper_tests.rs"]
mod tests;
