// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw story records as read from a Pivotal Tracker CSV export.

use std::path::PathBuf;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use crate::timestamp::parse_date;

// Trailing "(Author Name - Jan 5, 2021)" signature appended by the exporter.
static SIGNATURE_RE: LazyLock<Regex> =
    LazyLock::new(
        || match Regex::new(r"\(([^()]+) - (\w{3} \d{1,2}, \d{4})\)$") {
            Ok(re) => re,
            Err(_) => unreachable!("static regex pattern"),
        },
    );

/// One story row from the export, with repeated columns collected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryRecord {
    /// Source story identifier. Always non-empty.
    pub id: String,
    pub title: Option<String>,
    /// Raw comma-separated label string.
    pub labels: Option<String>,
    pub story_type: Option<String>,
    pub estimate: Option<String>,
    pub current_state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub requested_by: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    /// Owner names in physical column order.
    pub owners: Vec<String>,
    /// Comments in physical column order.
    pub comments: Vec<Comment>,
    /// Non-empty attachment folder for this story, if one was found.
    pub attachments: Option<PathBuf>,
}

impl StoryRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        StoryRecord {
            id: id.into(),
            title: None,
            labels: None,
            story_type: None,
            estimate: None,
            current_state: None,
            created_at,
            accepted_at: None,
            requested_by: None,
            description: None,
            url: None,
            owners: Vec::new(),
            comments: Vec::new(),
            attachments: None,
        }
    }
}

/// A single comment cell, split into body and exporter signature.
///
/// A trailing parenthetical only counts as a signature when its date parses;
/// `(Jane Doe - Foo 5, 2021)` stays part of the text and leaves the comment
/// unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub text: String,
}

impl Comment {
    /// Parses a raw comment cell.
    ///
    /// When the cell ends with `(Name - Mon D, YYYY)` the signature is removed
    /// from the text and captured as author and date. Otherwise the whole cell
    /// becomes the text.
    pub fn parse(cell: &str) -> Self {
        if let Some(caps) = SIGNATURE_RE.captures(cell) {
            if let (Some(whole), Some(author), Some(date)) = (caps.get(0), caps.get(1), caps.get(2))
            {
                if let Some(created_at) = parse_date(date.as_str()) {
                    return Comment {
                        author: Some(author.as_str().to_string()),
                        created_at: Some(created_at),
                        text: cell[..whole.start()].to_string(),
                    };
                }
            }
        }

        Comment {
            author: None,
            created_at: None,
            text: cell.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "story_tests.rs"]
mod tests;
