// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Streaming reader for Pivotal Tracker CSV exports.
//!
//! The export has two kinds of columns. Most fields occupy exactly one
//! physical column. `Owned By` and `Comment` are repeated: the exporter emits
//! the same header once per value slot, so a story with three comments has
//! (at least) three `Comment` columns. The reader maps every header to a
//! [`Field`] once, then folds each row into a [`StoryRecord`].
//!
//! Rows are produced lazily. A malformed row yields an
//! [`Error::MalformedRecord`] for that row only; the caller decides whether to
//! keep iterating.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};

use crate::error::{Error, Result};
use crate::story::{Comment, StoryRecord};
use crate::timestamp::parse_timestamp;

/// Canonical export columns understood by the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Title,
    Labels,
    Type,
    Estimate,
    CurrentState,
    CreatedAt,
    AcceptedAt,
    RequestedBy,
    Description,
    Url,
    OwnedBy,
    Comment,
}

impl Field {
    /// Maps a header cell to a field, ignoring case, punctuation, and spacing.
    ///
    /// Returns `None` for columns the migration does not use (e.g. `Iteration`,
    /// `Task`, `Blocker`).
    pub fn from_header(header: &str) -> Option<Field> {
        match normalize_header(header).as_str() {
            "id" => Some(Field::Id),
            "title" => Some(Field::Title),
            "labels" => Some(Field::Labels),
            "type" => Some(Field::Type),
            "estimate" => Some(Field::Estimate),
            "current_state" => Some(Field::CurrentState),
            "created_at" => Some(Field::CreatedAt),
            "accepted_at" => Some(Field::AcceptedAt),
            "requested_by" => Some(Field::RequestedBy),
            "description" => Some(Field::Description),
            "url" => Some(Field::Url),
            "owned_by" => Some(Field::OwnedBy),
            "comment" => Some(Field::Comment),
            _ => None,
        }
    }

    /// Returns true for fields whose header repeats across several columns.
    pub fn is_repeated(&self) -> bool {
        matches!(self, Field::OwnedBy | Field::Comment)
    }
}

// "Current State" -> "current_state", "Created at" -> "created_at"
fn normalize_header(header: &str) -> String {
    let cleaned: String = header
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect::<String>()
        .to_lowercase();
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Lazy, single-pass iterator over the stories in an export.
pub struct ExportReader<R: Read> {
    records: StringRecordsIntoIter<R>,
    fields: Vec<Option<Field>>,
    attachments_root: Option<PathBuf>,
    row: usize,
}

impl ExportReader<File> {
    /// Opens an export file.
    ///
    /// `attachments_root` is the folder holding one subfolder per story id;
    /// pass `None` when the export has no attachments.
    pub fn open(path: &Path, attachments_root: Option<&Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file, attachments_root.map(Path::to_path_buf))
    }
}

impl<R: Read> ExportReader<R> {
    /// Creates a reader over any byte source containing the CSV export.
    pub fn from_reader(reader: R, attachments_root: Option<PathBuf>) -> Result<Self> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let fields = csv.headers()?.iter().map(Field::from_header).collect();

        Ok(ExportReader {
            records: csv.into_records(),
            fields,
            attachments_root,
            row: 0,
        })
    }

    fn build_record(&self, record: &StringRecord) -> Result<StoryRecord> {
        let mut raw = RawRow::default();

        for (idx, cell) in record.iter().enumerate() {
            let Some(Some(field)) = self.fields.get(idx) else {
                continue;
            };
            if field.is_repeated() {
                if cell.trim().is_empty() {
                    continue;
                }
                match field {
                    Field::OwnedBy => raw.owners.push(cell.to_string()),
                    _ => raw.comments.push(Comment::parse(cell)),
                }
            } else {
                raw.set(*field, cell);
            }
        }

        let id = raw
            .id
            .take()
            .ok_or_else(|| self.malformed("missing story id".to_string()))?;
        let created_at = match raw.created_at.take() {
            Some(value) => parse_timestamp(&value)
                .map_err(|_| self.malformed(format!("invalid created_at '{}'", value)))?,
            None => return Err(self.malformed(format!("story {} has no created_at", id))),
        };
        let accepted_at = match raw.accepted_at.take() {
            Some(value) => Some(
                parse_timestamp(&value)
                    .map_err(|_| self.malformed(format!("invalid accepted_at '{}'", value)))?,
            ),
            None => None,
        };
        let attachments = self.attachments_for(&id)?;

        Ok(StoryRecord {
            id,
            title: raw.title,
            labels: raw.labels,
            story_type: raw.story_type,
            estimate: raw.estimate,
            current_state: raw.current_state,
            created_at,
            accepted_at,
            requested_by: raw.requested_by,
            description: raw.description,
            url: raw.url,
            owners: raw.owners,
            comments: raw.comments,
            attachments,
        })
    }

    fn attachments_for(&self, id: &str) -> Result<Option<PathBuf>> {
        let Some(root) = &self.attachments_root else {
            return Ok(None);
        };
        let dir = root.join(id);
        if !dir.is_dir() {
            return Ok(None);
        }
        let has_files = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .any(|entry| entry.path().is_file());
        Ok(has_files.then_some(dir))
    }

    fn malformed(&self, reason: String) -> Error {
        Error::MalformedRecord {
            row: self.row,
            reason,
        }
    }
}

impl<R: Read> Iterator for ExportReader<R> {
    type Item = Result<StoryRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.row += 1;
        let record = match record {
            Ok(record) => record,
            Err(e) => return Some(Err(e.into())),
        };

        let story = self.build_record(&record);
        if let Ok(ref story) = story {
            tracing::debug!(
                "read story {} (row {}, {} comments)",
                story.id,
                self.row,
                story.comments.len()
            );
        }
        Some(story)
    }
}

// Single-valued cells collected before validation.
#[derive(Default)]
struct RawRow {
    id: Option<String>,
    title: Option<String>,
    labels: Option<String>,
    story_type: Option<String>,
    estimate: Option<String>,
    current_state: Option<String>,
    created_at: Option<String>,
    accepted_at: Option<String>,
    requested_by: Option<String>,
    description: Option<String>,
    url: Option<String>,
    owners: Vec<String>,
    comments: Vec<Comment>,
}

impl RawRow {
    fn set(&mut self, field: Field, cell: &str) {
        let value = (!cell.trim().is_empty()).then(|| cell.to_string());
        let slot = match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Labels => &mut self.labels,
            Field::Type => &mut self.story_type,
            Field::Estimate => &mut self.estimate,
            Field::CurrentState => &mut self.current_state,
            Field::CreatedAt => &mut self.created_at,
            Field::AcceptedAt => &mut self.accepted_at,
            Field::RequestedBy => &mut self.requested_by,
            Field::Description => &mut self.description,
            Field::Url => &mut self.url,
            Field::OwnedBy | Field::Comment => return,
        };
        *slot = value;
    }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
