// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use ferry_core::{Issue, PendingNote, StoryMapper, StoryRecord};

use crate::cli::{ExportArgs, OutputFormat};
use crate::error::Result;

use super::{open_export, story_error};

pub fn run(source: &ExportArgs, project: &str, output: OutputFormat) -> Result<()> {
    let stories = open_export(source)?;
    let mapper = StoryMapper::new(project, None);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_impl(stories, &mapper, output, &mut out)?;
    Ok(())
}

/// Maps every story and writes it out; returns how many were written.
pub(crate) fn run_impl<I, W>(
    stories: I,
    mapper: &StoryMapper,
    output: OutputFormat,
    out: &mut W,
) -> Result<usize>
where
    I: IntoIterator<Item = ferry_core::Result<StoryRecord>>,
    W: Write,
{
    let mut count = 0;
    for story in stories {
        let story = story?;
        let issue = mapper
            .map(&story)
            .map_err(|e| story_error(&story.id, e.into()))?;
        match output {
            OutputFormat::Text => write_text(&issue, out)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&issue)?)?,
        }
        count += 1;
    }
    Ok(count)
}

/// One summary block per issue.
pub(crate) fn write_text<W: Write>(issue: &Issue, out: &mut W) -> Result<()> {
    writeln!(out, "{} [{}] {}", issue.pivotal_id, issue.state, issue.title)?;
    writeln!(out, "  labels: {}", issue.labels.join(", "))?;
    if let Some(weight) = issue.weight {
        writeln!(out, "  weight: {}", weight)?;
    }

    let attachments = issue
        .notes
        .iter()
        .filter_map(PendingNote::attachments_dir)
        .next();
    match attachments {
        Some(dir) => writeln!(
            out,
            "  notes: {} (attachments from {})",
            issue.notes.len(),
            dir.display()
        )?,
        None => writeln!(out, "  notes: {}", issue.notes.len())?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "inspect_tests.rs"]
mod tests;
