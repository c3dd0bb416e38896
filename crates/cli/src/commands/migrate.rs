// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};
use std::path::Path;

use ferry_core::{StoryMapper, StoryRecord};

use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::Result;
use crate::retry::Sleeper;
use crate::sink::MigrationSink;
use crate::tracker::{GitlabClient, Tracker};

use super::inspect::write_text;
use super::{open_export, story_error};

pub fn run(
    source: &ExportArgs,
    project: &str,
    epic: Option<u64>,
    dry_run: bool,
    config_path: Option<&Path>,
) -> Result<()> {
    let stories = open_export(source)?;
    let mapper = StoryMapper::new(project, epic);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if dry_run {
        let count = run_dry(stories, &mapper, &mut out)?;
        writeln!(out, "mapped: {} (dry run, nothing sent)", count)?;
        return Ok(());
    }

    let config = Config::load(config_path)?;
    let client = GitlabClient::new(&config.gitlab.endpoint, config.private_token()?)?;
    let mut sink = MigrationSink::new(client, config.retry_policy());

    tracing::info!(
        export = %source.export.display(),
        project,
        endpoint = %config.gitlab.endpoint,
        "starting migration"
    );
    let count = run_impl(stories, &mapper, &mut sink)?;
    tracing::info!(count, "migration finished");
    writeln!(out, "migrated: {}", count)?;
    Ok(())
}

/// Maps and persists stories one at a time, halting on the first error.
///
/// Returns the number of stories migrated.
pub(crate) fn run_impl<I, T, S>(
    stories: I,
    mapper: &StoryMapper,
    sink: &mut MigrationSink<T, S>,
) -> Result<usize>
where
    I: IntoIterator<Item = ferry_core::Result<StoryRecord>>,
    T: Tracker,
    S: Sleeper,
{
    let mut count = 0;
    for story in stories {
        let story = story?;
        tracing::info!(story = %story.id, "migrating story");

        let mut issue = mapper
            .map(&story)
            .map_err(|e| story_error(&story.id, e.into()))?;
        sink.persist(&mut issue)
            .map_err(|e| story_error(&story.id, e))?;

        tracing::info!(story = %story.id, iid = ?issue.id, "story migrated");
        count += 1;
    }
    Ok(count)
}

/// Maps every story and prints its summary without any remote call.
pub(crate) fn run_dry<I, W>(stories: I, mapper: &StoryMapper, out: &mut W) -> Result<usize>
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
        write_text(&issue, out)?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
#[path = "migrate_tests.rs"]
mod tests;
