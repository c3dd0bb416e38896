// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod inspect;
pub mod migrate;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::fs::File;

use ferry_core::ExportReader;

use crate::cli::ExportArgs;
use crate::error::{Error, Result};

/// Helper to open the export named on the command line.
pub fn open_export(source: &ExportArgs) -> Result<ExportReader<File>> {
    if let Some(dir) = &source.attachments {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "attachments folder not found: {}",
                dir.display()
            )));
        }
    }
    Ok(ExportReader::open(
        &source.export,
        source.attachments.as_deref(),
    )?)
}

/// Tags an error with the story it happened on.
pub(crate) fn story_error(id: &str, source: Error) -> Error {
    Error::Story {
        id: id.to_string(),
        source: Box::new(source),
    }
}
