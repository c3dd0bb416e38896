// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ferry-core: Export parsing and story mapping for ferry.
//!
//! This crate turns a Pivotal Tracker CSV export into target-side issues. It
//! does no network I/O; persisting the issues is the job of the `ferry` CLI
//! crate.

pub mod error;
pub mod export;
pub mod issue;
pub mod mapper;
pub mod story;
pub mod timestamp;

pub use error::{Error, Result};
pub use export::{ExportReader, Field};
pub use issue::{Issue, IssueState, Note, PendingNote, StoryState};
pub use mapper::StoryMapper;
pub use story::{Comment, StoryRecord};
