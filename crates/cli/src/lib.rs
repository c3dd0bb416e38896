// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ferryrs - Pivotal Tracker to GitLab migration.
//!
//! This crate provides the remote half of the `ferry` CLI: it takes issues
//! mapped by [`ferry_core`] and writes them to GitLab.
//!
//! # Main Components
//!
//! - [`MigrationSink`] - persists an issue, its notes and its final state
//! - [`Tracker`] - the remote operations the sink needs; [`GitlabClient`]
//!   implements them over the GitLab REST API
//! - [`retry`] - bounded retry for rate-limited calls
//! - [`Config`] - endpoint, token and retry settings
//! - [`Error`] - Error types for all operations
//!
//! # Migrating
//!
//! ```rust,ignore
//! use ferry_core::{ExportReader, StoryMapper};
//! use ferryrs::{Config, GitlabClient, MigrationSink};
//!
//! let config = Config::load(None)?;
//! let client = GitlabClient::new(&config.gitlab.endpoint, config.private_token()?)?;
//! let mut sink = MigrationSink::new(client, config.retry_policy());
//! let mapper = StoryMapper::new("group/app", None);
//!
//! for story in ExportReader::open(Path::new("export.csv"), None)? {
//!     let mut issue = mapper.map(&story?)?;
//!     sink.persist(&mut issue)?;
//! }
//! ```

mod cli;
mod commands;
pub mod logging;

pub mod config;
pub mod env;
pub mod error;
pub mod retry;
pub mod sink;
pub mod tracker;

pub use cli::{Cli, Command, ExportArgs, OutputFormat};
pub use config::Config;
pub use error::{Error, Result};
pub use retry::{with_retry, RetryPolicy, Sleeper, ThreadSleeper};
pub use sink::MigrationSink;
pub use tracker::{GitlabClient, RemoteError, Tracker};

/// Runs one parsed command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Migrate {
            source,
            project,
            epic,
            dry_run,
            config,
        } => commands::migrate::run(&source, &project, epic, dry_run, config.as_deref()),
        Command::Inspect {
            source,
            project,
            output,
        } => commands::inspect::run(&source, &project, output),
    }
}
