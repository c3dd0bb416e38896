// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log output setup for the binary.
//!
//! Library code only emits `tracing` events. The binary installs a
//! subscriber once at startup: `RUST_LOG` controls the filter (default
//! `info`), output goes to `--log-file` when given, otherwise stderr.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

pub fn setup_logging(log_path: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // Try to open log file, fall back to stderr
    let file = log_path.and_then(|path| {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    if let Some(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
