// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const HEADER: &str = "Id,Title,Labels,Type,Estimate,Current State,Created at,Accepted at,Requested By,Description,URL,Owned By,Owned By,Comment,Comment";

/// `ferry` with no ambient config: HOME and the config dir point into
/// `home`, and the GitLab variables are cleared.
pub fn ferry(home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ferry");
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("GITLAB_API_ENDPOINT")
        .env_remove("GITLAB_API_PRIVATE_TOKEN")
        .env_remove("FERRY_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes an export with the given data rows and returns its path.
pub fn write_export(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    let path = dir.path().join("export.csv");
    std::fs::write(&path, content).unwrap();
    path
}

/// Two stories: one in progress with labels and a comment, one accepted.
pub fn sample_export(dir: &TempDir) -> PathBuf {
    write_export(
        dir,
        &[
            "161714920,Unable to add documents,\"ocorian, qa2\",bug,3,started,\"Oct 29, 2018\",,Joe Bloggs,Upload fails,https://example.com/s/161714920,Amy Bath,,\"Reproduced (Amy Bath - Oct 30, 2018)\",",
            "161580207,Fix bug,,feature,,accepted,\"Oct 22, 2018\",\"Oct 26, 2018\",Amy Bath,,,,,,",
        ],
    )
}
