// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

// Custom help template that groups commands into sections
const HELP_TEMPLATE: &str = "{about-with-newline}
{usage-heading} {usage}

{before-help}Options:
{options}{after-help}";

const COMMANDS_HELP: &str = "\
Commands:
  migrate     Create target issues for every story in an export
  inspect     Show what each story would become, without any remote call";

const QUICKSTART_HELP: &str = "\
Get started:
  ferry inspect export.csv                        Check the export parses
  ferry migrate export.csv -p group/app --dry-run Preview the migration
  ferry migrate export.csv -p group/app -a files  Migrate with attachments";

#[derive(Parser)]
#[command(name = "ferry")]
#[command(about = "Migrate a Pivotal Tracker CSV export into GitLab issues")]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(before_help = COMMANDS_HELP)]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Append log output to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the stories come from.
#[derive(Args, Clone, Debug)]
pub struct ExportArgs {
    /// Path to the Pivotal Tracker CSV export
    pub export: PathBuf,

    /// Folder holding one subfolder of files per story id
    #[arg(long, short)]
    pub attachments: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create target issues for every story in an export
    #[command(
        arg_required_else_help = true,
        after_help = "Examples:\n  \
        ferry migrate export.csv -p 42                 Migrate into project 42\n  \
        ferry migrate export.csv -p group/app -e 7     Assign every issue to epic 7\n  \
        ferry migrate export.csv -p group/app --dry-run  Map only, no remote calls"
    )]
    Migrate {
        #[command(flatten)]
        source: ExportArgs,

        /// Target project id or path (e.g. 42 or group/app)
        #[arg(long, short)]
        project: String,

        /// Epic id every created issue is assigned to
        #[arg(long, short)]
        epic: Option<u64>,

        /// Map every story and print a summary without contacting the tracker
        #[arg(long)]
        dry_run: bool,

        /// Config file (default: ./ferry.toml, then the user config dir)
        #[arg(long, short)]
        config: Option<PathBuf>,
    },

    /// Show what each story would become, without any remote call
    #[command(arg_required_else_help = true)]
    Inspect {
        #[command(flatten)]
        source: ExportArgs,

        /// Target project id or path used in the output
        #[arg(long, short, default_value = "project")]
        project: String,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
