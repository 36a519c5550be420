//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Staff directory - browse, search and add staff records
#[derive(Parser, Debug)]
#[command(name = "staffdir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, plain, tsv)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/staffdir/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory service base URL (overrides config and STAFFDIR_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Defaults to `browse` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run, falling back to the interactive screen.
    #[must_use]
    pub fn effective_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Browse(commands::browse::BrowseArgs::default()))
    }

    /// Output format given on the command line, before config is consulted.
    #[must_use]
    pub const fn explicit_output_format(&self) -> Option<OutputFormat> {
        self.output_format
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Interactively browse, search and add staff (TUI)
    Browse(commands::browse::BrowseArgs),

    /// List staff, optionally filtered by name or department
    List(commands::list::ListArgs),

    /// Add a staff record
    Add(commands::add::AddArgs),

    /// List departments
    Departments(commands::departments::DepartmentsArgs),

    /// Show the effective configuration
    Config(commands::config::ConfigArgs),
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_browse() {
        let cli = Cli::parse_from(["staffdir"]);
        assert!(matches!(cli.effective_command(), Commands::Browse(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "staffdir",
            "list",
            "eng",
            "-O",
            "json",
            "--api-url",
            "http://127.0.0.1:1/api",
            "-vv",
        ]);
        assert_eq!(cli.explicit_output_format(), Some(OutputFormat::Json));
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:1/api"));
        assert_eq!(cli.verbose, 2);
        match cli.effective_command() {
            Commands::List(args) => assert_eq!(args.query.as_deref(), Some("eng")),
            other => panic!("expected list, got {other:?}"),
        }
    }
}
