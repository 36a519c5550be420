//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod add;
pub mod browse;
pub mod config;
pub mod departments;
pub mod list;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Browse(args) => browse::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Add(args) => add::run(ctx, args),
        Commands::Departments(args) => departments::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}
