//! staffdir - Staff Directory
//!
//! Browse, search and add personnel backed by a REST directory service.

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use staffdir::Result;
use staffdir::app::AppContext;
use staffdir::cli::output::{self, OutputFormat};
use staffdir::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.effective_command();
    init_tracing(&cli, &command);

    let mut format = cli.explicit_output_format().unwrap_or_default();
    match run(&cli, &command, &mut format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::emit_error(&e, format);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, command: &Commands, format: &mut OutputFormat) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    *format = ctx.output_format;
    staffdir::cli::commands::run(&ctx, command)
}

fn init_tracing(cli: &Cli, command: &Commands) {
    let filter = match cli.verbose {
        0 => "warn,staffdir=info",
        1 => "info,staffdir=debug",
        2 => "debug,staffdir=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // The screen owns the terminal; logs go to a file instead of stderr.
    if matches!(command, Commands::Browse(_)) {
        if cli.quiet {
            return;
        }
        if let Some(file) = open_log_file() {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .init();
        }
        return;
    }

    if cli.quiet {
        return;
    }

    if cli.explicit_output_format() == Some(OutputFormat::Json) {
        // JSON logging for json output
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Human-readable logging
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("staffdir").join("staffdir.log"))
}

fn open_log_file() -> Option<File> {
    let path = log_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    File::options().create(true).append(true).open(path).ok()
}
