pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod model;
pub mod test_utils;
pub mod tui;

pub use error::{DirError, Result};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
