//! Terminal user interface for staffdir.

pub mod screen;

pub use screen::{DirectoryScreen, run_directory_screen};
