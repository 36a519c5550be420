//! Shared state handed to every command.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{DirectoryApi, HttpDirectoryApi};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::Result;

pub struct AppContext {
    pub config: Config,
    /// Config file consulted at startup; it may not exist.
    pub config_path: Option<PathBuf>,
    pub output_format: OutputFormat,
    api: Arc<dyn DirectoryApi>,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = Config::resolve_path(cli.config.as_deref());
        let mut config = Config::load(cli.config.as_deref())?;
        if let Some(url) = &cli.api_url {
            config.api.base_url.clone_from(url);
        }

        let output_format = cli
            .explicit_output_format()
            .unwrap_or(config.output.format);
        let api: Arc<dyn DirectoryApi> = Arc::new(HttpDirectoryApi::new(&config.api)?);

        Ok(Self {
            config,
            config_path,
            output_format,
            api,
        })
    }

    /// Build a context around an arbitrary client.
    #[must_use]
    pub fn with_api(config: Config, api: Arc<dyn DirectoryApi>) -> Self {
        let output_format = config.output.format;
        Self {
            config,
            config_path: None,
            output_format,
            api,
        }
    }

    #[must_use]
    pub fn api(&self) -> Arc<dyn DirectoryApi> {
        Arc::clone(&self.api)
    }
}
