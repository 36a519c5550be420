use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::output::OutputFormat;
use crate::error::{DirError, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub tui: TuiConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::resolve_path(explicit_path) {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides(&|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// The config file that [`Config::load`] reads: `explicit_path`, else
    /// `$STAFFDIR_CONFIG`, else the per-user file.
    #[must_use]
    pub fn resolve_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
        explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("STAFFDIR_CONFIG").map(PathBuf::from))
            .or_else(Self::global_path)
    }

    /// Location of the per-user config file, if the platform has one.
    #[must_use]
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("staffdir/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| DirError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| DirError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.api {
            self.api.merge(patch);
        }
        if let Some(patch) = patch.tui {
            self.tui.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env("STAFFDIR_API_URL") {
            self.api.base_url = value;
        }
        if let Some(value) = env_u64(env, "STAFFDIR_API_TIMEOUT_SECS")? {
            self.api.timeout_secs = value;
        }

        if let Some(value) = env_u64(env, "STAFFDIR_TUI_POLL_MS")? {
            self.tui.poll_interval_ms = value;
        }
        if let Some(value) = env_bool(env, "STAFFDIR_TUI_REFRESH_ON_FOCUS") {
            self.tui.refresh_on_focus = value;
        }

        if let Some(value) = env("STAFFDIR_OUTPUT_FORMAT") {
            self.output.format = parse_output_format(&value)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    fn merge(&mut self, patch: ApiPatch) {
        if let Some(value) = patch.base_url {
            self.base_url = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// How long the screen waits for input before checking for fetch results.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Re-fetch the directory whenever the terminal regains focus.
    #[serde(default = "default_true")]
    pub refresh_on_focus: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            refresh_on_focus: true,
        }
    }
}

impl TuiConfig {
    fn merge(&mut self, patch: TuiPatch) {
        if let Some(value) = patch.poll_interval_ms {
            self.poll_interval_ms = value;
        }
        if let Some(value) = patch.refresh_on_focus {
            self.refresh_on_focus = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub api: Option<ApiPatch>,
    pub tui: Option<TuiPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ApiPatch {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TuiPatch {
    pub poll_interval_ms: Option<u64>,
    pub refresh_on_focus: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct OutputPatch {
    pub format: Option<OutputFormat>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_poll_interval_ms() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

fn parse_output_format(value: &str) -> Result<OutputFormat> {
    match value.to_lowercase().as_str() {
        "human" => Ok(OutputFormat::Human),
        "json" => Ok(OutputFormat::Json),
        "plain" => Ok(OutputFormat::Plain),
        "tsv" => Ok(OutputFormat::Tsv),
        _ => Err(DirError::Config(format!(
            "invalid output format {value} (expected human|json|plain|tsv)"
        ))),
    }
}

fn env_bool(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    env(key).map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn env_u64(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Result<Option<u64>> {
    match env(key) {
        Some(value) => value
            .parse::<u64>()
            .map(Some)
            .map_err(|err| DirError::Config(format!("invalid {key} value {value}: {err}"))),
        None => Ok(None),
    }
}
