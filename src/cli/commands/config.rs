//! staffdir config - Show the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{self, OutputFormat};
use crate::config::Config;
use crate::error::{DirError, Result};

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Dotted key to print, e.g. `api.base_url`
    pub key: Option<String>,

    /// Print the config file location instead
    #[arg(long)]
    pub path: bool,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    if args.path {
        return emit_path(ctx);
    }

    match &args.key {
        Some(key) => get_key(ctx, key),
        None => emit_config(ctx),
    }
}

fn emit_path(ctx: &AppContext) -> Result<()> {
    let path = ctx
        .config_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    if ctx.output_format == OutputFormat::Json {
        let exists = ctx.config_path.as_ref().is_some_and(|p| p.exists());
        return output::emit_json(&output::json_ok(serde_json::json!({
            "path": path,
            "exists": exists,
        })));
    }
    println!("{path}");
    Ok(())
}

fn emit_config(ctx: &AppContext) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => output::emit_json(&output::json_ok(&ctx.config)),
        OutputFormat::Tsv => {
            let doc = config_doc(&ctx.config)?;
            let mut rows = Vec::new();
            flatten("", &doc, &mut rows);
            output::emit_tsv(&["key", "value"], &rows, |(key, value)| {
                vec![key.clone(), value.clone()]
            });
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let rendered = toml::to_string_pretty(&ctx.config)
                .map_err(|err| DirError::Config(format!("render config: {err}")))?;
            println!("{rendered}");
            Ok(())
        }
    }
}

fn get_key(ctx: &AppContext, key: &str) -> Result<()> {
    let value = get_path(&config_doc(&ctx.config)?, key)?;
    if ctx.output_format == OutputFormat::Json {
        return output::emit_json(&output::json_ok(&value));
    }
    println!("{}", format_value(&value));
    Ok(())
}

fn config_doc(config: &Config) -> Result<toml::Value> {
    toml::Value::try_from(config)
        .map_err(|err| DirError::Config(format!("serialize config: {err}")))
}

fn get_path(doc: &toml::Value, key: &str) -> Result<toml::Value> {
    let mut current = doc;
    for part in key.split('.') {
        current = current
            .get(part)
            .ok_or_else(|| DirError::Config(format!("unknown key: {key}")))?;
    }
    Ok(current.clone())
}

fn flatten(prefix: &str, value: &toml::Value, rows: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, rows);
            }
        }
        other => rows.push((prefix.to_string(), format_value(other))),
    }
}

fn format_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}
