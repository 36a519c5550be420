//! staffdir departments - List departments

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{self, OutputFormat};
use crate::error::Result;

#[derive(Args, Debug, Clone, Default)]
pub struct DepartmentsArgs {}

pub fn run(ctx: &AppContext, _args: &DepartmentsArgs) -> Result<()> {
    let departments = ctx.api().list_departments()?;

    match ctx.output_format {
        OutputFormat::Json => output::emit_json(&output::json_ok(&departments)),
        OutputFormat::Tsv => {
            output::emit_tsv(&["id", "name"], &departments, |d| {
                vec![d.id.to_string(), d.name.clone()]
            });
            Ok(())
        }
        OutputFormat::Plain => {
            for department in &departments {
                println!("{}", department.name);
            }
            Ok(())
        }
        OutputFormat::Human => {
            if departments.is_empty() {
                println!("{}", "No departments found".dimmed());
                return Ok(());
            }
            for department in &departments {
                println!("{:>6}  {}", department.id.to_string().dimmed(), department.name);
            }
            Ok(())
        }
    }
}
