//! staffdir list - List staff, filtered like the search box

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{self, OutputFormat};
use crate::directory::{NO_RESULTS, filter_staff};
use crate::error::Result;
use crate::model::Staff;

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive text matched against name and department
    pub query: Option<String>,
}

#[derive(Serialize)]
struct ListReport<'a> {
    query: &'a str,
    total: usize,
    count: usize,
    staff: Vec<&'a Staff>,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let staff = ctx.api().list_staff()?;
    let query = args.query.as_deref().unwrap_or("");
    let matched: Vec<&Staff> = filter_staff(&staff, query)
        .into_iter()
        .map(|idx| &staff[idx])
        .collect();

    match ctx.output_format {
        OutputFormat::Json => output::emit_json(&output::json_ok(ListReport {
            query,
            total: staff.len(),
            count: matched.len(),
            staff: matched,
        })),
        OutputFormat::Tsv => {
            output::emit_tsv(
                &["id", "name", "department", "phone", "address"],
                &matched,
                |s| {
                    vec![
                        s.id.to_string(),
                        s.name.clone(),
                        s.department.name.clone(),
                        s.phone.clone(),
                        s.address_line(),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Plain => {
            list_plain(&matched);
            Ok(())
        }
        OutputFormat::Human => {
            list_human(&matched, staff.len());
            Ok(())
        }
    }
}

fn list_plain(staff: &[&Staff]) {
    if staff.is_empty() {
        println!("{NO_RESULTS}");
        return;
    }
    for s in staff {
        println!("{} ({})", s.name, s.department.name);
    }
}

fn list_human(staff: &[&Staff], total: usize) {
    if staff.is_empty() {
        println!("{}", NO_RESULTS.dimmed());
        return;
    }

    println!(
        "{:8} {:28} {:20} {:16}",
        "ID".bold(),
        "NAME".bold(),
        "DEPARTMENT".bold(),
        "PHONE".bold()
    );
    println!("{}", "─".repeat(74).dimmed());

    for s in staff {
        println!(
            "{:8} {:28} {:20} {:16}",
            s.id.to_string().dimmed(),
            s.name,
            s.department.name.blue(),
            s.phone
        );
    }

    println!();
    println!("{}", format!("{} of {total} staff", staff.len()).dimmed());
}
