//! staffdir add - Create a staff record through the same form as the screen

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{self, HumanLayout, OutputFormat};
use crate::directory::{CREATE_FAILED_ALERT, CreationForm, FormField, StaffForm};
use crate::error::{DirError, Result};
use crate::model::CreatedStaff;

/// Every field is required; missing ones are reported like the form does.
#[derive(Args, Debug, Clone, Default)]
pub struct AddArgs {
    /// Full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Department name, matched exactly against the department list
    #[arg(long, default_value = "")]
    pub department: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub street: String,

    #[arg(long, default_value = "")]
    pub city: String,

    #[arg(long, default_value = "")]
    pub state: String,

    /// ZIP code
    #[arg(long, default_value = "")]
    pub zip: String,

    #[arg(long, default_value = "")]
    pub country: String,
}

impl AddArgs {
    fn to_form(&self) -> StaffForm {
        let mut form = StaffForm::default();
        for (field, value) in [
            (FormField::Name, &self.name),
            (FormField::Phone, &self.phone),
            (FormField::Department, &self.department),
            (FormField::Street, &self.street),
            (FormField::City, &self.city),
            (FormField::State, &self.state),
            (FormField::Zip, &self.zip),
            (FormField::Country, &self.country),
        ] {
            form.set(field, value.as_str());
        }
        form
    }
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let form = args.to_form();
    // Presence is checked before anything goes over the wire.
    if !form.missing_fields().is_empty() {
        return Err(DirError::MissingField);
    }

    let api = ctx.api();
    let departments = api.list_departments()?;

    let mut creation = CreationForm::new();
    *creation.form_mut() = form;
    creation.open();

    let created = match creation.submit(api.as_ref(), &departments) {
        Ok(created) => created,
        Err(err) => {
            if !err.is_form_error() && ctx.output_format != OutputFormat::Json {
                eprintln!("{}", CREATE_FAILED_ALERT.red().bold());
            }
            return Err(err);
        }
    };

    let id = created.id().unwrap_or_default();
    match ctx.output_format {
        OutputFormat::Json => output::emit_json(&output::json_ok(&created)),
        OutputFormat::Tsv => {
            output::emit_tsv(&["id", "name", "department"], &[&created], |c| {
                vec![id.clone(), c.request.name.clone(), args.department.clone()]
            });
            Ok(())
        }
        OutputFormat::Plain => {
            // The service may not echo an id back.
            println!("{}", if id.is_empty() { &created.request.name } else { &id });
            Ok(())
        }
        OutputFormat::Human => {
            output::emit_human(&created_layout(&created, &args.department));
            Ok(())
        }
    }
}

fn created_layout(created: &CreatedStaff, department: &str) -> HumanLayout {
    let staff = &created.request;
    let mut layout = HumanLayout::new();
    layout.title(&format!("Added {}", staff.name));
    if let Some(id) = created.id() {
        layout.kv("ID", &id);
    }
    layout
        .kv("Phone", &staff.phone)
        .kv("Department", department)
        .kv("Address", &staff.address_line());
    layout
}
