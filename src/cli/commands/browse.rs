//! staffdir browse - Interactive directory screen

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::tui::run_directory_screen;

#[derive(Args, Debug, Clone, Default)]
pub struct BrowseArgs {
    /// Print the id of the last profile opened when the screen closes
    #[arg(long)]
    pub print_selected: bool,
}

pub fn run(ctx: &AppContext, args: &BrowseArgs) -> Result<()> {
    let last_profile = run_directory_screen(ctx.api(), &ctx.config.tui)?;

    if args.print_selected {
        if let Some(id) = last_profile {
            println!("{id}");
        }
    }
    Ok(())
}
