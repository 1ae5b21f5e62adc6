//! `template` command

mod handler;

pub use handler::handle_template_command;

use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TemplateCommands {
    /// Where to write the template (defaults to product-delete-template.xlsx)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Header of the identifier column
    #[arg(long)]
    pub column: Option<String>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}
