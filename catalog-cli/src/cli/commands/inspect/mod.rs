//! `inspect` command

mod handler;

pub use handler::handle_inspect_command;

use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::sheet::RowPolicy;

#[derive(Args, Debug)]
pub struct InspectCommands {
    /// Spreadsheet to decode
    pub file: PathBuf,

    /// Header of the identifier column
    #[arg(long)]
    pub column: Option<String>,

    /// What to do with rows that have no identifier
    #[arg(long, value_enum)]
    pub invalid_rows: Option<RowPolicy>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
