//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::bulk_delete::BulkDeleteCommands;
use commands::inspect::InspectCommands;
use commands::template::TemplateCommands;

#[derive(Parser, Debug)]
#[command(
    name = "catalog-cli",
    version,
    about = "Catalog admin tooling: delete products listed in a spreadsheet"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Delete every product whose vendor goods code is listed in a spreadsheet
    BulkDelete(BulkDeleteCommands),
    /// Decode a spreadsheet and show what would be deleted, without deleting
    Inspect(InspectCommands),
    /// Write the spreadsheet template for bulk deletion
    Template(TemplateCommands),
}
