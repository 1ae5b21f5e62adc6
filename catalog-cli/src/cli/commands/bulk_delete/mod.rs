//! `bulk-delete` command

mod handler;
mod progress;

pub use handler::handle_bulk_delete_command;

use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;
use crate::sheet::RowPolicy;

#[derive(Args, Debug)]
pub struct BulkDeleteCommands {
    /// Spreadsheet (.xlsx/.xls/.ods) listing the codes to delete
    pub file: PathBuf,

    /// Catalog admin base URL (overrides CATALOG_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Header of the identifier column
    #[arg(long)]
    pub column: Option<String>,

    /// What to do with rows that have no identifier
    #[arg(long, value_enum)]
    pub invalid_rows: Option<RowPolicy>,

    /// Deletes kept in flight at once (1 = strictly one after another)
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<usize>,

    /// Give up on a single delete after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Write failed codes to this workbook, ready to upload again
    #[arg(long, value_name = "PATH")]
    pub failed_out: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl BulkDeleteCommands {
    /// Layer command-line flags over the loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(url) = &self.base_url {
            config.api.base_url = Some(url.clone());
        }
        if let Some(column) = &self.column {
            config.bulk_delete.column = column.clone();
        }
        if let Some(policy) = self.invalid_rows {
            config.bulk_delete.invalid_rows = policy;
        }
        if let Some(max) = self.max_in_flight {
            config.bulk_delete.max_in_flight = max.max(1);
        }
        if let Some(ms) = self.timeout_ms {
            config.bulk_delete.request_timeout_ms = Some(ms);
        }
    }
}
