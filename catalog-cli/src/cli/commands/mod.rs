//! Subcommand arguments and handlers

pub mod bulk_delete;
pub mod inspect;
pub mod template;

use clap::ValueEnum;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable, colored when the terminal supports it
    #[default]
    Text,
    /// Pretty-printed JSON on stdout
    Json,
}
