//! Bulk delete command handler

use anyhow::{Context, Result};
use colored::*;
use is_terminal::IsTerminal;
use log::{debug, warn};
use std::path::Path;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::BulkDeleteCommands;
use super::progress::ProgressPrinter;
use crate::api::CatalogClient;
use crate::bulk_delete::{BulkDeleteOptions, BulkDeleteOrchestrator, RunSummary};
use crate::cli::commands::OutputFormat;
use crate::config::{Config, ENV_API_URL};
use crate::sheet::{Identifier, write_failed_items};

/// Handle `bulk-delete`: decode, confirm, run, report
pub async fn handle_bulk_delete_command(args: BulkDeleteCommands, mut config: Config) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    args.apply_to(&mut config);

    let base_url = config.api.base_url.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "No catalog admin URL configured. Use --base-url, set {}, or add [api] base_url to the config file.",
            ENV_API_URL
        )
    })?;

    if !args.file.exists() {
        anyhow::bail!("Upload file does not exist: {}", args.file.display());
    }

    let resilience = config.resilience();
    let client = CatalogClient::with_config(&base_url, &resilience)?
        .with_delete_path(&config.api.delete_path)
        .with_token(config.api.token.clone());
    let delete_url = client.delete_url();

    let options = BulkDeleteOptions {
        decode: config.decode_options(),
        resilience,
    };
    let column = options.decode.column.clone();
    let mut orchestrator = BulkDeleteOrchestrator::new(client, options);

    orchestrator
        .select_file(&args.file)
        .with_context(|| format!("Failed to read upload: {}", args.file.display()))?;

    let preview = orchestrator
        .decode()
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    if args.format == OutputFormat::Text {
        println!(
            "{} identifiers found in {}",
            preview.len().to_string().bold(),
            args.file.display().to_string().cyan()
        );
        if !preview.invalid_rows.is_empty() {
            println!(
                "{} rows skipped (no usable identifier): {}",
                preview.invalid_rows.len().to_string().yellow(),
                preview
                    .invalid_rows
                    .iter()
                    .map(|r| r.row.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    if preview.is_empty() {
        warn!("Nothing to delete in {}", args.file.display());
    }

    if !args.yes && !preview.is_empty() && !confirm(preview.len(), &delete_url)? {
        eprintln!("Aborted.");
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let ctrl_c = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!();
                eprintln!("Cancelling after the current request...");
                cancel.cancel();
            }
        })
    };

    let start = Instant::now();
    let mut printer = ProgressPrinter::new(args.format);
    let summary = orchestrator
        .run_decoded(preview, &cancel, |event| printer.handle(event))
        .await;
    ctrl_c.abort();
    debug!("Bulk delete took {:?}", start.elapsed());

    if let Some(path) = &args.failed_out {
        export_failed_items(path, &column, &summary.failed_items)?;
        if args.format == OutputFormat::Text {
            println!(
                "Failed codes written to: {} ({})",
                path.display().to_string().bright_green(),
                summary.failed_items.len()
            );
        }
    }

    println!("{}", format_summary(&summary, args.format)?);

    Ok(())
}

/// Always rewrite the file so a stale list from an earlier run is never left behind
fn export_failed_items(path: &Path, column: &str, failed: &[Identifier]) -> Result<()> {
    write_failed_items(path, column, failed)
        .with_context(|| format!("Failed to write failed codes to {}", path.display()))
}

fn confirm(count: usize, delete_url: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        anyhow::bail!("Refusing to delete without confirmation on a non-interactive input; pass --yes");
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("Delete {} products via {}?", count, delete_url))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

/// Format the run summary according to the specified output format
fn format_summary(summary: &RunSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(summary).context("Failed to format JSON output")
        }
        OutputFormat::Text => Ok(summary_text(summary)),
    }
}

fn summary_text(summary: &RunSummary) -> String {
    let mut out = String::new();

    let status = if summary.cancelled {
        "Cancelled".yellow().bold()
    } else if summary.has_failures() {
        "Finished with failures".yellow().bold()
    } else {
        "Done".green().bold()
    };

    out.push_str(&format!("{} ({}%)\n", status, summary.progress));
    out.push_str(&format!("  Total:     {}\n", summary.total));
    out.push_str(&format!("  Succeeded: {}\n", summary.success.to_string().green()));
    out.push_str(&format!("  Failed:    {}\n", summary.failed.to_string().red()));

    if summary.cancelled {
        out.push_str(&format!(
            "  Not attempted: {}\n",
            summary.total - summary.completed()
        ));
    }

    if !summary.failed_items.is_empty() {
        out.push_str("  Failed codes:\n");
        for item in &summary.failed_items {
            out.push_str(&format!("    {}\n", item));
        }
    }

    out.trim_end().to_string()
}
