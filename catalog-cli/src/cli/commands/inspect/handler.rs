use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use super::InspectCommands;
use crate::cli::commands::OutputFormat;
use crate::config::Config;
use crate::sheet::{DecodedBatch, Identifier, InvalidRow, decode_file};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectReport<'a> {
    column: &'a str,
    identifiers: &'a [Identifier],
    invalid_rows: &'a [InvalidRow],
}

pub fn handle_inspect_command(args: InspectCommands, mut config: Config) -> Result<()> {
    if let Some(column) = &args.column {
        config.bulk_delete.column = column.clone();
    }
    if let Some(policy) = args.invalid_rows {
        config.bulk_delete.invalid_rows = policy;
    }

    let options = config.decode_options();
    let batch = decode_file(&args.file, &options)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&InspectReport {
            column: &options.column,
            identifiers: &batch.identifiers,
            invalid_rows: &batch.invalid_rows,
        })
        .context("Failed to format JSON output")?,
        OutputFormat::Text => report_text(&batch, &options.column),
    };
    println!("{}", output);

    Ok(())
}

fn report_text(batch: &DecodedBatch, column: &str) -> String {
    let mut out = format!(
        "{} identifiers under '{}'\n",
        batch.len().to_string().bold(),
        column.cyan()
    );

    for identifier in batch {
        out.push_str(&format!("  {}\n", identifier));
    }

    if !batch.invalid_rows.is_empty() {
        out.push_str(&format!(
            "{} invalid rows\n",
            batch.invalid_rows.len().to_string().yellow()
        ));
        for invalid in &batch.invalid_rows {
            out.push_str(&format!("  row {}: {}\n", invalid.row, invalid.reason));
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::InvalidReason;

    #[test]
    fn test_report_lists_identifiers_and_invalid_rows() {
        colored::control::set_override(false);
        let batch = DecodedBatch {
            identifiers: vec![Identifier::new("A1").unwrap(), Identifier::new("B2").unwrap()],
            invalid_rows: vec![InvalidRow {
                row: 3,
                reason: InvalidReason::EmptyValue,
            }],
        };

        let text = report_text(&batch, "vendorGoodsCode");

        assert!(text.starts_with("2 identifiers under 'vendorGoodsCode'"));
        assert!(text.contains("  A1\n  B2\n"));
        assert!(text.contains("1 invalid rows"));
        assert!(text.contains("  row 3: "));
    }

    #[test]
    fn test_json_report_shape() {
        let identifiers = vec![Identifier::new("A1").unwrap()];
        let invalid_rows = vec![InvalidRow {
            row: 4,
            reason: InvalidReason::MissingColumn,
        }];

        let json = serde_json::to_value(InspectReport {
            column: "sku",
            identifiers: &identifiers,
            invalid_rows: &invalid_rows,
        })
        .unwrap();

        assert_eq!(json["identifiers"], serde_json::json!(["A1"]));
        assert_eq!(json["invalidRows"][0]["row"], 4);
        assert_eq!(json["invalidRows"][0]["reason"], "missing_column");
    }
}
