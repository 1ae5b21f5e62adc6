//! Decode an uploaded workbook into an ordered batch of identifiers
//!
//! Reads the first sheet only. Rows are interpreted as records keyed by the
//! header row; the cell under the identifier column becomes the candidate
//! identifier. Completely blank rows are not records and are skipped without
//! being reported.

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;

use super::types::{DecodeOptions, DecodedBatch, Identifier, InvalidReason, InvalidRow, RowPolicy};

/// Failure to turn uploaded bytes into a batch. Fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unreadable workbook: {0}")]
    Unreadable(#[from] calamine::Error),
    #[error("workbook contains no sheets")]
    NoSheet,
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read a workbook from disk and decode it
pub fn decode_file<P: AsRef<Path>>(
    path: P,
    options: &DecodeOptions,
) -> Result<DecodedBatch, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    decode_identifiers(&bytes, options)
}

/// Decode workbook bytes (xlsx, xls, xlsb or ods) into a batch
pub fn decode_identifiers(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<DecodedBatch, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(DecodeError::NoSheet)??;

    let first_row = range.start().map(|(row, _)| row).unwrap_or(0);
    let mut rows = range.rows();

    let Some(header) = rows.next() else {
        debug!("First sheet is empty, nothing to decode");
        return Ok(DecodedBatch::default());
    };

    let column = header
        .iter()
        .position(|cell| header_text(cell) == options.column);

    if column.is_none() {
        warn!(
            "Header row has no '{}' column; every data row will be skipped",
            options.column
        );
    }

    let mut batch = DecodedBatch::default();

    for (offset, row) in rows.enumerate() {
        if row.iter().all(is_blank) {
            continue;
        }

        // Header occupies first_row, data starts right after it
        let row_number = first_row + offset as u32 + 2;

        let candidate = match column {
            None => Err(InvalidReason::MissingColumn),
            Some(col) => cell_to_identifier(row.get(col).unwrap_or(&Data::Empty)),
        };

        match candidate {
            Ok(identifier) => batch.identifiers.push(identifier),
            Err(reason) => {
                debug!("Skipping row {}: {}", row_number, reason);
                if options.row_policy == RowPolicy::ReportAsInvalid {
                    batch.invalid_rows.push(InvalidRow {
                        row: row_number,
                        reason,
                    });
                }
            }
        }
    }

    debug!(
        "Decoded {} identifiers ({} invalid rows reported)",
        batch.identifiers.len(),
        batch.invalid_rows.len()
    );

    Ok(batch)
}

fn header_text(cell: &Data) -> &str {
    match cell {
        Data::String(s) => s.trim(),
        _ => "",
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Convert an identifier cell, rejecting values a spreadsheet user would read as "nothing"
fn cell_to_identifier(cell: &Data) -> Result<Identifier, InvalidReason> {
    let text = match cell {
        Data::Empty | Data::Bool(false) => None,
        Data::String(s) => Some(s.trim().to_string()),
        Data::Int(0) => None,
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) if *f == 0.0 || f.is_nan() => None,
        Data::Float(f) => {
            // Codes typed as numbers come back as floats
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Bool(true) => Some("true".to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.trim().to_string()),
        Data::Error(_) => return Err(InvalidReason::CellError),
    };

    text.and_then(Identifier::new)
        .ok_or(InvalidReason::EmptyValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    /// Build an xlsx in memory; empty strings leave the cell unwritten
    fn workbook_bytes(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    worksheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn codes(batch: &DecodedBatch) -> Vec<&str> {
        batch.iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_row_without_identifier_is_dropped() {
        let bytes = workbook_bytes(&[
            &["vendorGoodsCode", "note"],
            &["A", ""],
            &["", "no code here"],
            &["B", ""],
        ]);

        let options = DecodeOptions::default().with_row_policy(RowPolicy::DropSilently);
        let batch = decode_identifiers(&bytes, &options).unwrap();

        assert_eq!(codes(&batch), vec!["A", "B"]);
        assert!(batch.invalid_rows.is_empty());
    }

    #[test]
    fn test_row_without_identifier_is_reported_by_default() {
        let bytes = workbook_bytes(&[
            &["vendorGoodsCode", "note"],
            &["A", ""],
            &["", "no code here"],
            &["B", ""],
        ]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(codes(&batch), vec!["A", "B"]);
        assert_eq!(
            batch.invalid_rows,
            vec![InvalidRow {
                row: 3,
                reason: InvalidReason::EmptyValue
            }]
        );
    }

    #[test]
    fn test_blank_rows_are_not_records() {
        let bytes = workbook_bytes(&[&["vendorGoodsCode"], &["A"], &[""], &["B"]]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(codes(&batch), vec!["A", "B"]);
        assert!(batch.invalid_rows.is_empty());
    }

    #[test]
    fn test_duplicates_are_kept_in_order() {
        let bytes = workbook_bytes(&[&["vendorGoodsCode"], &["A"], &["B"], &["A"]]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(codes(&batch), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_column_found_by_header_not_position() {
        let bytes = workbook_bytes(&[
            &["title", " vendorGoodsCode "],
            &["Shoe", "  SKU-1 "],
            &["Bag", "SKU-2"],
        ]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(codes(&batch), vec!["SKU-1", "SKU-2"]);
    }

    #[test]
    fn test_custom_column_name() {
        let bytes = workbook_bytes(&[&["goodsCode"], &["G-1"]]);

        let options = DecodeOptions::default().with_column("goodsCode");
        let batch = decode_identifiers(&bytes, &options).unwrap();

        assert_eq!(codes(&batch), vec!["G-1"]);
    }

    #[test]
    fn test_missing_column_reports_every_row() {
        let bytes = workbook_bytes(&[&["title"], &["Shoe"], &["Bag"]]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert!(batch.is_empty());
        assert_eq!(batch.invalid_rows.len(), 2);
        assert!(
            batch
                .invalid_rows
                .iter()
                .all(|r| r.reason == InvalidReason::MissingColumn)
        );
        assert_eq!(batch.invalid_rows[0].row, 2);
    }

    #[test]
    fn test_numeric_codes_keep_integer_form() {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "vendorGoodsCode").unwrap();
        worksheet.write_number(1, 0, 1000123.0).unwrap();
        worksheet.write_number(2, 0, 0.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(codes(&batch), vec!["1000123"]);
        assert_eq!(batch.invalid_rows[0].reason, InvalidReason::EmptyValue);
    }

    #[test]
    fn test_header_only_yields_empty_batch() {
        let bytes = workbook_bytes(&[&["vendorGoodsCode"]]);

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert!(batch.is_empty());
        assert!(batch.invalid_rows.is_empty());
    }

    #[test]
    fn test_corrupt_bytes_fail_to_decode() {
        let result = decode_identifiers(b"definitely not a workbook", &DecodeOptions::default());

        assert!(matches!(result, Err(DecodeError::Unreadable(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = decode_file("/nonexistent/upload.xlsx", &DecodeOptions::default());

        assert!(matches!(result, Err(DecodeError::Io { .. })));
    }
}
