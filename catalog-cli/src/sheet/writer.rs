//! Write upload-shaped workbooks: the blank template and failed-item lists

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use super::types::Identifier;

pub const TEMPLATE_SHEET_NAME: &str = "Products to delete";
pub const FAILED_ITEMS_SHEET_NAME: &str = "Failed deletions";
pub const TEMPLATE_FILE_NAME: &str = "product-delete-template.xlsx";

/// Placeholder rows showing the user where codes go
pub const SAMPLE_IDENTIFIERS: [&str; 2] = ["SAMPLE_VENDOR_GOODS_CODE_1", "SAMPLE_VENDOR_GOODS_CODE_2"];

const COLUMN_WIDTH: f64 = 32.0;

/// Build a single-sheet workbook: header cell plus one value per row
fn identifier_workbook<'a, I>(sheet_name: &str, column: &str, values: I) -> Result<Workbook>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.set_name(sheet_name)?;
    worksheet.set_column_width(0, COLUMN_WIDTH)?;

    let header_format = Format::new().set_bold();
    worksheet.write_string_with_format(0, 0, column, &header_format)?;

    for (idx, value) in values.into_iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, value)?;
    }

    Ok(workbook)
}

fn template_workbook(column: &str) -> Result<Workbook> {
    identifier_workbook(TEMPLATE_SHEET_NAME, column, SAMPLE_IDENTIFIERS)
}

fn failed_items_workbook(column: &str, failed: &[Identifier]) -> Result<Workbook> {
    identifier_workbook(
        FAILED_ITEMS_SHEET_NAME,
        column,
        failed.iter().map(Identifier::as_str),
    )
}

/// Write the upload template to `path`
pub fn write_template<P: AsRef<Path>>(path: P, column: &str) -> Result<()> {
    let path = path.as_ref();
    template_workbook(column)?
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;
    Ok(())
}

/// Upload template as xlsx bytes
pub fn template_bytes(column: &str) -> Result<Vec<u8>> {
    template_workbook(column)?
        .save_to_buffer()
        .context("Failed to serialize template workbook")
}

/// Write failed identifiers in upload shape so they can be re-submitted as-is
pub fn write_failed_items<P: AsRef<Path>>(path: P, column: &str, failed: &[Identifier]) -> Result<()> {
    let path = path.as_ref();
    failed_items_workbook(column, failed)?
        .save(path)
        .with_context(|| format!("Failed to save Excel file: {}", path.display()))?;
    Ok(())
}

pub fn failed_items_bytes(column: &str, failed: &[Identifier]) -> Result<Vec<u8>> {
    failed_items_workbook(column, failed)?
        .save_to_buffer()
        .context("Failed to serialize failed-items workbook")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{DEFAULT_COLUMN, DecodeOptions, decode_identifiers};

    #[test]
    fn test_template_decodes_to_sample_rows() {
        let bytes = template_bytes(DEFAULT_COLUMN).unwrap();

        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();
        let codes: Vec<&str> = batch.iter().map(Identifier::as_str).collect();

        assert_eq!(codes, SAMPLE_IDENTIFIERS.to_vec());
        assert!(batch.invalid_rows.is_empty());
    }

    #[test]
    fn test_failed_items_can_be_uploaded_again() {
        let failed: Vec<Identifier> = ["X-9", "X-2", "X-9"]
            .into_iter()
            .filter_map(Identifier::new)
            .collect();

        let bytes = failed_items_bytes(DEFAULT_COLUMN, &failed).unwrap();
        let batch = decode_identifiers(&bytes, &DecodeOptions::default()).unwrap();

        assert_eq!(batch.identifiers, failed);
    }

    #[test]
    fn test_write_template_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TEMPLATE_FILE_NAME);

        write_template(&path, DEFAULT_COLUMN).unwrap();

        let batch = crate::sheet::decode_file(&path, &DecodeOptions::default()).unwrap();
        assert_eq!(batch.len(), SAMPLE_IDENTIFIERS.len());
    }
}
