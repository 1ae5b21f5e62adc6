//! Spreadsheet import/export for bulk product deletion
//!
//! Upload format:
//! - First sheet of the workbook is used, other sheets are ignored
//! - First row is the header row
//! - One identifier per data row under the `vendorGoodsCode` column
//!
//! The same shape is produced for the downloadable template and for the
//! failed-items workbook written after a run.

mod reader;
mod types;
mod writer;

pub use reader::{decode_file, decode_identifiers, DecodeError};
pub use types::{DecodeOptions, DecodedBatch, Identifier, InvalidReason, InvalidRow, RowPolicy};
pub use writer::{
    failed_items_bytes, template_bytes, write_failed_items, write_template, FAILED_ITEMS_SHEET_NAME,
    SAMPLE_IDENTIFIERS, TEMPLATE_FILE_NAME, TEMPLATE_SHEET_NAME,
};

/// Column holding the vendor goods code in uploaded workbooks
pub const DEFAULT_COLUMN: &str = "vendorGoodsCode";
