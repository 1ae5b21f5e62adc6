//! Delete-by-key request and response types
//!
//! The catalog admin exposes one endpoint for spreadsheet-driven deletion:
//! `POST /api/products/bulk-delete` with `{"vendorGoodsCode": "..."}`.

pub mod operation;

pub use operation::{DeleteRequest, DeleteResponse, ResponseBody};
