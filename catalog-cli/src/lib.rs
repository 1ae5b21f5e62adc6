//! Catalog admin tooling
//!
//! Bulk deletion of catalog products driven by an uploaded spreadsheet:
//! [`sheet`] decodes the upload, [`bulk_delete`] runs one delete per
//! identifier through an [`api::DeleteByKey`] collaborator and keeps the
//! running [`bulk_delete::RunSummary`].

pub mod api;
pub mod bulk_delete;
pub mod cli;
pub mod config;
pub mod sheet;
