use anyhow::Result;
use colored::*;
use log::info;
use std::path::{Path, PathBuf};

use super::TemplateCommands;
use crate::config::Config;
use crate::sheet::{TEMPLATE_FILE_NAME, write_template};

pub fn handle_template_command(args: TemplateCommands, config: Config) -> Result<()> {
    let column = args.column.unwrap_or(config.bulk_delete.column);
    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(TEMPLATE_FILE_NAME));

    let written = write_template_file(&path, &column, args.force)?;
    println!("Template written to: {}", written.display().to_string().bright_green());

    Ok(())
}

fn write_template_file(path: &Path, column: &str, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite it",
            path.display()
        );
    }

    info!("Writing template with column '{}' to {}", column, path.display());
    write_template(path, column)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{DecodeOptions, SAMPLE_IDENTIFIERS, decode_file};

    #[test]
    fn test_template_decodes_to_sample_codes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TEMPLATE_FILE_NAME);

        write_template_file(&path, "vendorGoodsCode", false).unwrap();
        let batch = decode_file(&path, &DecodeOptions::default()).unwrap();

        let codes: Vec<&str> = batch.iter().map(|id| id.as_str()).collect();
        assert_eq!(codes, SAMPLE_IDENTIFIERS);
        assert!(batch.invalid_rows.is_empty());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.xlsx");
        std::fs::write(&path, b"keep me").unwrap();

        let err = write_template_file(&path, "vendorGoodsCode", false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");

        write_template_file(&path, "vendorGoodsCode", true).unwrap();
        assert_ne!(std::fs::read(&path).unwrap(), b"keep me");
    }
}
