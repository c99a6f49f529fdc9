//! CSV Data Loader Module
//! Loads the PRSA source table with Polars and validates required columns.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{FEATURE_COLUMNS, LABEL_COLUMN};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Required column missing from header: {0}")]
    MissingColumn(String),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load the source table from a CSV file.
    ///
    /// The literal `NA` and empty fields parse as null. Fails if the path
    /// does not exist or any required column is absent from the header.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            .finish()?
            .collect()?;

        Self::check_required_columns(&df)?;
        debug!(rows = df.height(), cols = df.width(), "parsed source table");

        Ok(df)
    }

    /// Verify that every referenced column exists in the header.
    fn check_required_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let required = FEATURE_COLUMNS.iter().copied().chain([LABEL_COLUMN]);
        for column in required {
            if !header.iter().any(|name| name.as_str() == column) {
                return Err(LoaderError::MissingColumn(column.to_string()));
            }
        }

        Ok(())
    }
}
