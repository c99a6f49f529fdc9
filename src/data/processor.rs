//! Data Processor Module
//! Handles row cleaning, column projection, and train/test partitioning.

use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::{FEATURE_COLUMNS, LABEL_COLUMN};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Cleaned table has {available} rows, need {needed} (train + test)")]
    InsufficientRows { needed: usize, available: usize },
}

/// Feature matrix and label vector sliced into train and test ranges.
#[derive(Debug)]
pub struct Partitions {
    pub train_x: DataFrame,
    pub train_y: DataFrame,
    pub test_x: DataFrame,
    pub test_y: DataFrame,
}

/// Handles cleaning and partitioning operations on the source table.
pub struct DataProcessor;

impl DataProcessor {
    /// Drop every row with a missing value in any column.
    ///
    /// This is a full-row filter over all columns, not just the projected
    /// ones. Relative order of surviving rows is preserved.
    pub fn clean(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let cleaned = df.clone().lazy().drop_nulls(None).collect()?;
        debug!(
            dropped = df.height() - cleaned.height(),
            remaining = cleaned.height(),
            "dropped incomplete rows"
        );
        Ok(cleaned)
    }

    /// Project the cleaned table onto the feature matrix X and label vector Y.
    pub fn project(df: &DataFrame) -> Result<(DataFrame, DataFrame), ProcessorError> {
        let x = df.select(FEATURE_COLUMNS)?;
        let y = df.select([LABEL_COLUMN])?;
        Ok((x, y))
    }

    /// Slice X and Y into train rows `[0, train_size)` and test rows
    /// `[train_size, train_size + test_size)`.
    ///
    /// Fails if the cleaned table cannot fill both ranges; a short or empty
    /// test block would otherwise be emitted silently.
    pub fn partition(
        x: &DataFrame,
        y: &DataFrame,
        train_size: usize,
        test_size: usize,
    ) -> Result<Partitions, ProcessorError> {
        let needed = train_size + test_size;
        let available = x.height();
        if available < needed {
            return Err(ProcessorError::InsufficientRows { needed, available });
        }

        Ok(Partitions {
            train_x: x.slice(0, train_size),
            train_y: y.slice(0, train_size),
            test_x: x.slice(train_size as i64, test_size),
            test_y: y.slice(train_size as i64, test_size),
        })
    }
}
