//! Dataset Writer Module
//! Serializes the partitioned blocks into the fixed four-block text layout
//! (Train-X, Train-Y, Test-X, Test-Y) and writes the file atomically.

use polars::prelude::*;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::data::Partitions;

#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Writes the four-block dataset file.
pub struct DatasetWriter;

impl DatasetWriter {
    /// Output file name derived from the partition sizes.
    pub fn output_path(out_dir: &Path, train_size: usize, test_size: usize) -> PathBuf {
        out_dir.join(format!("PRSA_{train_size}_{test_size}.txt"))
    }

    /// Write all four blocks to `<out_dir>/PRSA_{train}_{test}.txt`.
    ///
    /// The file is assembled in a temporary file in the destination
    /// directory and renamed into place, so a failed run never leaves a
    /// partial file at the target path.
    pub fn write(
        partitions: &Partitions,
        out_dir: &Path,
        train_size: usize,
        test_size: usize,
    ) -> Result<PathBuf, WriterError> {
        let path = Self::output_path(out_dir, train_size, test_size);
        let tmp = tempfile::Builder::new()
            .prefix(".PRSA")
            .suffix(".tmp")
            .tempfile_in(out_dir)?;

        {
            let mut w = BufWriter::new(tmp.as_file());
            Self::write_block(&mut w, &partitions.train_x)?;
            Self::write_block(&mut w, &partitions.train_y)?;
            Self::write_block(&mut w, &partitions.test_x)?;
            Self::write_block(&mut w, &partitions.test_y)?;
            w.flush()?;
        }

        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), "persisted dataset file");

        Ok(path)
    }

    /// Write one block: a `"<rows> <cols>"` header line followed by one
    /// space-joined line per row.
    fn write_block<W: Write>(w: &mut W, df: &DataFrame) -> Result<(), WriterError> {
        writeln!(w, "{} {}", df.height(), df.width())?;

        let columns = df.get_columns();
        let mut line = String::new();
        for i in 0..df.height() {
            line.clear();
            for (j, col) in columns.iter().enumerate() {
                if j > 0 {
                    line.push(' ');
                }
                line.push_str(&Self::format_value(&col.get(i)?));
            }
            writeln!(w, "{line}")?;
        }

        Ok(())
    }

    /// Render a cell in the table's native textual form: integers without a
    /// fractional part, floats with one.
    fn format_value(value: &AnyValue) -> String {
        match value {
            AnyValue::Float64(v) => Self::format_float(*v),
            AnyValue::Float32(v) => Self::format_float(*v as f64),
            other => other.to_string().trim_matches('"').to_string(),
        }
    }

    fn format_float(v: f64) -> String {
        if v.is_finite() && v.fract() == 0.0 {
            format!("{v:.1}")
        } else {
            format!("{v}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use std::fs;

    fn synthetic_xy(rows: usize) -> (DataFrame, DataFrame) {
        let idx: Vec<i64> = (0..rows as i64).collect();
        let x = df!(
            "year" => vec![2010i64; rows],
            "month" => vec![1i64; rows],
            "day" => vec![1i64; rows],
            "hour" => idx.clone(),
            "DEWP" => vec![-16i64; rows],
            "TEMP" => vec![-4.0f64; rows],
            "PRES" => vec![1020.0f64; rows],
            "Iws" => vec![1.79f64; rows],
            "Is" => vec![0i64; rows],
            "Ir" => vec![0i64; rows],
        )
        .unwrap();
        let y = df!("pm2.5" => idx).unwrap();
        (x, y)
    }

    #[test]
    fn block_headers_match_line_counts() {
        let (x, y) = synthetic_xy(600);
        let parts = DataProcessor::partition(&x, &y, 500, 100).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = DatasetWriter::write(&parts, dir.path(), 500, 100).unwrap();
        assert_eq!(path, dir.path().join("PRSA_500_100.txt"));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4 + 500 + 500 + 100 + 100);

        assert_eq!(lines[0], "500 10");
        assert_eq!(lines[501], "500 1");
        assert_eq!(lines[1002], "100 10");
        assert_eq!(lines[1103], "100 1");

        // Every train-X data line has 10 fields, every train-Y line 1.
        assert!(lines[1..=500]
            .iter()
            .all(|l| l.split(' ').count() == 10));
        assert!(lines[502..=1001].iter().all(|l| l.split(' ').count() == 1));
    }

    #[test]
    fn values_render_in_native_textual_form() {
        let (x, y) = synthetic_xy(2);
        let parts = DataProcessor::partition(&x, &y, 1, 1).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = DatasetWriter::write(&parts, dir.path(), 1, 1).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        // Integers print bare, whole floats keep the fractional digit, and
        // fractional floats print as-is.
        assert_eq!(lines[1], "2010 1 1 0 -16 -4.0 1020.0 1.79 0 0");
        assert_eq!(lines[3], "0");
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let (x, y) = synthetic_xy(10);
        let parts = DataProcessor::partition(&x, &y, 7, 3).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = DatasetWriter::write(&parts, dir.path(), 7, 3).unwrap();
        let first = fs::read(&path).unwrap();

        DatasetWriter::write(&parts, dir.path(), 7, 3).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn no_temporary_files_left_behind() {
        let (x, y) = synthetic_xy(5);
        let parts = DataProcessor::partition(&x, &y, 3, 2).unwrap();

        let dir = tempfile::tempdir().unwrap();
        DatasetWriter::write(&parts, dir.path(), 3, 2).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
