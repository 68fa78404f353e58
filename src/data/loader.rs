//! CSV Data Loader Module
//! Loads the HR dataset once at startup using Polars and hands out a read-only view.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Dataset bundled with the dashboard, resolved relative to the working directory.
pub const DATASET_PATH: &str = "HRDataset_v14.csv";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Dataset file is empty: {}", .0.display())]
    EmptyFile(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Immutable in-memory table. Cloning shares the underlying column buffers.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    /// Get a reference to the underlying DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Column names in file order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// Get the number of rows in the DataFrame.
    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }
}

/// Reads CSV files into a [`Dataset`].
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file using Polars.
    ///
    /// Schema inference looks at the first 10 000 rows and unparseable cells
    /// become nulls rather than failing the whole load.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
        let path = file_path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        if std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(false) {
            return Err(LoadError::EmptyFile(path.to_path_buf()));
        }

        debug!(path = %path.display(), "reading dataset");
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "dataset loaded"
        );
        Ok(Dataset::from_dataframe(df))
    }
}
