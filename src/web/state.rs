//! Shared application state for the web server.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::error;

use crate::data::{DataLoader, Dataset, HrColumns, LoadError};

/// Read-only state injected into every Axum handler.
///
/// The dataset is loaded exactly once. A failed load is kept as well so
/// every request can show the same error instead of taking the server down.
pub struct AppState {
    pub dataset: Result<Dataset, LoadError>,
    pub dataset_path: PathBuf,
    pub columns: HrColumns,
}

impl AppState {
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let dataset = DataLoader::load_csv(path);
        if let Err(err) = &dataset {
            error!(path = %path.display(), error = %err, "dataset unavailable");
        }
        Self {
            dataset,
            dataset_path: path.to_path_buf(),
            columns: HrColumns::default(),
        }
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Ok(dataset),
            dataset_path: PathBuf::new(),
            columns: HrColumns::default(),
        }
    }

    pub fn with_columns(mut self, columns: HrColumns) -> Self {
        self.columns = columns;
        self
    }
}

pub type SharedState = Arc<AppState>;
