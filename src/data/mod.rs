//! Data module - CSV loading and aggregation

mod columns;
mod loader;
mod processor;

pub use columns::{parse_termination_flag, HrColumns};
pub use loader::{DataLoader, Dataset, LoadError, DATASET_PATH};
pub use processor::{
    CategoryCount, CategoryCounts, ColumnError, CrossTab, CrossTabRow, DataProcessor, Selection,
    UNKNOWN_CATEGORY,
};
