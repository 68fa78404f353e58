//! Data Processor Module
//! Read-only aggregations over a loaded dataset: category counts, cross
//! tabulations, and row filtering.

use crate::data::Dataset;
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Category assigned to null or blank cells.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Error, Debug)]
pub enum ColumnError {
    #[error("Missing column '{column}' (available: {})", .available.join(", "))]
    Missing {
        column: String,
        available: Vec<String>,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// One category and how many rows fall into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Ordered mapping of category to row count.
///
/// Entries are sorted by descending count, ties by ascending category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts {
    entries: Vec<CategoryCount>,
}

impl CategoryCounts {
    fn from_map(counts: HashMap<String, usize>) -> Self {
        let mut entries: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.cmp(&b.category))
        });
        Self { entries }
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    pub fn categories(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.category.clone()).collect()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counts of column B within one category of column A.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossTabRow {
    pub category: String,
    pub counts: CategoryCounts,
}

/// Two-way count table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrossTab {
    /// Categories of column B, ordered like a count over the whole table.
    pub columns: Vec<String>,
    pub rows: Vec<CrossTabRow>,
}

impl CrossTab {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Count for a single cell, zero when the combination never occurs.
    pub fn cell(&self, row: &str, column: &str) -> usize {
        self.rows
            .iter()
            .find(|r| r.category == row)
            .and_then(|r| r.counts.get(column))
            .unwrap_or(0)
    }
}

/// Sidebar filter state. `None` selects every category of that dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub departments: Option<Vec<String>>,
    pub genders: Option<Vec<String>>,
}

impl Selection {
    /// Selection that keeps every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_all(&self) -> bool {
        self.departments.is_none() && self.genders.is_none()
    }
}

/// Stateless aggregation operations over a [`Dataset`].
pub struct DataProcessor;

impl DataProcessor {
    /// Normalise a raw cell into its category name.
    pub fn normalize_category(raw: Option<&str>) -> String {
        match raw.map(|s| s.trim().trim_matches('"').trim()) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => UNKNOWN_CATEGORY.to_string(),
        }
    }

    fn require_column<'a>(dataset: &'a Dataset, column: &str) -> Result<&'a Column, ColumnError> {
        dataset
            .dataframe()
            .column(column)
            .map_err(|_| ColumnError::Missing {
                column: column.to_string(),
                available: dataset.columns(),
            })
    }

    /// Category of every row of `column`, in row order.
    pub fn category_values(dataset: &Dataset, column: &str) -> Result<Vec<String>, ColumnError> {
        let series = Self::require_column(dataset, column)?;
        let as_str = series.cast(&DataType::String)?;
        let ca = as_str.str()?;
        Ok(ca.into_iter().map(Self::normalize_category).collect())
    }

    /// Distinct categories of a column, sorted ascending.
    pub fn categories(dataset: &Dataset, column: &str) -> Result<Vec<String>, ColumnError> {
        let distinct: BTreeSet<String> = Self::category_values(dataset, column)?
            .into_iter()
            .collect();
        Ok(distinct.into_iter().collect())
    }

    /// Non-null values of a column cast to `f64`. Cells that do not parse as
    /// numbers are dropped.
    pub fn numeric_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>, ColumnError> {
        let series = Self::require_column(dataset, column)?;
        let as_f64 = series.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok(ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
    }

    /// Row count per category of `column`.
    pub fn count_by(dataset: &Dataset, column: &str) -> Result<CategoryCounts, ColumnError> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for category in Self::category_values(dataset, column)? {
            *counts.entry(category).or_default() += 1;
        }
        Ok(CategoryCounts::from_map(counts))
    }

    /// Row count per (category of `column_a`, category of `column_b`).
    pub fn cross_tabulate(
        dataset: &Dataset,
        column_a: &str,
        column_b: &str,
    ) -> Result<CrossTab, ColumnError> {
        let values_a = Self::category_values(dataset, column_a)?;
        let values_b = Self::category_values(dataset, column_b)?;

        let mut totals_a: HashMap<String, usize> = HashMap::new();
        let mut totals_b: HashMap<String, usize> = HashMap::new();
        let mut cells: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for (a, b) in values_a.into_iter().zip(values_b) {
            *totals_a.entry(a.clone()).or_default() += 1;
            *totals_b.entry(b.clone()).or_default() += 1;
            *cells.entry(a).or_default().entry(b).or_default() += 1;
        }

        let rows = CategoryCounts::from_map(totals_a)
            .iter()
            .map(|outer| CrossTabRow {
                category: outer.category.clone(),
                counts: CategoryCounts::from_map(
                    cells.remove(&outer.category).unwrap_or_default(),
                ),
            })
            .collect();

        Ok(CrossTab {
            columns: CategoryCounts::from_map(totals_b).categories(),
            rows,
        })
    }

    /// Keep only the rows matching the sidebar selection.
    pub fn filter(
        dataset: &Dataset,
        selection: &Selection,
        department_col: &str,
        gender_col: &str,
    ) -> Result<Dataset, ColumnError> {
        if selection.is_all() {
            return Ok(dataset.clone());
        }

        let mut mask = vec![true; dataset.row_count()];
        let dimensions = [
            (department_col, selection.departments.as_ref()),
            (gender_col, selection.genders.as_ref()),
        ];
        for (column, allowed) in dimensions {
            let Some(allowed) = allowed else {
                continue;
            };
            let values = Self::category_values(dataset, column)?;
            for (keep, value) in mask.iter_mut().zip(values) {
                *keep = *keep && allowed.contains(&value);
            }
        }

        Self::apply_mask(dataset, mask)
    }

    /// Keep only the rows for which `predicate` holds on the category of `column`.
    pub fn where_category(
        dataset: &Dataset,
        column: &str,
        predicate: impl Fn(&str) -> bool,
    ) -> Result<Dataset, ColumnError> {
        let mask = Self::category_values(dataset, column)?
            .iter()
            .map(|value| predicate(value.as_str()))
            .collect();
        Self::apply_mask(dataset, mask)
    }

    fn apply_mask(dataset: &Dataset, mask: Vec<bool>) -> Result<Dataset, ColumnError> {
        let mask = BooleanChunked::new("selection".into(), mask);
        let filtered = dataset.dataframe().filter(&mask)?;
        Ok(Dataset::from_dataframe(filtered))
    }
}
