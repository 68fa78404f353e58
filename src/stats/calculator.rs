//! Statistics Calculator Module
//! Key metrics for the dashboard header and histogram binning.

use crate::data::{parse_termination_flag, ColumnError, DataProcessor, Dataset, HrColumns};
use serde::Serialize;
use statrs::statistics::Statistics;

/// Number of buckets in the age histogram.
pub const AGE_BINS: usize = 20;

/// Headline metrics for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_employees: usize,
    /// Mean age rounded to one decimal, `None` when no row has a numeric age.
    pub avg_age: Option<f64>,
    /// Mean numeric performance score rounded to two decimals.
    pub avg_performance: Option<f64>,
    pub active: usize,
    pub terminated: usize,
}

/// One equal-width histogram bucket, `[lower, upper)` except for the last
/// bucket which also holds `upper`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Round to a fixed number of decimals.
    fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }

    /// Mean of the values, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mean = values.mean();
        (!mean.is_nan()).then_some(mean)
    }

    /// Compute the header metrics.
    ///
    /// The termination flag is required. Age and numeric performance are
    /// optional: when their column is missing the metric is simply absent.
    pub fn summarize(dataset: &Dataset, columns: &HrColumns) -> Result<Summary, ColumnError> {
        let flags = DataProcessor::category_values(dataset, &columns.terminated)?;
        let terminated = flags
            .iter()
            .filter(|f| parse_termination_flag(f) == Some(true))
            .count();
        let active = flags
            .iter()
            .filter(|f| parse_termination_flag(f) == Some(false))
            .count();

        let avg_age = Self::optional_mean(dataset, &columns.age)?.map(|m| Self::round_to(m, 1));
        let avg_performance = Self::optional_mean(dataset, &columns.performance_id)?
            .map(|m| Self::round_to(m, 2));

        Ok(Summary {
            total_employees: dataset.row_count(),
            avg_age,
            avg_performance,
            active,
            terminated,
        })
    }

    fn optional_mean(dataset: &Dataset, column: &str) -> Result<Option<f64>, ColumnError> {
        if !dataset.has_column(column) {
            return Ok(None);
        }
        let values = DataProcessor::numeric_values(dataset, column)?;
        Ok(Self::mean(&values))
    }

    /// Split values into `bins` equal-width buckets spanning `[min, max]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max == min {
            return vec![HistogramBin {
                lower: min,
                upper: max,
                count: finite.len(),
            }];
        }

        let width = (max - min) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + i as f64 * width,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + (i + 1) as f64 * width
                },
                count,
            })
            .collect()
    }
}
