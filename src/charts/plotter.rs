//! Chart Plotter Module
//! Turns dataset aggregations into chart descriptions for the renderer.

use crate::data::{
    parse_termination_flag, CategoryCounts, ColumnError, CrossTab, DataProcessor, Dataset,
    HrColumns,
};
use crate::stats::{HistogramBin, StatsCalculator, AGE_BINS};
use plotters::style::RGBColor;

/// Plotly default blue, used for single-series charts.
pub const PRIMARY_COLOR: RGBColor = RGBColor(99, 110, 250);
/// Highlight used for attrition charts.
pub const ATTRITION_COLOR: RGBColor = RGBColor(239, 85, 59);

pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// The charts shown on the dashboard, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardChart {
    AgeDistribution,
    GenderDistribution,
    DepartmentBreakdown,
    TerminationReasons,
    PerformanceDistribution,
    PerformanceVsTermination,
}

impl DashboardChart {
    pub const ALL: [DashboardChart; 6] = [
        DashboardChart::AgeDistribution,
        DashboardChart::GenderDistribution,
        DashboardChart::DepartmentBreakdown,
        DashboardChart::TerminationReasons,
        DashboardChart::PerformanceDistribution,
        DashboardChart::PerformanceVsTermination,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DashboardChart::AgeDistribution => "Age Distribution",
            DashboardChart::GenderDistribution => "Gender Distribution",
            DashboardChart::DepartmentBreakdown => "Department Breakdown",
            DashboardChart::TerminationReasons => "Termination Reasons",
            DashboardChart::PerformanceDistribution => "Performance Score Distribution",
            DashboardChart::PerformanceVsTermination => "Performance vs Termination",
        }
    }

    /// Stable HTML id.
    pub fn id(self) -> &'static str {
        match self {
            DashboardChart::AgeDistribution => "age",
            DashboardChart::GenderDistribution => "gender",
            DashboardChart::DepartmentBreakdown => "department",
            DashboardChart::TerminationReasons => "term-reason",
            DashboardChart::PerformanceDistribution => "performance",
            DashboardChart::PerformanceVsTermination => "performance-termination",
        }
    }

    /// Charts that span the full page width.
    pub fn is_wide(self) -> bool {
        matches!(
            self,
            DashboardChart::PerformanceDistribution | DashboardChart::PerformanceVsTermination
        )
    }
}

/// Drawable content of a chart.
#[derive(Debug, Clone)]
pub enum ChartKind {
    Bar {
        counts: CategoryCounts,
        color: RGBColor,
    },
    Donut {
        counts: CategoryCounts,
    },
    Histogram {
        bins: Vec<HistogramBin>,
        color: RGBColor,
    },
    StackedBar {
        table: CrossTab,
        /// Display name for each entry of `table.columns`.
        series_labels: Vec<String>,
    },
}

/// Chart data for a single dashboard chart
#[derive(Debug, Clone)]
pub struct ChartData {
    pub chart: DashboardChart,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
}

impl ChartData {
    pub fn title(&self) -> &'static str {
        self.chart.title()
    }

    /// True when there is nothing to draw for the current selection.
    pub fn is_empty(&self) -> bool {
        match &self.kind {
            ChartKind::Bar { counts, .. } | ChartKind::Donut { counts } => counts.is_empty(),
            ChartKind::Histogram { bins, .. } => bins.is_empty(),
            ChartKind::StackedBar { table, .. } => table.is_empty(),
        }
    }
}

/// Builds chart data from a (filtered) dataset.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for the n-th series.
    pub fn series_color(index: usize) -> RGBColor {
        PALETTE[index % PALETTE.len()]
    }

    /// Display name for a termination flag category.
    pub fn termination_label(category: &str) -> String {
        match parse_termination_flag(category) {
            Some(true) => "Terminated".to_string(),
            Some(false) => "Active".to_string(),
            None => category.to_string(),
        }
    }

    pub fn build(
        chart: DashboardChart,
        dataset: &Dataset,
        columns: &HrColumns,
    ) -> Result<ChartData, ColumnError> {
        let (x_label, kind) = match chart {
            DashboardChart::AgeDistribution => {
                let ages = DataProcessor::numeric_values(dataset, &columns.age)?;
                (
                    columns.age.clone(),
                    ChartKind::Histogram {
                        bins: StatsCalculator::histogram(&ages, AGE_BINS),
                        color: PRIMARY_COLOR,
                    },
                )
            }
            DashboardChart::GenderDistribution => (
                columns.sex.clone(),
                ChartKind::Donut {
                    counts: DataProcessor::count_by(dataset, &columns.sex)?,
                },
            ),
            DashboardChart::DepartmentBreakdown => (
                columns.department.clone(),
                ChartKind::Bar {
                    counts: DataProcessor::count_by(dataset, &columns.department)?,
                    color: PRIMARY_COLOR,
                },
            ),
            DashboardChart::TerminationReasons => {
                // Validate both columns before filtering so a missing reason
                // column is reported even when nobody was terminated.
                DataProcessor::category_values(dataset, &columns.term_reason)?;
                let terminated = DataProcessor::where_category(dataset, &columns.terminated, |f| {
                    parse_termination_flag(f) == Some(true)
                })?;
                (
                    columns.term_reason.clone(),
                    ChartKind::Bar {
                        counts: DataProcessor::count_by(&terminated, &columns.term_reason)?,
                        color: ATTRITION_COLOR,
                    },
                )
            }
            DashboardChart::PerformanceDistribution => (
                columns.performance.clone(),
                ChartKind::Bar {
                    counts: DataProcessor::count_by(dataset, &columns.performance)?,
                    color: PRIMARY_COLOR,
                },
            ),
            DashboardChart::PerformanceVsTermination => {
                let table = DataProcessor::cross_tabulate(
                    dataset,
                    &columns.performance,
                    &columns.terminated,
                )?;
                let series_labels = table
                    .columns
                    .iter()
                    .map(|c| Self::termination_label(c))
                    .collect();
                (
                    columns.performance.clone(),
                    ChartKind::StackedBar {
                        table,
                        series_labels,
                    },
                )
            }
        };

        Ok(ChartData {
            chart,
            x_label,
            y_label: "Count".to_string(),
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn sample() -> Dataset {
        Dataset::from_dataframe(
            DataFrame::new(vec![
                Column::new("Department".into(), ["Sales", "IT/IS", "Sales", "Production"]),
                Column::new("Sex".into(), ["F", "M ", "F", "M "]),
                Column::new("Age".into(), [29i64, 41, 35, 52]),
                Column::new(
                    "PerformanceScore".into(),
                    ["Exceeds", "Fully Meets", "PIP", "Fully Meets"],
                ),
                Column::new("Termd".into(), [0i64, 1, 1, 0]),
                Column::new(
                    "TermReason".into(),
                    ["N/A-StillEmployed", "career change", "attendance", "N/A-StillEmployed"],
                ),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn every_chart_builds_from_full_schema() {
        let data = sample();
        for chart in DashboardChart::ALL {
            let built = ChartPlotter::build(chart, &data, &HrColumns::default()).unwrap();
            assert_eq!(built.chart, chart);
            assert!(!built.is_empty(), "{} is empty", chart.title());
        }
    }

    #[test]
    fn termination_reasons_only_count_terminated_rows() {
        let built = ChartPlotter::build(
            DashboardChart::TerminationReasons,
            &sample(),
            &HrColumns::default(),
        )
        .unwrap();

        let ChartKind::Bar { counts, .. } = built.kind else {
            panic!("expected a bar chart");
        };
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.get("N/A-StillEmployed"), None);
    }

    #[test]
    fn stacked_bar_uses_status_labels() {
        let built = ChartPlotter::build(
            DashboardChart::PerformanceVsTermination,
            &sample(),
            &HrColumns::default(),
        )
        .unwrap();

        let ChartKind::StackedBar { series_labels, .. } = built.kind else {
            panic!("expected a stacked bar chart");
        };
        assert_eq!(series_labels, vec!["Active", "Terminated"]);
    }

    #[test]
    fn missing_column_only_fails_its_chart() {
        let columns = HrColumns {
            sex: "Gender".to_string(),
            ..HrColumns::default()
        };
        let data = sample();

        assert!(ChartPlotter::build(DashboardChart::GenderDistribution, &data, &columns).is_err());
        assert!(ChartPlotter::build(DashboardChart::DepartmentBreakdown, &data, &columns).is_ok());
    }

    #[test]
    fn chart_ids_are_unique() {
        let mut ids: Vec<_> = DashboardChart::ALL.iter().map(|c| c.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DashboardChart::ALL.len());
    }
}
