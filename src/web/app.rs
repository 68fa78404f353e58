//! Dashboard View Assembly
//! Runs the aggregation pipeline for one request: filter, metrics, chart panels.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::charts::{ChartPlotter, ChartRenderer, DashboardChart, RenderError};
use crate::data::{DataProcessor, Dataset, HrColumns, Selection};
use crate::stats::{StatsCalculator, Summary};

pub const CHART_WIDTH: u32 = 640;
pub const WIDE_CHART_WIDTH: u32 = 1280;
pub const CHART_HEIGHT: u32 = 400;

/// One sidebar multiselect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub param: &'static str,
    pub label: &'static str,
    pub options: Vec<String>,
    pub selected: Vec<String>,
}

impl FilterOption {
    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.iter().any(|s| s == option)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelContent {
    Svg(String),
    Empty,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ChartPanel {
    pub chart: DashboardChart,
    pub content: PanelContent,
}

/// Everything the page needs for the current selection.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub filters: Vec<FilterOption>,
    pub summary: Result<Summary, String>,
    pub panels: Vec<ChartPanel>,
}

impl DashboardView {
    pub fn build(dataset: &Dataset, columns: &HrColumns, selection: &Selection) -> Self {
        // A dimension whose column is missing cannot be filtered on.
        let selection = Selection {
            departments: selection
                .departments
                .clone()
                .filter(|_| dataset.has_column(&columns.department)),
            genders: selection
                .genders
                .clone()
                .filter(|_| dataset.has_column(&columns.gender_id)),
        };

        let filters = [
            (
                "department",
                "Select Department",
                &columns.department,
                &selection.departments,
            ),
            ("gender", "Select Gender", &columns.gender_id, &selection.genders),
        ]
        .into_iter()
        .filter_map(|(param, label, column, chosen)| {
            let options = DataProcessor::categories(dataset, column).ok()?;
            let selected = chosen.clone().unwrap_or_else(|| options.clone());
            Some(FilterOption {
                param,
                label,
                options,
                selected,
            })
        })
        .collect();

        let filtered = match DataProcessor::filter(
            dataset,
            &selection,
            &columns.department,
            &columns.gender_id,
        ) {
            Ok(filtered) => filtered,
            Err(err) => {
                warn!(error = %err, "selection could not be applied");
                let message = err.to_string();
                return Self {
                    filters,
                    summary: Err(message.clone()),
                    panels: DashboardChart::ALL
                        .iter()
                        .map(|&chart| ChartPanel {
                            chart,
                            content: PanelContent::Error(message.clone()),
                        })
                        .collect(),
                };
            }
        };
        debug!(
            rows = filtered.row_count(),
            total = dataset.row_count(),
            "selection applied"
        );

        let summary = StatsCalculator::summarize(&filtered, columns).map_err(|err| {
            warn!(error = %err, "summary unavailable");
            err.to_string()
        });

        let panels = DashboardChart::ALL
            .par_iter()
            .map(|&chart| ChartPanel {
                chart,
                content: Self::render_panel(chart, &filtered, columns),
            })
            .collect();

        Self {
            filters,
            summary,
            panels,
        }
    }

    fn render_panel(chart: DashboardChart, dataset: &Dataset, columns: &HrColumns) -> PanelContent {
        let data = match ChartPlotter::build(chart, dataset, columns) {
            Ok(data) => data,
            Err(err) => {
                warn!(chart = chart.id(), error = %err, "chart unavailable");
                return PanelContent::Error(err.to_string());
            }
        };

        let width = if chart.is_wide() {
            WIDE_CHART_WIDTH
        } else {
            CHART_WIDTH
        };
        match ChartRenderer::render_svg(&data, width, CHART_HEIGHT) {
            Ok(svg) => PanelContent::Svg(svg),
            Err(RenderError::NoData(_)) => PanelContent::Empty,
            Err(err) => {
                warn!(chart = chart.id(), error = %err, "chart failed to render");
                PanelContent::Error(err.to_string())
            }
        }
    }
}
