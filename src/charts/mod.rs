//! Charts module - Chart data and SVG rendering

mod plotter;
mod renderer;

pub use plotter::{ChartData, ChartKind, ChartPlotter, DashboardChart, PALETTE};
pub use renderer::{ChartRenderer, RenderError};
