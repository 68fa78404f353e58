//! Static Chart Renderer
//! Renders chart data to standalone SVG documents with plotters.
//!
//! Layout of every chart:
//! 1. Title centered at the top
//! 2. Plot area with axis descriptions (bar, histogram, stacked bar) or a
//!    donut pie with percentage labels
//! 3. Legend in the upper right corner for stacked bars

use crate::charts::{ChartData, ChartKind, ChartPlotter};
use crate::data::{CategoryCounts, CrossTab};
use crate::stats::HistogramBin;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::Pie;
use plotters::prelude::*;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to draw for {0}")]
    NoData(&'static str),
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn title_font() -> FontDesc<'static> {
    ("sans-serif", 20).into_font()
}

fn label_font() -> FontDesc<'static> {
    ("sans-serif", 13).into_font()
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a chart into an SVG string of the given pixel size.
    pub fn render_svg(data: &ChartData, width: u32, height: u32) -> Result<String, RenderError> {
        if data.is_empty() {
            return Err(RenderError::NoData(data.title()));
        }

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            match &data.kind {
                ChartKind::Bar { counts, color } => Self::draw_bar(&root, data, counts, *color)?,
                ChartKind::Donut { counts } => {
                    Self::draw_donut(&root, data, counts, width, height)?
                }
                ChartKind::Histogram { bins, color } => {
                    Self::draw_histogram(&root, data, bins, *color)?
                }
                ChartKind::StackedBar {
                    table,
                    series_labels,
                } => Self::draw_stacked_bar(&root, data, table, series_labels)?,
            }

            root.present()?;
        }
        Ok(svg)
    }

    /// Headroom above the tallest bar.
    fn y_ceiling(max_count: usize) -> u32 {
        ((max_count as f64 * 1.1).ceil() as u32).max(1)
    }

    /// Category axis with one segment per label. Discrete ranges are
    /// inclusive, so `n` labels span `0..n - 1`.
    fn category_axis(n: u32) -> Range<u32> {
        0..n.saturating_sub(1)
    }

    /// Right edge of segment `i`; the last segment closes on the axis end.
    fn segment_end(i: u32, n: u32) -> SegmentValue<u32> {
        if i + 1 >= n {
            SegmentValue::Last
        } else {
            SegmentValue::Exact(i + 1)
        }
    }

    fn category_label(labels: &[String], value: &SegmentValue<u32>) -> String {
        match value {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn draw_bar(
        root: &Area<'_>,
        data: &ChartData,
        counts: &CategoryCounts,
        color: RGBColor,
    ) -> Result<(), RenderError> {
        let labels = counts.categories();
        let n = labels.len() as u32;

        let mut chart = ChartBuilder::on(root)
            .caption(data.title(), title_font())
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(50)
            .build_cartesian_2d(
                Self::category_axis(n).into_segmented(),
                0u32..Self::y_ceiling(counts.max_count()),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| Self::category_label(&labels, v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .label_style(label_font())
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, entry)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (Self::segment_end(i, n), entry.count as u32),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))?;

        Ok(())
    }

    fn draw_histogram(
        root: &Area<'_>,
        data: &ChartData,
        bins: &[HistogramBin],
        color: RGBColor,
    ) -> Result<(), RenderError> {
        let mut x_min = bins.first().map(|b| b.lower).unwrap_or(0.0);
        let mut x_max = bins.last().map(|b| b.upper).unwrap_or(1.0);
        if x_max <= x_min {
            x_min -= 0.5;
            x_max += 0.5;
        }
        let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);

        let mut chart = ChartBuilder::on(root)
            .caption(data.title(), title_font())
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, 0u32..Self::y_ceiling(max_count))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|v| format!("{:.0}", v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .label_style(label_font())
            .draw()?;

        chart.draw_series(bins.iter().map(|bin| {
            let (lower, upper) = if bin.upper > bin.lower {
                (bin.lower, bin.upper)
            } else {
                (x_min, x_max)
            };
            let mut bar = Rectangle::new([(lower, 0), (upper, bin.count as u32)], color.filled());
            bar.set_margin(0, 0, 1, 1);
            bar
        }))?;

        Ok(())
    }

    fn draw_donut(
        root: &Area<'_>,
        data: &ChartData,
        counts: &CategoryCounts,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let area = root.titled(data.title(), title_font())?;

        let center = ((width / 2) as i32, (height / 2) as i32);
        let radius = f64::from(width.min(height)) * 0.3;
        let sizes: Vec<f64> = counts.iter().map(|e| e.count as f64).collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(ChartPlotter::series_color).collect();
        let labels = counts.categories();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.donut_hole(radius * 0.4);
        pie.label_style(label_font().color(&BLACK));
        pie.percentages(("sans-serif", 12).into_font().color(&WHITE));
        area.draw(&pie)?;

        Ok(())
    }

    fn draw_stacked_bar(
        root: &Area<'_>,
        data: &ChartData,
        table: &CrossTab,
        series_labels: &[String],
    ) -> Result<(), RenderError> {
        let labels: Vec<String> = table.rows.iter().map(|r| r.category.clone()).collect();
        let n = labels.len() as u32;
        let max_total = table
            .rows
            .iter()
            .map(|r| r.counts.total())
            .max()
            .unwrap_or(0);

        let mut chart = ChartBuilder::on(root)
            .caption(data.title(), title_font())
            .margin(12)
            .x_label_area_size(45)
            .y_label_area_size(50)
            .build_cartesian_2d(
                Self::category_axis(n).into_segmented(),
                0u32..Self::y_ceiling(max_total),
            )?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(labels.len())
            .x_label_formatter(&|v| Self::category_label(&labels, v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .label_style(label_font())
            .draw()?;

        let mut bases = vec![0u32; table.rows.len()];
        for (j, column) in table.columns.iter().enumerate() {
            let color = ChartPlotter::series_color(j);
            let mut bars = Vec::with_capacity(table.rows.len());
            for (i, row) in table.rows.iter().enumerate() {
                let count = table.cell(&row.category, column) as u32;
                if count == 0 {
                    continue;
                }
                let x = i as u32;
                let mut bar = Rectangle::new(
                    [
                        (SegmentValue::Exact(x), bases[i]),
                        (Self::segment_end(x, n), bases[i] + count),
                    ],
                    color.filled(),
                );
                bar.set_margin(0, 0, 6, 6);
                bars.push(bar);
                bases[i] += count;
            }

            let label = series_labels.get(j).unwrap_or(column);
            chart
                .draw_series(bars)?
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(label_font())
            .draw()?;

        Ok(())
    }
}
