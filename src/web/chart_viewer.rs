//! Chart grid: two charts per row, wide charts on their own row.

use crate::web::app::{ChartPanel, PanelContent};
use crate::web::page::escape_html;

pub fn render_chart_grid(panels: &[ChartPanel]) -> String {
    let mut html = String::from(r#"<section class="charts">"#);
    for panel in panels {
        let class = if panel.chart.is_wide() {
            "chart wide"
        } else {
            "chart"
        };
        html.push_str(&format!(
            r#"<div class="{class}" id="chart-{id}">{body}</div>"#,
            class = class,
            id = panel.chart.id(),
            body = render_panel_body(panel),
        ));
    }
    html.push_str("</section>");
    html
}

fn render_panel_body(panel: &ChartPanel) -> String {
    let title = escape_html(panel.chart.title());
    match &panel.content {
        // The SVG carries its own title.
        PanelContent::Svg(svg) => svg.clone(),
        PanelContent::Empty => format!(
            r#"<h3>{title}</h3><div class="empty">No data for the current selection</div>"#
        ),
        PanelContent::Error(message) => format!(
            r#"<h3>{title}</h3><div class="error">⚠️ {}</div>"#,
            escape_html(message)
        ),
    }
}
