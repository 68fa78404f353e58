//! HTML page layout: header, KPI row, sidebar and chart grid.

use crate::stats::Summary;
use crate::web::app::DashboardView;
use crate::web::chart_viewer::render_chart_grid;
use crate::web::control_panel::render_sidebar;

const PAGE_TITLE: &str = "HR Analytics Dashboard";

const STYLE: &str = r#"
body { margin: 0; font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; color: #262730; background: #fff; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 260px; padding: 24px 16px; background: #f0f2f6; flex-shrink: 0; }
.sidebar fieldset { border: none; padding: 0; margin: 0 0 16px 0; }
.sidebar legend { font-weight: 600; margin-bottom: 6px; }
.sidebar .option { display: block; padding: 2px 0; }
.sidebar .actions a { margin-left: 8px; }
main { flex: 1; padding: 24px 32px; }
.kpis { display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; margin-bottom: 24px; }
.kpi .label { font-size: 14px; color: #555; }
.kpi .value { font-size: 32px; }
.charts { display: grid; grid-template-columns: repeat(2, 1fr); gap: 16px; }
.chart { min-height: 120px; }
.chart.wide { grid-column: 1 / -1; }
.chart svg { width: 100%; height: auto; }
.error { background: #ffe3e3; color: #9c0006; padding: 12px; border-radius: 6px; }
.empty { background: #f0f2f6; color: #555; padding: 12px; border-radius: 6px; }
.muted { color: #777; }
footer { margin-top: 32px; color: #777; font-size: 13px; border-top: 1px solid #ddd; padding-top: 12px; }
"#;

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn format_optional(value: Option<f64>, decimals: usize) -> String {
    value
        .map(|v| format!("{:.*}", decimals, v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn render_kpis(summary: &Result<Summary, String>) -> String {
    let summary = match summary {
        Ok(summary) => summary,
        Err(message) => {
            return format!(
                r#"<div class="error">⚠️ Key metrics unavailable: {}</div>"#,
                escape_html(message)
            )
        }
    };

    let metrics = [
        ("Total Employees", summary.total_employees.to_string()),
        ("Average Age", format_optional(summary.avg_age, 1)),
        ("Avg. Performance", format_optional(summary.avg_performance, 2)),
        (
            "Active / Terminated",
            format!("{} / {}", summary.active, summary.terminated),
        ),
    ];

    let mut html = String::from(r#"<section class="kpis">"#);
    for (label, value) in metrics {
        html.push_str(&format!(
            r#"<div class="kpi"><div class="label">{label}</div><div class="value">{}</div></div>"#,
            escape_html(&value)
        ));
    }
    html.push_str("</section>");
    html
}

fn render_shell(sidebar: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{PAGE_TITLE}</title>
    <style>{STYLE}</style>
</head>
<body>
<div class="layout">
{sidebar}
<main>
    <h1>👥 Human Resources Analytics Dashboard</h1>
{body}
    <footer>Dataset © Carla Patalano &amp; Rich Huebner</footer>
</main>
</div>
</body>
</html>"#
    )
}

/// Full dashboard page for a computed view.
pub fn render_dashboard(view: &DashboardView) -> String {
    let body = format!(
        "<h3>📊 Key Metrics</h3>\n{}\n<h3>📈 Visual Insights</h3>\n{}",
        render_kpis(&view.summary),
        render_chart_grid(&view.panels)
    );
    render_shell(&render_sidebar(&view.filters), &body)
}

/// Page shown when the dataset could not be loaded.
pub fn render_load_error(message: &str) -> String {
    let body = format!(
        r#"<div class="error">⚠️ The HR dataset could not be loaded: {}</div>
<p class="muted">Place the dataset next to the server binary and restart it.</p>"#,
        escape_html(message)
    );
    render_shell(&render_sidebar(&[]), &body)
}
