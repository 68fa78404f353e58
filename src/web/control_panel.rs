//! Sidebar filter form.
//!
//! A plain GET form; every checkbox change resubmits it so the page
//! recomputes for the new selection.

use crate::web::app::FilterOption;
use crate::web::page::escape_html;

/// Render the sidebar with one checkbox group per filter.
pub fn render_sidebar(filters: &[FilterOption]) -> String {
    let mut html = String::new();
    html.push_str(r#"<aside class="sidebar"><h2>🔎 Filter Data</h2>"#);

    if filters.is_empty() {
        html.push_str(r#"<p class="muted">No filterable columns in this dataset.</p>"#);
    } else {
        html.push_str(r#"<form method="get" action="/" id="filters">"#);
        html.push_str(r#"<input type="hidden" name="filtered" value="1">"#);
        for filter in filters {
            render_multiselect(&mut html, filter);
        }
        html.push_str(
            r#"<div class="actions"><button type="submit">Apply</button> <a href="/">Reset</a></div>"#,
        );
        html.push_str("</form>");
    }

    html.push_str("</aside>");
    html
}

fn render_multiselect(html: &mut String, filter: &FilterOption) {
    html.push_str(&format!(
        r#"<fieldset><legend>{}</legend>"#,
        escape_html(filter.label)
    ));
    for option in &filter.options {
        let checked = if filter.is_selected(option) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<label class="option"><input type="checkbox" name="{param}" value="{value}"{checked} onchange="this.form.submit()"> {value}</label>"#,
            param = filter.param,
            value = escape_html(option),
            checked = checked,
        ));
    }
    html.push_str("</fieldset>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn departments() -> FilterOption {
        FilterOption {
            param: "department",
            label: "Select Department",
            options: vec!["IT/IS".to_string(), "R&D".to_string(), "Sales".to_string()],
            selected: vec!["Sales".to_string()],
        }
    }

    #[test]
    fn checkboxes_reflect_selection() {
        let html = render_sidebar(&[departments()]);

        assert!(html.contains(r#"name="filtered" value="1""#));
        assert!(html.contains(r#"value="Sales" checked"#));
        assert!(!html.contains(r#"value="IT/IS" checked"#));
    }

    #[test]
    fn option_values_are_escaped() {
        let html = render_sidebar(&[departments()]);
        assert!(html.contains("R&amp;D"));
        assert!(!html.contains("R&D"));
    }

    #[test]
    fn no_filters_renders_notice() {
        let html = render_sidebar(&[]);
        assert!(html.contains("No filterable columns"));
        assert!(!html.contains("<form"));
    }
}
