//! Column roles the dashboard reads from the HR dataset.

use serde::Serialize;

/// Names of the dataset columns each dashboard view reads.
///
/// The defaults match the published `HRDataset_v14.csv` header. Nothing is
/// validated at load time; a role whose column is absent surfaces as a
/// column error in the views that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrColumns {
    pub department: String,
    /// Numeric gender code used by the sidebar filter.
    pub gender_id: String,
    /// Human readable gender used by the distribution chart.
    pub sex: String,
    pub age: String,
    pub performance: String,
    pub performance_id: String,
    pub terminated: String,
    pub term_reason: String,
}

impl Default for HrColumns {
    fn default() -> Self {
        Self {
            department: "Department".to_string(),
            gender_id: "GenderID".to_string(),
            sex: "Sex".to_string(),
            age: "Age".to_string(),
            performance: "PerformanceScore".to_string(),
            performance_id: "PerfScoreID".to_string(),
            terminated: "Termd".to_string(),
            term_reason: "TermReason".to_string(),
        }
    }
}

/// Interpret a termination flag category. `None` when the cell is neither
/// a recognised active nor terminated marker.
pub fn parse_termination_flag(category: &str) -> Option<bool> {
    match category.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        other => other.parse::<f64>().ok().and_then(|v| {
            if v == 1.0 {
                Some(true)
            } else if v == 0.0 {
                Some(false)
            } else {
                None
            }
        }),
    }
}
