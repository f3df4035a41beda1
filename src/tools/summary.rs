/// Tool for the dashboard summary view
///
/// This module implements the dashboard_summary MCP tool: the KPI row and
/// goal progress list the dashboard shows for a user and date range.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::compute_kpis;
use crate::domain::Metric;
use crate::store::RecordStore;
use crate::tools::{format_kpi, load_filtered, ToolError};

/// The KPI row shown on the dashboard
const SUMMARY_METRICS: [Metric; 4] = [
    Metric::HeartRate,
    Metric::Steps,
    Metric::SleepHours,
    Metric::Mood,
];

/// Parameters for the dashboard summary
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SummaryParams {
    /// User to show (id, email or name); omit for all users
    pub user: Option<String>,
    /// Start of the date range (YYYY-MM-DD); omit for the full data span
    pub start_date: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// One KPI in the summary response
#[derive(Debug, Serialize)]
pub struct KpiView {
    pub metric: String,
    /// Full-precision mean; null when there is no data
    pub value: Option<f64>,
    /// Value formatted for display (no-data renders as 0)
    pub display: String,
    pub unit: String,
    pub samples: usize,
}

/// One goal in the summary response
#[derive(Debug, Serialize)]
pub struct GoalView {
    pub goal_id: String,
    pub title: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub progress_percent: u8,
    pub completed: bool,
}

/// Response from the dashboard summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub user: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub physical_entries: usize,
    pub mental_entries: usize,
    pub kpis: Vec<KpiView>,
    pub goals: Vec<GoalView>,
    pub message: String,
}

/// Compute the dashboard summary using the provided store
pub fn dashboard_summary<S: RecordStore>(
    store: &S,
    params: SummaryParams,
) -> Result<SummaryResponse, ToolError> {
    let data = load_filtered(
        store,
        params.user.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let kpis: Vec<KpiView> = compute_kpis(&data.physical, &data.mental, &SUMMARY_METRICS)
        .into_iter()
        .map(|kpi| KpiView {
            metric: kpi.metric.name().to_string(),
            value: kpi.value,
            display: format!(
                "{} {}",
                format_kpi(kpi.value, kpi.metric.display_precision()),
                kpi.metric.unit()
            ),
            unit: kpi.metric.unit().to_string(),
            samples: kpi.samples,
        })
        .collect();

    let goals: Vec<GoalView> = data
        .goals
        .iter()
        .map(|g| GoalView {
            goal_id: g.id.to_string(),
            title: g.title.clone(),
            current_value: g.current_value,
            target_value: g.target_value,
            unit: g.unit.clone(),
            progress_percent: g.progress_percent(),
            completed: g.completed,
        })
        .collect();

    let header = match &data.user {
        Some(user) => format!("Health summary for {}", user.label()),
        None => "Health summary for all users".to_string(),
    };
    let kpi_lines = kpis
        .iter()
        .map(|k| format!("- Avg {}: {}", k.metric, k.display))
        .collect::<Vec<_>>()
        .join("\n");
    let goal_lines = if goals.is_empty() {
        "No goals found.".to_string()
    } else {
        goals
            .iter()
            .map(|g| {
                format!(
                    "- {} [{}%] {}/{} {}{}",
                    g.title,
                    g.progress_percent,
                    g.current_value,
                    g.target_value,
                    g.unit,
                    if g.completed { " (completed)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    let message = format!(
        "{}\n{} to {} | {} physical, {} mental entries\n\n{}\n\nGoals:\n{}",
        header,
        data.range.start(),
        data.range.end(),
        data.physical.len(),
        data.mental.len(),
        kpi_lines,
        goal_lines
    );

    Ok(SummaryResponse {
        user: data.user.map(|u| u.label()),
        start_date: data.range.start().to_string(),
        end_date: data.range.end().to_string(),
        physical_entries: data.physical.len(),
        mental_entries: data.mental.len(),
        kpis,
        goals,
        message,
    })
}
