/// Tool for rule-based wellness insights
///
/// This module implements the health_insights MCP tool, running the insight
/// rules over the filtered range's field summaries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{generate_insights, summarize, InsightInputs};
use crate::domain::Metric;
use crate::store::RecordStore;
use crate::tools::{load_filtered, ToolError};

/// Parameters for the insights tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct InsightsParams {
    /// User to analyze (id, email or name); omit for all users
    pub user: Option<String>,
    /// Start of the date range (YYYY-MM-DD); omit for the full data span
    pub start_date: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    pub end_date: Option<String>,
}

/// Response from the insights tool
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub insights: Vec<String>,
    pub suggestions: Vec<String>,
    pub message: String,
}

/// Generate insights using the provided store
pub fn health_insights<S: RecordStore>(
    store: &S,
    params: InsightsParams,
) -> Result<InsightsResponse, ToolError> {
    let data = load_filtered(
        store,
        params.user.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let inputs = InsightInputs {
        sleep_hours: summarize(&data.physical, Metric::SleepHours),
        exercise_minutes: summarize(&data.physical, Metric::ExerciseMinutes),
        mood: summarize(&data.mental, Metric::Mood),
        stress_level: summarize(&data.mental, Metric::StressLevel),
    };

    // Profile context only exists for a single selected user
    let profile = match &data.user {
        Some(user) => store.get_profile(&user.id)?,
        None => None,
    };

    let report = generate_insights(&inputs, profile.as_ref());

    let message = format!(
        "Insights:\n{}\n\nSuggestions:\n{}",
        report
            .insights
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n"),
        report
            .suggestions
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n")
    );

    Ok(InsightsResponse {
        insights: report.insights,
        suggestions: report.suggestions,
        message,
    })
}
