/// Rule-based wellness insights
///
/// Deterministic observations and suggestions derived from field summaries
/// over the selected range. The rules match the dashboard's built-in
/// guidance: short sleep, elevated stress, low exercise and low mood each
/// produce one observation with an actionable suggestion. A rule never
/// fires on a field with no readings.

use serde::Serialize;

use crate::analytics::FieldSummary;
use crate::domain::Profile;

/// Insights generated for one filtered range
#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    /// What the data shows
    pub insights: Vec<String>,
    /// What the user could do about it
    pub suggestions: Vec<String>,
}

/// Per-field summaries the insight rules consume
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs {
    pub sleep_hours: FieldSummary,
    pub exercise_minutes: FieldSummary,
    pub mood: FieldSummary,
    pub stress_level: FieldSummary,
}

/// Apply the insight rules to the supplied summaries
///
/// The optional profile adds BMI context when measurements are present.
/// Steady data yields a neutral observation so the report is never empty.
pub fn generate_insights(inputs: &InsightInputs, profile: Option<&Profile>) -> InsightReport {
    let mut insights = Vec::new();
    let mut suggestions = Vec::new();

    if inputs.sleep_hours.samples > 0 && inputs.sleep_hours.avg < 7.0 {
        insights.push(format!(
            "Average sleep is {:.1} h (below 7 h).",
            inputs.sleep_hours.avg
        ));
        suggestions.push("Aim for a consistent bedtime and wind-down routine.".to_string());
    }

    if inputs.stress_level.samples > 0 && inputs.stress_level.avg >= 3.0 {
        insights.push(format!(
            "Stress level averages {:.1}/5.",
            inputs.stress_level.avg
        ));
        suggestions.push("Try a 5-minute breathing exercise today.".to_string());
    }

    if inputs.exercise_minutes.samples > 0 && inputs.exercise_minutes.avg < 20.0 {
        insights.push(format!(
            "Exercise averages {:.0} min/day.",
            inputs.exercise_minutes.avg
        ));
        suggestions.push("Take a 10-15 minute walk to get moving.".to_string());
    }

    if inputs.mood.samples > 0 && inputs.mood.avg < 3.0 {
        insights.push(format!("Mood averages {:.1}/5.", inputs.mood.avg));
        suggestions.push("Do one enjoyable, low-effort activity you like.".to_string());
    }

    if let Some(profile) = profile {
        if let (Some(bmi), Some(category)) = (profile.bmi(), profile.bmi_category()) {
            insights.push(format!("BMI is {:.1} ({}).", bmi, category.to_lowercase()));
        }
    }

    if insights.is_empty() {
        insights.push("Your recent data looks steady.".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("Drink water regularly and take stretch breaks.".to_string());
    }

    InsightReport {
        insights,
        suggestions,
    }
}
