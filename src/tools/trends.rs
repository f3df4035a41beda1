/// Tool for metric trends
///
/// This module implements the health_trends MCP tool: a rolling-average
/// series for one metric plus its short-term direction.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{metric_series, rolling_average, trend_direction, TrendDirection};
use crate::domain::Metric;
use crate::store::RecordStore;
use crate::tools::{load_filtered, ToolError};

/// Default rolling window in days
pub const DEFAULT_ROLLING_WINDOW: usize = 7;

/// Default number of recent values compared against the overall mean
pub const DEFAULT_RECENT_WINDOW: usize = 7;

/// Parameters for the trends tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TrendsParams {
    /// Metric to analyze (e.g. heart_rate, sleep_hours, mood)
    pub metric: String,
    /// User to analyze (id, email or name); omit for all users
    pub user: Option<String>,
    /// Start of the date range (YYYY-MM-DD); omit for the full data span
    pub start_date: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Rolling window size in points (default 7)
    pub window: Option<i64>,
    /// How many recent values the direction compares against the overall mean (default 7)
    pub recent_window: Option<i64>,
}

/// One smoothed point of the series
#[derive(Debug, Serialize)]
pub struct TrendPoint {
    pub date: String,
    /// Rolling mean at this point; null when the window held only nulls
    pub value: Option<f64>,
}

/// Response from the trends tool
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub metric: String,
    pub window: usize,
    pub direction: TrendDirection,
    pub points: Vec<TrendPoint>,
    pub message: String,
}

/// Convert a window argument, rejecting non-positive values
fn window_param(name: &'static str, value: Option<i64>, default: usize) -> Result<usize, ToolError> {
    match value {
        None => Ok(default),
        Some(v) if v > 0 => Ok(v as usize),
        Some(v) => Err(ToolError::InvalidArgument(format!(
            "{} must be a positive integer, got {}",
            name, v
        ))),
    }
}

/// Compute the rolling trend for one metric using the provided store
pub fn health_trends<S: RecordStore>(
    store: &S,
    params: TrendsParams,
) -> Result<TrendsResponse, ToolError> {
    let metric: Metric = params.metric.parse()?;
    let window = window_param("window", params.window, DEFAULT_ROLLING_WINDOW)?;
    let recent_window =
        window_param("recent_window", params.recent_window, DEFAULT_RECENT_WINDOW)?;

    let data = load_filtered(
        store,
        params.user.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let series = if metric.is_physical() {
        metric_series(&data.physical, metric)
    } else {
        metric_series(&data.mental, metric)
    };

    if series.is_empty() {
        return Ok(TrendsResponse {
            metric: metric.name().to_string(),
            window,
            direction: TrendDirection::Stable,
            points: Vec::new(),
            message: format!("No {} data in the selected range.", metric),
        });
    }

    let smoothed = rolling_average(&series, window)?;
    let direction = trend_direction(&series, recent_window)?;

    let points: Vec<TrendPoint> = smoothed
        .iter()
        .map(|(date, value)| TrendPoint {
            date: date.to_string(),
            value: *value,
        })
        .collect();

    let message = format!(
        "{} trend over {} points ({}-point rolling average): {}",
        metric,
        points.len(),
        window,
        direction
    );

    Ok(TrendsResponse {
        metric: metric.name().to_string(),
        window,
        direction,
        points,
        message,
    })
}
