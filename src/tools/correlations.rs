/// Tool for physical/mental correlations
///
/// This module implements the health_correlations MCP tool: join the two
/// entry sets by date, compute the Pearson matrix, and rank the strongest
/// associations. Too little overlapping data is an expected outcome and is
/// reported as a message, not an error.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{
    correlation_matrix, inner_join_by_date, top_correlations, AnalyticsError, Direction,
    Strength, DEFAULT_CORRELATION_LIMIT, DEFAULT_CORRELATION_THRESHOLD,
};
use crate::domain::Metric;
use crate::store::RecordStore;
use crate::tools::{load_filtered, ToolError};

/// Parameters for the correlations tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CorrelationsParams {
    /// User to analyze (id, email or name); omit for all users
    pub user: Option<String>,
    /// Start of the date range (YYYY-MM-DD); omit for the full data span
    pub start_date: Option<String>,
    /// End of the date range (YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Significance threshold in [0, 1); only |r| strictly above it qualify (default 0.3)
    pub threshold: Option<f64>,
    /// Maximum number of ranked correlations returned (default 5)
    pub limit: Option<i64>,
}

/// One ranked correlation in the response
#[derive(Debug, Serialize)]
pub struct CorrelationView {
    pub metric_a: String,
    pub metric_b: String,
    pub coefficient: f64,
    pub strength: Strength,
    pub direction: Direction,
}

/// Response from the correlations tool
#[derive(Debug, Serialize)]
pub struct CorrelationsResponse {
    /// Number of date-joined observations the analysis used
    pub paired_observations: usize,
    /// False when there was too little overlapping data to analyze
    pub computed: bool,
    pub correlations: Vec<CorrelationView>,
    pub message: String,
}

/// Compute ranked correlations using the provided store
pub fn health_correlations<S: RecordStore>(
    store: &S,
    params: CorrelationsParams,
) -> Result<CorrelationsResponse, ToolError> {
    let threshold = params.threshold.unwrap_or(DEFAULT_CORRELATION_THRESHOLD);
    let limit = match params.limit {
        None => DEFAULT_CORRELATION_LIMIT,
        Some(v) if v >= 0 => v as usize,
        Some(v) => {
            return Err(ToolError::InvalidArgument(format!(
                "limit must be a non-negative integer, got {}",
                v
            )))
        }
    };

    let data = load_filtered(
        store,
        params.user.as_deref(),
        params.start_date.as_deref(),
        params.end_date.as_deref(),
    )?;

    let table = inner_join_by_date(
        &data.physical,
        &data.mental,
        &Metric::PHYSICAL,
        &Metric::MENTAL,
    );

    let matrix = match correlation_matrix(&table) {
        Ok(matrix) => matrix,
        Err(AnalyticsError::InsufficientData { rows, min }) => {
            // Expected for sparse histories; reported as a result, not a failure
            return Ok(CorrelationsResponse {
                paired_observations: rows,
                computed: false,
                correlations: Vec::new(),
                message: format!(
                    "Insufficient data: only {} days with both physical and mental entries \
                     (need at least {}). Log more data to see correlations.",
                    rows, min
                ),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let ranked = top_correlations(&matrix, threshold, limit)?;

    let correlations: Vec<CorrelationView> = ranked
        .iter()
        .map(|pair| CorrelationView {
            metric_a: pair.metric_a.name().to_string(),
            metric_b: pair.metric_b.name().to_string(),
            coefficient: pair.coefficient,
            strength: pair.strength,
            direction: pair.direction,
        })
        .collect();

    let message = if correlations.is_empty() {
        format!(
            "No correlations above |r| = {} across {} paired observations.",
            threshold,
            table.rows.len()
        )
    } else {
        let lines = correlations
            .iter()
            .map(|c| {
                format!(
                    "- {} and {}: r = {:.2} ({} {})",
                    c.metric_a,
                    c.metric_b,
                    c.coefficient,
                    match c.strength {
                        Strength::Strong => "strong",
                        Strength::Moderate => "moderate",
                    },
                    match c.direction {
                        Direction::Positive => "positive",
                        Direction::Negative => "negative",
                    }
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Top correlations across {} paired observations:\n{}",
            table.rows.len(),
            lines
        )
    };

    Ok(CorrelationsResponse {
        paired_observations: table.rows.len(),
        computed: true,
        correlations,
        message,
    })
}
