/// Correlation analyzer: date-joined physical/mental records and Pearson
/// correlation rankings
///
/// The physical and mental sets are inner-joined on the calendar date, a
/// symmetric Pearson matrix is computed over the requested metrics, and the
/// strongest associations above a significance threshold are ranked.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::AnalyticsError;
use crate::domain::{HealthRecord, MentalEntry, Metric, PhysicalEntry};

/// Minimum number of paired observations for a meaningful correlation
///
/// Six or more joined rows are required; anything less is reported as
/// InsufficientData rather than computed.
pub const MIN_CORRELATION_SAMPLES: usize = 6;

/// Default significance threshold for top_correlations
pub const DEFAULT_CORRELATION_THRESHOLD: f64 = 0.3;

/// Default number of ranked correlations returned
pub const DEFAULT_CORRELATION_LIMIT: usize = 5;

/// Absolute coefficient above which an association is labeled Strong
const STRONG_THRESHOLD: f64 = 0.7;

/// One row of the date join: the shared date plus the requested metric
/// values from both sides, nulls preserved
#[derive(Debug, Clone, Serialize)]
pub struct JoinedRow {
    pub date: NaiveDate,
    /// Parallel to JoinedTable::metrics
    pub values: Vec<Option<f64>>,
}

/// The result of joining physical and mental records by date
#[derive(Debug, Clone, Serialize)]
pub struct JoinedTable {
    /// Column order: the requested physical metrics, then the mental ones
    pub metrics: Vec<Metric>,
    pub rows: Vec<JoinedRow>,
}

/// Inner-join physical and mental records on calendar-day equality
///
/// Duplicate dates on either side fan out with standard inner-join
/// cardinality: every matching pair of rows is emitted. Row order is
/// deterministic - physical-major, then the mental matches in their input
/// order.
pub fn inner_join_by_date(
    physical: &[PhysicalEntry],
    mental: &[MentalEntry],
    physical_metrics: &[Metric],
    mental_metrics: &[Metric],
) -> JoinedTable {
    let metrics: Vec<Metric> = physical_metrics
        .iter()
        .chain(mental_metrics.iter())
        .copied()
        .collect();

    let mut rows = Vec::new();
    for p in physical {
        for m in mental.iter().filter(|m| m.date() == p.date()) {
            let values = physical_metrics
                .iter()
                .map(|&metric| p.metric(metric))
                .chain(mental_metrics.iter().map(|&metric| m.metric(metric)))
                .collect();
            rows.push(JoinedRow {
                date: p.date(),
                values,
            });
        }
    }

    JoinedTable { metrics, rows }
}

/// Symmetric matrix of Pearson coefficients indexed by metric pairs
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    /// coefficients[i][j] pairs metrics[i] with metrics[j]; None marks an
    /// undefined coefficient (zero variance or too few complete pairs)
    pub coefficients: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Coefficient for a metric pair, if both metrics are in the matrix
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|&m| m == a)?;
        let j = self.metrics.iter().position(|&m| m == b)?;
        self.coefficients[i][j]
    }
}

/// Compute the Pearson correlation matrix over a joined table
///
/// Refuses with InsufficientData when the join produced five rows or fewer.
/// The diagonal is always 1.0. Off-diagonal pairs use only rows where both
/// values are present; a pair with fewer than two such rows, or with zero
/// variance on either side, is undefined (None) rather than a
/// division-by-zero failure.
pub fn correlation_matrix(table: &JoinedTable) -> Result<CorrelationMatrix, AnalyticsError> {
    if table.rows.len() < MIN_CORRELATION_SAMPLES {
        return Err(AnalyticsError::InsufficientData {
            rows: table.rows.len(),
            min: MIN_CORRELATION_SAMPLES,
        });
    }

    let n = table.metrics.len();
    let mut coefficients = vec![vec![None; n]; n];

    for i in 0..n {
        coefficients[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let pairs: Vec<(f64, f64)> = table
                .rows
                .iter()
                .filter_map(|row| match (row.values[i], row.values[j]) {
                    (Some(a), Some(b)) => Some((a, b)),
                    _ => None,
                })
                .collect();
            let r = pearson(&pairs);
            coefficients[i][j] = r;
            coefficients[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        metrics: table.metrics.clone(),
        coefficients,
    })
}

/// Pearson coefficient over complete pairs; None when undefined
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    let n = pairs.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let sum_a: f64 = pairs.iter().map(|(a, _)| a).sum();
    let sum_b: f64 = pairs.iter().map(|(_, b)| b).sum();
    let sum_ab: f64 = pairs.iter().map(|(a, b)| a * b).sum();
    let sum_aa: f64 = pairs.iter().map(|(a, _)| a * a).sum();
    let sum_bb: f64 = pairs.iter().map(|(_, b)| b * b).sum();

    let numerator = nf * sum_ab - sum_a * sum_b;
    let denominator = ((nf * sum_aa - sum_a * sum_a) * (nf * sum_bb - sum_b * sum_b)).sqrt();

    if denominator.abs() < 1e-10 {
        // Zero variance on at least one side
        None
    } else {
        Some(numerator / denominator)
    }
}

/// How strongly two metrics are associated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strength {
    Strong,
    Moderate,
}

/// Sign of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
}

/// One ranked correlation between two distinct metrics
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationPair {
    pub metric_a: Metric,
    pub metric_b: Metric,
    pub coefficient: f64,
    pub strength: Strength,
    pub direction: Direction,
}

/// Rank the strongest associations above a significance threshold
///
/// Candidates are unordered pairs of distinct metrics whose coefficient is
/// defined and strictly exceeds the threshold in absolute value. They are
/// sorted descending by |coefficient| with a stable sort, so ties keep the
/// pair's first-encountered order in the matrix's metric enumeration, and
/// truncated to `limit` entries.
///
/// Fails with InvalidParameter when the threshold is outside [0, 1).
pub fn top_correlations(
    matrix: &CorrelationMatrix,
    threshold: f64,
    limit: usize,
) -> Result<Vec<CorrelationPair>, AnalyticsError> {
    if !(0.0..1.0).contains(&threshold) {
        return Err(AnalyticsError::InvalidParameter {
            name: "threshold",
            message: format!("correlation threshold must be in [0, 1), got {}", threshold),
        });
    }

    let n = matrix.metrics.len();
    let mut pairs = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if let Some(coefficient) = matrix.coefficients[i][j] {
                if coefficient.abs() > threshold {
                    pairs.push(CorrelationPair {
                        metric_a: matrix.metrics[i],
                        metric_b: matrix.metrics[j],
                        coefficient,
                        strength: if coefficient.abs() > STRONG_THRESHOLD {
                            Strength::Strong
                        } else {
                            Strength::Moderate
                        },
                        direction: if coefficient > 0.0 {
                            Direction::Positive
                        } else {
                            Direction::Negative
                        },
                    });
                }
            }
        }
    }

    // Stable sort keeps enumeration order for equal magnitudes
    pairs.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs.truncate(limit);
    Ok(pairs)
}
