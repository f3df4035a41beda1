/// Aggregation engine: scalar KPIs over nullable metric fields
///
/// Each KPI is the arithmetic mean of one metric across a filtered record
/// set, with null readings dropped per field. "No data" is an explicit
/// marker (None), not a zero - the presentation layer decides how to render
/// it (the dashboard shows 0, matching the legacy behavior).

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{HealthRecord, MentalEntry, Metric, PhysicalEntry};

/// One computed KPI
#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    /// Which metric this KPI summarizes
    pub metric: Metric,
    /// Full-precision mean; None when no record carries the field
    pub value: Option<f64>,
    /// Number of non-null readings that contributed
    pub samples: usize,
}

/// Mean of one metric across records, ignoring null readings
///
/// Returns None when no record carries the field - the explicit "no data"
/// marker. Callers that want the legacy dashboard rendering map it to 0.
pub fn mean_of<R: HealthRecord>(records: &[R], metric: Metric) -> Option<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.metric(metric)).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Average, minimum and maximum of one metric's non-null readings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSummary {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub samples: usize,
}

impl FieldSummary {
    /// The neutral summary for a field with no readings
    pub fn empty() -> Self {
        Self {
            avg: 0.0,
            min: 0.0,
            max: 0.0,
            samples: 0,
        }
    }
}

/// Summarize one metric across records, ignoring null readings
pub fn summarize<R: HealthRecord>(records: &[R], metric: Metric) -> FieldSummary {
    let values: Vec<f64> = records.iter().filter_map(|r| r.metric(metric)).collect();
    if values.is_empty() {
        return FieldSummary::empty();
    }
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    FieldSummary {
        avg: sum / values.len() as f64,
        min,
        max,
        samples: values.len(),
    }
}

/// Compute KPIs for the requested metrics
///
/// Each metric is evaluated against the record set it belongs to. Empty
/// inputs yield the neutral marker for every metric and never fail.
pub fn compute_kpis(
    physical: &[PhysicalEntry],
    mental: &[MentalEntry],
    metrics: &[Metric],
) -> Vec<Kpi> {
    metrics
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = if metric.is_physical() {
                physical.iter().filter_map(|r| r.metric(metric)).collect()
            } else {
                mental.iter().filter_map(|r| r.metric(metric)).collect()
            };
            let samples = values.len();
            let value = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / samples as f64)
            };
            Kpi {
                metric,
                value,
                samples,
            }
        })
        .collect()
}

/// The full date span of the supplied entry sets
///
/// Used when the caller supplies no explicit range: the dashboard defaults
/// to everything it has, and to today..today when there is no data at all.
pub fn full_date_span(
    physical: &[PhysicalEntry],
    mental: &[MentalEntry],
    today: NaiveDate,
) -> (NaiveDate, NaiveDate) {
    let dates = physical
        .iter()
        .map(|e| e.date())
        .chain(mental.iter().map(|e| e.date()));

    let mut min = None;
    let mut max = None;
    for d in dates {
        min = Some(min.map_or(d, |m: NaiveDate| m.min(d)));
        max = Some(max.map_or(d, |m: NaiveDate| m.max(d)));
    }
    match (min, max) {
        (Some(lo), Some(hi)) => (lo, hi),
        _ => (today, today),
    }
}
