/// Trend analyzer: rolling averages and short-term direction
///
/// Works on a time series of (date, optional value) points extracted from
/// one metric. Unlike the filter stage, the analyzer does not trust its
/// input ordering and sorts by date itself.

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::AnalyticsError;
use crate::domain::{HealthRecord, Metric};

/// One point of a metric time series; None marks a null reading
pub type SeriesPoint = (NaiveDate, Option<f64>);

/// Extract a metric series from records, one point per record
///
/// Null readings are preserved so the rolling window can account for them.
pub fn metric_series<R: HealthRecord>(records: &[R], metric: Metric) -> Vec<SeriesPoint> {
    records.iter().map(|r| (r.date(), r.metric(metric))).collect()
}

/// Short-term direction of a series relative to its overall level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Trailing rolling average with a window that shrinks at the start
///
/// The series is sorted ascending by date first (stable, so same-date points
/// keep their relative order). Output point i is the mean over input points
/// [max(0, i-window+1), i]; null readings are excluded from both numerator
/// and denominator, and a window of only nulls yields a null point. The
/// output has the same length and date order as the sorted input, and a
/// window of 1 is the identity on non-null values.
///
/// Fails with InvalidParameter on a zero window or an empty series.
pub fn rolling_average(
    series: &[SeriesPoint],
    window: usize,
) -> Result<Vec<SeriesPoint>, AnalyticsError> {
    if window == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "window",
            message: "rolling window must be a positive integer".to_string(),
        });
    }
    if series.is_empty() {
        return Err(AnalyticsError::InvalidParameter {
            name: "series",
            message: "cannot compute a rolling average over an empty series".to_string(),
        });
    }

    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(date, _)| *date);

    let averaged = sorted
        .iter()
        .enumerate()
        .map(|(i, (date, _))| {
            let lo = i + 1 - window.min(i + 1);
            let values: Vec<f64> = sorted[lo..=i].iter().filter_map(|(_, v)| *v).collect();
            let avg = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            };
            (*date, avg)
        })
        .collect();

    Ok(averaged)
}

/// Classify the short-term direction of a series
///
/// Compares the mean of the last `recent_window` non-null values (or fewer
/// if the series is shorter) against the mean of all non-null values:
/// greater is Increasing, smaller is Decreasing, exactly equal is Stable.
/// A series with fewer than two non-null points is Stable by definition.
///
/// Fails with InvalidParameter on a zero recent window.
pub fn trend_direction(
    series: &[SeriesPoint],
    recent_window: usize,
) -> Result<TrendDirection, AnalyticsError> {
    if recent_window == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "recent_window",
            message: "recent window must be a positive integer".to_string(),
        });
    }

    let mut sorted = series.to_vec();
    sorted.sort_by_key(|(date, _)| *date);
    let values: Vec<f64> = sorted.iter().filter_map(|(_, v)| *v).collect();

    if values.len() < 2 {
        return Ok(TrendDirection::Stable);
    }

    let overall = values.iter().sum::<f64>() / values.len() as f64;
    let recent_slice = &values[values.len() - recent_window.min(values.len())..];
    let recent = recent_slice.iter().sum::<f64>() / recent_slice.len() as f64;

    Ok(if recent > overall {
        TrendDirection::Increasing
    } else if recent < overall {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn series(points: &[(&str, Option<f64>)]) -> Vec<SeriesPoint> {
        points.iter().map(|(d, v)| (date(d), *v)).collect()
    }

    #[test]
    fn test_rolling_window_two() {
        let input = series(&[
            ("2024-03-01", Some(70.0)),
            ("2024-03-02", Some(80.0)),
            ("2024-03-03", Some(90.0)),
        ]);
        let out = rolling_average(&input, 2).unwrap();
        let values: Vec<Option<f64>> = out.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![Some(70.0), Some(75.0), Some(85.0)]);
    }

    #[test]
    fn test_rolling_window_one_is_identity() {
        let input = series(&[
            ("2024-03-01", Some(3.0)),
            ("2024-03-02", None),
            ("2024-03-03", Some(5.0)),
        ]);
        let out = rolling_average(&input, 1).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_rolling_sorts_input_first() {
        let input = series(&[
            ("2024-03-03", Some(90.0)),
            ("2024-03-01", Some(70.0)),
            ("2024-03-02", Some(80.0)),
        ]);
        let out = rolling_average(&input, 2).unwrap();
        let dates: Vec<NaiveDate> = out.iter().map(|(d, _)| *d).collect();
        assert_eq!(
            dates,
            vec![date("2024-03-01"), date("2024-03-02"), date("2024-03-03")]
        );
        let values: Vec<Option<f64>> = out.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![Some(70.0), Some(75.0), Some(85.0)]);
    }

    #[test]
    fn test_rolling_excludes_nulls_from_window() {
        let input = series(&[
            ("2024-03-01", Some(10.0)),
            ("2024-03-02", None),
            ("2024-03-03", Some(30.0)),
        ]);
        let out = rolling_average(&input, 3).unwrap();
        let values: Vec<Option<f64>> = out.iter().map(|(_, v)| *v).collect();
        // Window at index 1 sees [10, null] -> mean(10); at index 2 [10, null, 30] -> mean(10, 30)
        assert_eq!(values, vec![Some(10.0), Some(10.0), Some(20.0)]);
    }

    #[test]
    fn test_rolling_all_null_window_is_null() {
        let input = series(&[("2024-03-01", None), ("2024-03-02", None)]);
        let out = rolling_average(&input, 2).unwrap();
        assert_eq!(out[0].1, None);
        assert_eq!(out[1].1, None);
    }

    #[test]
    fn test_rolling_same_length_and_order() {
        let input = series(&[
            ("2024-03-02", Some(1.0)),
            ("2024-03-01", Some(2.0)),
            ("2024-03-04", Some(3.0)),
            ("2024-03-03", None),
        ]);
        let out = rolling_average(&input, 3).unwrap();
        assert_eq!(out.len(), input.len());
        let dates: Vec<NaiveDate> = out.iter().map(|(d, _)| *d).collect();
        let mut expected = dates.clone();
        expected.sort();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_rolling_invalid_parameters() {
        let input = series(&[("2024-03-01", Some(1.0))]);
        assert!(matches!(
            rolling_average(&input, 0),
            Err(AnalyticsError::InvalidParameter { name: "window", .. })
        ));
        assert!(matches!(
            rolling_average(&[], 3),
            Err(AnalyticsError::InvalidParameter { name: "series", .. })
        ));
    }

    #[test]
    fn test_trend_decreasing_example() {
        // Mood 3,4,5,2,1 over five days: recent mean(2,1)=1.5 vs overall 3.0
        let input = series(&[
            ("2024-03-01", Some(3.0)),
            ("2024-03-02", Some(4.0)),
            ("2024-03-03", Some(5.0)),
            ("2024-03-04", Some(2.0)),
            ("2024-03-05", Some(1.0)),
        ]);
        assert_eq!(trend_direction(&input, 2).unwrap(), TrendDirection::Decreasing);
    }

    #[test]
    fn test_trend_increasing() {
        let input = series(&[
            ("2024-03-01", Some(1.0)),
            ("2024-03-02", Some(2.0)),
            ("2024-03-03", Some(5.0)),
        ]);
        assert_eq!(trend_direction(&input, 1).unwrap(), TrendDirection::Increasing);
    }

    #[test]
    fn test_trend_stable_when_equal_or_sparse() {
        let flat = series(&[("2024-03-01", Some(4.0)), ("2024-03-02", Some(4.0))]);
        assert_eq!(trend_direction(&flat, 1).unwrap(), TrendDirection::Stable);

        let single = series(&[("2024-03-01", Some(4.0)), ("2024-03-02", None)]);
        assert_eq!(trend_direction(&single, 7).unwrap(), TrendDirection::Stable);

        assert_eq!(trend_direction(&[], 7).unwrap(), TrendDirection::Stable);
    }

    #[test]
    fn test_trend_zero_window_rejected() {
        let input = series(&[("2024-03-01", Some(1.0))]);
        assert!(trend_direction(&input, 0).is_err());
    }
}
