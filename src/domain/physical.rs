/// PhysicalEntry entity for daily physical health readings
///
/// This module defines the PhysicalEntry struct that represents one day's
/// physical measurements for a user. Every measurement is optional - a
/// record with only steps filled in is perfectly valid.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, EntryId, HealthRecord, Metric, UserId};

/// One day's physical health readings for a user
///
/// The `date` is a calendar-day key: filtering and the physical/mental join
/// operate on it directly. Multiple entries on the same date are valid and
/// are never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which user this entry is for
    pub user_id: UserId,
    /// Which day the readings are for
    pub date: NaiveDate,
    /// Resting heart rate in bpm
    pub heart_rate: Option<f64>,
    /// Step count for the day
    pub steps: Option<f64>,
    /// Hours slept
    pub sleep_hours: Option<f64>,
    /// Body weight in kg
    pub weight: Option<f64>,
    /// Minutes of exercise
    pub exercise_minutes: Option<f64>,
    /// When this entry was recorded; informational only, never aggregated
    pub created_at: DateTime<Utc>,
}

impl PhysicalEntry {
    /// Create a new physical entry with validation
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        heart_rate: Option<f64>,
        steps: Option<f64>,
        sleep_hours: Option<f64>,
        weight: Option<f64>,
        exercise_minutes: Option<f64>,
    ) -> Result<Self, DomainError> {
        Self::validate_date(&date)?;
        Self::validate_range("heart_rate", &heart_rate, 30.0, 220.0)?;
        Self::validate_range("steps", &steps, 0.0, 50_000.0)?;
        Self::validate_range("sleep_hours", &sleep_hours, 0.0, 24.0)?;
        Self::validate_positive("weight", &weight)?;
        Self::validate_range("exercise_minutes", &exercise_minutes, 0.0, 1_440.0)?;

        Ok(Self {
            id: EntryId::new(),
            user_id,
            date,
            heart_rate,
            steps,
            sleep_hours,
            weight,
            exercise_minutes,
            created_at: Utc::now(),
        })
    }

    /// Create an entry from existing data (used when loading a snapshot)
    ///
    /// Assumes the data was validated when first created.
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: EntryId,
        user_id: UserId,
        date: NaiveDate,
        heart_rate: Option<f64>,
        steps: Option<f64>,
        sleep_hours: Option<f64>,
        weight: Option<f64>,
        exercise_minutes: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            heart_rate,
            steps,
            sleep_hours,
            weight,
            exercise_minutes,
            created_at,
        }
    }

    // Validation helper methods

    /// Entries cannot be logged for future dates
    fn validate_date(date: &NaiveDate) -> Result<(), DomainError> {
        let today = Utc::now().naive_utc().date();
        if *date > today {
            return Err(DomainError::InvalidDate(
                "Cannot log health data for future dates".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_range(
        field: &str,
        value: &Option<f64>,
        min: f64,
        max: f64,
    ) -> Result<(), DomainError> {
        if let Some(v) = value {
            if !v.is_finite() || *v < min || *v > max {
                return Err(DomainError::InvalidValue {
                    message: format!("{} must be between {} and {}", field, min, max),
                });
            }
        }
        Ok(())
    }

    fn validate_positive(field: &str, value: &Option<f64>) -> Result<(), DomainError> {
        if let Some(v) = value {
            if !v.is_finite() || *v <= 0.0 {
                return Err(DomainError::InvalidValue {
                    message: format!("{} must be greater than 0", field),
                });
            }
        }
        Ok(())
    }
}

impl HealthRecord for PhysicalEntry {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::HeartRate => self.heart_rate,
            Metric::Steps => self.steps,
            Metric::SleepHours => self.sleep_hours,
            Metric::Weight => self.weight,
            Metric::ExerciseMinutes => self.exercise_minutes,
            // Mental metrics are statically absent from physical entries
            _ => None,
        }
    }
}
