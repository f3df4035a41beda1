/// MentalEntry entity for daily mental health check-ins
///
/// Mood, stress, anxiety and energy are 1-5 ratings; meditation is tracked
/// in minutes. As with physical entries, every field is optional.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{DomainError, EntryId, HealthRecord, Metric, UserId};

/// One day's mental health check-in for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentalEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Which user this entry is for
    pub user_id: UserId,
    /// Which day the check-in is for
    pub date: NaiveDate,
    /// Mood rating, 1 (very sad) to 5 (very happy)
    pub mood: Option<f64>,
    /// Stress rating, 1 (none) to 5 (very stressed)
    pub stress_level: Option<f64>,
    /// Anxiety rating, 1 (none) to 5 (very anxious)
    pub anxiety_level: Option<f64>,
    /// Energy rating, 1 (very low) to 5 (very high)
    pub energy_level: Option<f64>,
    /// Minutes spent meditating
    pub meditation_minutes: Option<f64>,
    /// When this entry was recorded; informational only, never aggregated
    pub created_at: DateTime<Utc>,
}

impl MentalEntry {
    /// Create a new mental entry with validation
    pub fn new(
        user_id: UserId,
        date: NaiveDate,
        mood: Option<f64>,
        stress_level: Option<f64>,
        anxiety_level: Option<f64>,
        energy_level: Option<f64>,
        meditation_minutes: Option<f64>,
    ) -> Result<Self, DomainError> {
        Self::validate_date(&date)?;
        Self::validate_rating("mood", &mood)?;
        Self::validate_rating("stress_level", &stress_level)?;
        Self::validate_rating("anxiety_level", &anxiety_level)?;
        Self::validate_rating("energy_level", &energy_level)?;
        Self::validate_minutes("meditation_minutes", &meditation_minutes)?;

        Ok(Self {
            id: EntryId::new(),
            user_id,
            date,
            mood,
            stress_level,
            anxiety_level,
            energy_level,
            meditation_minutes,
            created_at: Utc::now(),
        })
    }

    /// Create an entry from existing data (used when loading a snapshot)
    #[allow(clippy::too_many_arguments)]
    pub fn from_existing(
        id: EntryId,
        user_id: UserId,
        date: NaiveDate,
        mood: Option<f64>,
        stress_level: Option<f64>,
        anxiety_level: Option<f64>,
        energy_level: Option<f64>,
        meditation_minutes: Option<f64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            date,
            mood,
            stress_level,
            anxiety_level,
            energy_level,
            meditation_minutes,
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

    /// Ratings are on a 1-5 scale
    fn validate_rating(field: &str, value: &Option<f64>) -> Result<(), DomainError> {
        if let Some(v) = value {
            if !v.is_finite() || *v < 1.0 || *v > 5.0 {
                return Err(DomainError::InvalidValue {
                    message: format!("{} must be between 1 and 5", field),
                });
            }
        }
        Ok(())
    }

    fn validate_minutes(field: &str, value: &Option<f64>) -> Result<(), DomainError> {
        if let Some(v) = value {
            if !v.is_finite() || *v < 0.0 || *v > 1_440.0 {
                return Err(DomainError::InvalidValue {
                    message: format!("{} must be between 0 and 1440", field),
                });
            }
        }
        Ok(())
    }
}

impl HealthRecord for MentalEntry {
    fn user_id(&self) -> &UserId {
        &self.user_id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Mood => self.mood,
            Metric::StressLevel => self.stress_level,
            Metric::AnxietyLevel => self.anxiety_level,
            Metric::EnergyLevel => self.energy_level,
            Metric::MeditationMinutes => self.meditation_minutes,
            // Physical metrics are statically absent from mental entries
            _ => None,
        }
    }
}
