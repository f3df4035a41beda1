/// Core types used throughout the domain layer
///
/// This module defines the fundamental types like the ID newtypes and the
/// Metric enum that are used by PhysicalEntry, MentalEntry, Goal and the
/// analytics layer.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;
use std::str::FromStr;

use crate::domain::DomainError;

/// Unique identifier for a user
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass a user ID where an entry ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user ID from a string (useful for snapshot loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a physical or mental health entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a goal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub Uuid);

impl GoalId {
    /// Generate a new random goal ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a goal ID from a string
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of tracked numeric fields
///
/// Every aggregation, trend and correlation operates on one of these. Each
/// metric knows which record set it lives on, so asking a physical entry for
/// a mental metric is statically answerable (always absent) instead of a
/// runtime key error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    // Physical entry fields
    HeartRate,
    Steps,
    SleepHours,
    Weight,
    ExerciseMinutes,
    // Mental entry fields
    Mood,
    StressLevel,
    AnxietyLevel,
    EnergyLevel,
    MeditationMinutes,
}

impl Metric {
    /// Physical metrics in their canonical enumeration order
    ///
    /// This order is also the tie-break order when ranking correlations.
    pub const PHYSICAL: [Metric; 5] = [
        Metric::HeartRate,
        Metric::Steps,
        Metric::SleepHours,
        Metric::Weight,
        Metric::ExerciseMinutes,
    ];

    /// Mental metrics in their canonical enumeration order
    pub const MENTAL: [Metric; 5] = [
        Metric::Mood,
        Metric::StressLevel,
        Metric::AnxietyLevel,
        Metric::EnergyLevel,
        Metric::MeditationMinutes,
    ];

    /// Snake-case name used in tool parameters and responses
    pub fn name(&self) -> &'static str {
        match self {
            Metric::HeartRate => "heart_rate",
            Metric::Steps => "steps",
            Metric::SleepHours => "sleep_hours",
            Metric::Weight => "weight",
            Metric::ExerciseMinutes => "exercise_minutes",
            Metric::Mood => "mood",
            Metric::StressLevel => "stress_level",
            Metric::AnxietyLevel => "anxiety_level",
            Metric::EnergyLevel => "energy_level",
            Metric::MeditationMinutes => "meditation_minutes",
        }
    }

    /// Display unit for this metric
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::HeartRate => "bpm",
            Metric::Steps => "steps",
            Metric::SleepHours => "h",
            Metric::Weight => "kg",
            Metric::ExerciseMinutes => "min",
            Metric::Mood
            | Metric::StressLevel
            | Metric::AnxietyLevel
            | Metric::EnergyLevel => "/5",
            Metric::MeditationMinutes => "min",
        }
    }

    /// Decimal places used when formatting this metric for display
    ///
    /// The analytics layer always returns full-precision means; rounding
    /// happens only at presentation.
    pub fn display_precision(&self) -> usize {
        match self {
            Metric::HeartRate | Metric::Steps | Metric::ExerciseMinutes => 0,
            Metric::MeditationMinutes => 0,
            Metric::SleepHours | Metric::Weight => 1,
            Metric::Mood
            | Metric::StressLevel
            | Metric::AnxietyLevel
            | Metric::EnergyLevel => 1,
        }
    }

    /// Whether this metric lives on physical entries
    pub fn is_physical(&self) -> bool {
        Self::PHYSICAL.contains(self)
    }

    /// Whether this metric lives on mental entries
    pub fn is_mental(&self) -> bool {
        Self::MENTAL.contains(self)
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Metric {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heart_rate" => Ok(Metric::HeartRate),
            "steps" => Ok(Metric::Steps),
            "sleep_hours" => Ok(Metric::SleepHours),
            "weight" => Ok(Metric::Weight),
            "exercise_minutes" => Ok(Metric::ExerciseMinutes),
            "mood" => Ok(Metric::Mood),
            "stress_level" => Ok(Metric::StressLevel),
            "anxiety_level" => Ok(Metric::AnxietyLevel),
            "energy_level" => Ok(Metric::EnergyLevel),
            "meditation_minutes" => Ok(Metric::MeditationMinutes),
            other => Err(DomainError::InvalidMetric(format!(
                "Unknown metric '{}'. Valid options: heart_rate, steps, sleep_hours, weight, \
                 exercise_minutes, mood, stress_level, anxiety_level, energy_level, meditation_minutes",
                other
            ))),
        }
    }
}

/// Access shared by both entry types, used by the analytics layer
///
/// `metric` returns None when the field is null on this record or when the
/// metric belongs to the other record set.
pub trait HealthRecord {
    fn user_id(&self) -> &UserId;
    fn date(&self) -> NaiveDate;
    fn metric(&self, metric: Metric) -> Option<f64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_roundtrip_names() {
        for metric in Metric::PHYSICAL.iter().chain(Metric::MENTAL.iter()) {
            let parsed: Metric = metric.name().parse().unwrap();
            assert_eq!(parsed, *metric);
        }
    }

    #[test]
    fn test_metric_set_membership() {
        assert!(Metric::HeartRate.is_physical());
        assert!(!Metric::HeartRate.is_mental());
        assert!(Metric::Mood.is_mental());
        assert!(!Metric::Mood.is_physical());
    }

    #[test]
    fn test_unknown_metric_rejected() {
        assert!("blood_type".parse::<Metric>().is_err());
    }
}
