/// User and Profile entities
///
/// A User is the owner of health entries and goals. A Profile carries the
/// optional body measurements used for BMI context in insights.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::UserId;

/// A person whose health data is tracked
///
/// Email and name are both optional; the display label falls back from one
/// to the other and finally to a shortened ID, matching how the dashboard
/// presents its user picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for this user
    pub id: UserId,
    /// Login email, if known
    pub email: Option<String>,
    /// Display name, if known
    pub name: Option<String>,
    /// When this user was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Option<String>, name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email,
            name,
            created_at: Utc::now(),
        }
    }

    /// Label shown for this user: email, else name, else id prefix
    pub fn label(&self) -> String {
        if let Some(email) = &self.email {
            if !email.trim().is_empty() {
                return email.clone();
            }
        }
        if let Some(name) = &self.name {
            if !name.trim().is_empty() {
                return name.clone();
            }
        }
        let id = self.id.to_string();
        id.chars().take(8).collect()
    }

    /// Whether a selector string (id, email or name) refers to this user
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector.is_empty() {
            return false;
        }
        if self.id.to_string() == selector {
            return true;
        }
        if let Some(email) = &self.email {
            if email.eq_ignore_ascii_case(selector) {
                return true;
            }
        }
        if let Some(name) = &self.name {
            if name.eq_ignore_ascii_case(selector) {
                return true;
            }
        }
        false
    }
}

/// Body measurements for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Which user this profile belongs to
    pub user_id: UserId,
    /// Age in years
    pub age: Option<u32>,
    /// Self-described gender, kept opaque
    pub gender: Option<String>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Weight in kilograms
    pub weight_kg: Option<f64>,
}

impl Profile {
    /// Body mass index (kg / m^2), rounded to one decimal
    ///
    /// None unless both height and weight are present and positive.
    pub fn bmi(&self) -> Option<f64> {
        let height = self.height_cm.filter(|h| *h > 0.0)?;
        let weight = self.weight_kg.filter(|w| *w > 0.0)?;
        let meters = height / 100.0;
        Some(((weight / (meters * meters)) * 10.0).round() / 10.0)
    }

    /// Standard BMI category label
    pub fn bmi_category(&self) -> Option<&'static str> {
        let bmi = self.bmi()?;
        Some(if bmi < 18.5 {
            "Underweight"
        } else if bmi < 25.0 {
            "Normal weight"
        } else if bmi < 30.0 {
            "Overweight"
        } else {
            "Obese"
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallback_chain() {
        let mut user = User::new(Some("ada@example.com".to_string()), Some("Ada".to_string()));
        assert_eq!(user.label(), "ada@example.com");

        user.email = None;
        assert_eq!(user.label(), "Ada");

        user.name = None;
        assert_eq!(user.label().len(), 8);
    }

    #[test]
    fn test_matches_by_id_email_and_name() {
        let user = User::new(Some("ada@example.com".to_string()), Some("Ada".to_string()));
        assert!(user.matches(&user.id.to_string()));
        assert!(user.matches("ADA@example.com"));
        assert!(user.matches("ada"));
        assert!(!user.matches("grace"));
        assert!(!user.matches(""));
    }

    #[test]
    fn test_bmi_rounding_and_category() {
        let profile = Profile {
            user_id: UserId::new(),
            age: Some(30),
            gender: None,
            height_cm: Some(170.0),
            weight_kg: Some(65.0),
        };
        assert_eq!(profile.bmi(), Some(22.5));
        assert_eq!(profile.bmi_category(), Some("Normal weight"));
    }

    #[test]
    fn test_bmi_requires_measurements() {
        let profile = Profile {
            user_id: UserId::new(),
            age: None,
            gender: None,
            height_cm: None,
            weight_kg: Some(65.0),
        };
        assert_eq!(profile.bmi(), None);
        assert_eq!(profile.bmi_category(), None);
    }
}
