/// Deterministic demo data
///
/// When the server starts without a snapshot (or with --demo), the store is
/// seeded with a 30-day history for one demo user so every dashboard tool
/// has something to show. The values follow simple arithmetic patterns - no
/// RNG, so the same seed date always produces the same data.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::domain::{Goal, MentalEntry, PhysicalEntry, Profile, User, UserId};
use crate::store::Snapshot;

/// Number of days of demo history
const DEMO_DAYS: i64 = 30;

/// Build the demo snapshot, ending at `today`
pub fn demo_snapshot(today: NaiveDate) -> Snapshot {
    let user = User::new(
        Some("demo@example.com".to_string()),
        Some("Demo User".to_string()),
    );
    let user_id = user.id.clone();

    let profile = Profile {
        user_id: user_id.clone(),
        age: Some(34),
        gender: Some("prefer-not-to-say".to_string()),
        height_cm: Some(172.0),
        weight_kg: Some(68.0),
    };

    let mut physical = Vec::new();
    let mut mental = Vec::new();
    for offset in (0..DEMO_DAYS).rev() {
        let date = today - Duration::days(offset);
        physical.push(demo_physical(&user_id, date));
        // The demo user skips mental check-ins on Sundays
        if date.weekday() != chrono::Weekday::Sun {
            mental.push(demo_mental(&user_id, date));
        }
    }

    let goals = demo_goals(&user_id, today);

    Snapshot {
        users: vec![user],
        profiles: vec![profile],
        physical,
        mental,
        goals,
    }
}

/// Physical readings for one demo day
///
/// A weekly rhythm: more steps and exercise midweek, longer sleep on
/// weekends, heart rate drifting with activity.
fn demo_physical(user_id: &UserId, date: NaiveDate) -> PhysicalEntry {
    let day = date.num_days_from_ce() as f64;
    let weekday = date.weekday().num_days_from_monday() as f64;

    let steps = 6_000.0 + weekday * 800.0 + (day % 5.0) * 300.0;
    let exercise = 15.0 + (weekday % 3.0) * 12.0;
    let sleep = if weekday >= 5.0 { 8.2 } else { 6.8 + (day % 3.0) * 0.3 };
    let heart_rate = 74.0 - exercise / 10.0 + (day % 4.0);
    // Weight is only logged every third day
    let weight = if date.num_days_from_ce() % 3 == 0 {
        Some(68.0 + (day % 7.0) * 0.1)
    } else {
        None
    };

    PhysicalEntry::from_existing(
        crate::domain::EntryId::new(),
        user_id.clone(),
        date,
        Some(heart_rate),
        Some(steps),
        Some(sleep),
        weight,
        Some(exercise),
        Utc::now(),
    )
}

/// Mental check-in for one demo day
fn demo_mental(user_id: &UserId, date: NaiveDate) -> MentalEntry {
    let day = date.num_days_from_ce() as f64;
    let weekday = date.weekday().num_days_from_monday() as f64;

    let stress = 1.0 + (weekday % 4.0);
    let mood = (5.5 - stress).clamp(1.0, 5.0);
    let energy = (2.0 + (day % 3.0)).clamp(1.0, 5.0);
    let anxiety = (stress - 1.0).max(1.0);
    // Meditation happens on even days
    let meditation = if date.num_days_from_ce() % 2 == 0 {
        Some(10.0 + (weekday % 2.0) * 5.0)
    } else {
        None
    };

    MentalEntry::from_existing(
        crate::domain::EntryId::new(),
        user_id.clone(),
        date,
        Some(mood),
        Some(stress),
        Some(anxiety),
        Some(energy),
        meditation,
        Utc::now(),
    )
}

/// A few goals at different stages of progress
fn demo_goals(user_id: &UserId, today: NaiveDate) -> Vec<Goal> {
    let now = Utc::now();
    vec![
        Goal::from_existing(
            crate::domain::GoalId::new(),
            user_id.clone(),
            "Walk 10k steps a day".to_string(),
            "Build up to a consistent 10,000 daily steps".to_string(),
            "physical".to_string(),
            10_000.0,
            7_200.0,
            "steps".to_string(),
            today + Duration::days(30),
            false,
            now,
            now,
        ),
        Goal::from_existing(
            crate::domain::GoalId::new(),
            user_id.clone(),
            "Sleep 8 hours".to_string(),
            "Average eight hours of sleep a night".to_string(),
            "physical".to_string(),
            8.0,
            7.1,
            "hours".to_string(),
            today + Duration::days(60),
            false,
            now,
            now,
        ),
        Goal::from_existing(
            crate::domain::GoalId::new(),
            user_id.clone(),
            "Meditate daily".to_string(),
            "Ten minutes of meditation every day for a month".to_string(),
            "mental".to_string(),
            30.0,
            30.0,
            "days".to_string(),
            today - Duration::days(5),
            true,
            now,
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_demo_snapshot_shape() {
        let snapshot = demo_snapshot(seed_date());
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.profiles.len(), 1);
        assert_eq!(snapshot.physical.len(), DEMO_DAYS as usize);
        // Sundays are skipped, so mental has fewer entries
        assert!(snapshot.mental.len() < snapshot.physical.len());
        assert!(!snapshot.mental.is_empty());
        assert_eq!(snapshot.goals.len(), 3);
    }

    #[test]
    fn test_demo_values_are_deterministic() {
        let a = demo_snapshot(seed_date());
        let b = demo_snapshot(seed_date());
        let values_a: Vec<_> = a.physical.iter().map(|e| (e.date, e.steps, e.sleep_hours)).collect();
        let values_b: Vec<_> = b.physical.iter().map(|e| (e.date, e.steps, e.sleep_hours)).collect();
        assert_eq!(values_a, values_b);
    }

    #[test]
    fn test_demo_values_within_domain_bounds() {
        let snapshot = demo_snapshot(seed_date());
        for entry in &snapshot.physical {
            let hr = entry.heart_rate.unwrap();
            assert!((30.0..=220.0).contains(&hr));
            let sleep = entry.sleep_hours.unwrap();
            assert!((0.0..=24.0).contains(&sleep));
        }
        for entry in &snapshot.mental {
            let mood = entry.mood.unwrap();
            assert!((1.0..=5.0).contains(&mood));
        }
    }
}
