/// Unit tests for the analytics layer through the public API
use health_dashboard_mcp::*;
use chrono::{NaiveDate, Utc};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

fn physical(user: &UserId, day: &str, heart_rate: Option<f64>, sleep: Option<f64>) -> PhysicalEntry {
    PhysicalEntry::from_existing(
        EntryId::new(),
        user.clone(),
        date(day),
        heart_rate,
        None,
        sleep,
        None,
        None,
        Utc::now(),
    )
}

fn mental(user: &UserId, day: &str, mood: Option<f64>, stress: Option<f64>) -> MentalEntry {
    MentalEntry::from_existing(
        EntryId::new(),
        user.clone(),
        date(day),
        mood,
        stress,
        None,
        None,
        None,
        Utc::now(),
    )
}

#[test]
fn filter_single_date_returns_only_matches() {
    let alice = UserId::new();
    let bob = UserId::new();
    let records = vec![
        physical(&alice, "2024-05-01", Some(60.0), None),
        physical(&bob, "2024-05-01", Some(70.0), None),
        physical(&alice, "2024-05-02", Some(80.0), None),
    ];

    let only_alice = filter_records(&records, Some(&alice), DateRange::single(date("2024-05-01")));
    assert_eq!(only_alice.len(), 1);
    assert_eq!(only_alice[0].user_id, alice);
    assert_eq!(only_alice[0].date, date("2024-05-01"));

    let everyone = filter_records(&records, None, DateRange::single(date("2024-05-01")));
    assert_eq!(everyone.len(), 2);
}

#[test]
fn filter_is_commutative_in_bound_order() {
    let alice = UserId::new();
    let records = vec![
        physical(&alice, "2024-05-01", Some(60.0), None),
        physical(&alice, "2024-05-07", Some(70.0), None),
    ];
    let a = date("2024-05-01");
    let b = date("2024-05-07");
    assert_eq!(
        filter_records(&records, Some(&alice), DateRange::new(a, b)),
        filter_records(&records, Some(&alice), DateRange::new(b, a)),
    );
}

#[test]
fn kpis_on_empty_input_never_fail() {
    let metrics = [Metric::HeartRate, Metric::Steps, Metric::SleepHours, Metric::Mood];
    let kpis = compute_kpis(&[], &[], &metrics);
    assert_eq!(kpis.len(), metrics.len());
    for kpi in kpis {
        assert_eq!(kpi.value, None);
        assert_eq!(kpi.samples, 0);
    }
}

#[test]
fn goal_progress_is_clamped_and_monotonic() {
    let user = UserId::new();
    let mut goal = Goal::new(
        user,
        "Sleep more".to_string(),
        String::new(),
        "physical".to_string(),
        8.0,
        0.0,
        "hours".to_string(),
        Utc::now().naive_utc().date(),
    )
    .expect("valid goal");

    let mut previous = 0;
    for step in 0..20 {
        goal.current_value = step as f64;
        let pct = goal.progress_percent();
        assert!((0..=100).contains(&(pct as i32)));
        assert!(pct >= previous);
        previous = pct;
    }
}

#[test]
fn rolling_average_window_one_is_identity() {
    let series: Vec<SeriesPoint> = vec![
        (date("2024-05-01"), Some(3.0)),
        (date("2024-05-02"), Some(4.0)),
        (date("2024-05-03"), None),
    ];
    assert_eq!(rolling_average(&series, 1).expect("valid window"), series);
}

#[test]
fn rolling_average_trailing_window_shrinks_at_start() {
    let series: Vec<SeriesPoint> = vec![
        (date("2024-05-01"), Some(70.0)),
        (date("2024-05-02"), Some(80.0)),
        (date("2024-05-03"), Some(90.0)),
    ];
    let out = rolling_average(&series, 2).expect("valid window");
    assert_eq!(out.len(), series.len());
    let values: Vec<Option<f64>> = out.iter().map(|(_, v)| *v).collect();
    assert_eq!(values, vec![Some(70.0), Some(75.0), Some(85.0)]);
}

#[test]
fn rolling_average_rejects_bad_parameters() {
    let series: Vec<SeriesPoint> = vec![(date("2024-05-01"), Some(1.0))];
    assert!(matches!(
        rolling_average(&series, 0),
        Err(AnalyticsError::InvalidParameter { .. })
    ));
    assert!(matches!(
        rolling_average(&[], 2),
        Err(AnalyticsError::InvalidParameter { .. })
    ));
}

#[test]
fn trend_direction_reference_example() {
    // Mood 3,4,5,2,1: recent mean over 2 days is 1.5, overall 3.0
    let user = UserId::new();
    let records: Vec<MentalEntry> = [3.0, 4.0, 5.0, 2.0, 1.0]
        .iter()
        .enumerate()
        .map(|(i, mood)| {
            mental(&user, &format!("2024-05-0{}", i + 1), Some(*mood), None)
        })
        .collect();
    let series = metric_series(&records, Metric::Mood);
    assert_eq!(
        trend_direction(&series, 2).expect("valid window"),
        TrendDirection::Decreasing
    );
}

#[test]
fn join_without_overlap_reports_insufficient_data() {
    let user = UserId::new();
    let physical_entries = vec![physical(&user, "2024-05-01", Some(60.0), Some(7.0))];
    let mental_entries = vec![mental(&user, "2024-06-01", Some(3.0), Some(2.0))];

    let table = inner_join_by_date(
        &physical_entries,
        &mental_entries,
        &Metric::PHYSICAL,
        &Metric::MENTAL,
    );
    assert!(table.rows.is_empty());
    assert!(matches!(
        correlation_matrix(&table),
        Err(AnalyticsError::InsufficientData { .. })
    ));
}

#[test]
fn perfectly_linear_fields_rank_first() {
    let user = UserId::new();
    let mut physical_entries = Vec::new();
    let mut mental_entries = Vec::new();
    for day in 1..=10 {
        let stress = (day % 5 + 1) as f64;
        physical_entries.push(physical(
            &user,
            &format!("2024-05-{:02}", day),
            Some(58.0 + (day % 4) as f64),
            // Sleep is a perfect linear function of stress
            Some(10.0 - stress),
        ));
        mental_entries.push(mental(
            &user,
            &format!("2024-05-{:02}", day),
            Some((day % 3 + 1) as f64),
            Some(stress),
        ));
    }

    let table = inner_join_by_date(
        &physical_entries,
        &mental_entries,
        &Metric::PHYSICAL,
        &Metric::MENTAL,
    );
    let matrix = correlation_matrix(&table).expect("enough rows");
    let r = matrix
        .get(Metric::SleepHours, Metric::StressLevel)
        .expect("defined coefficient");
    assert!((r.abs() - 1.0).abs() < 1e-9);

    let top = top_correlations(&matrix, 0.3, 5).expect("valid threshold");
    assert_eq!(top[0].metric_a, Metric::SleepHours);
    assert_eq!(top[0].metric_b, Metric::StressLevel);
    assert_eq!(top[0].strength, Strength::Strong);
    assert_eq!(top[0].direction, Direction::Negative);
}

#[test]
fn top_correlations_never_include_self_or_weak_pairs() {
    let user = UserId::new();
    let mut physical_entries = Vec::new();
    let mut mental_entries = Vec::new();
    for day in 1..=14 {
        physical_entries.push(physical(
            &user,
            &format!("2024-05-{:02}", day),
            Some(55.0 + (day * day % 13) as f64),
            Some(5.0 + (day % 4) as f64),
        ));
        mental_entries.push(mental(
            &user,
            &format!("2024-05-{:02}", day),
            Some((day % 5 + 1) as f64),
            Some((day % 2 + 1) as f64),
        ));
    }
    let table = inner_join_by_date(
        &physical_entries,
        &mental_entries,
        &Metric::PHYSICAL,
        &Metric::MENTAL,
    );
    let matrix = correlation_matrix(&table).expect("enough rows");

    let threshold = 0.3;
    let top = top_correlations(&matrix, threshold, 5).expect("valid threshold");
    assert!(top.len() <= 5);
    for pair in &top {
        assert_ne!(pair.metric_a, pair.metric_b);
        assert!(pair.coefficient.abs() > threshold);
    }
    // Ranked descending by absolute coefficient
    for pair in top.windows(2) {
        assert!(pair[0].coefficient.abs() >= pair[1].coefficient.abs());
    }
}

#[test]
fn demo_snapshot_is_deterministic() {
    let seed = date("2024-06-15");
    let a = demo_snapshot(seed);
    let b = demo_snapshot(seed);
    assert_eq!(a.physical.len(), b.physical.len());
    for (x, y) in a.physical.iter().zip(b.physical.iter()) {
        assert_eq!(x.date, y.date);
        assert_eq!(x.steps, y.steps);
        assert_eq!(x.sleep_hours, y.sleep_hours);
    }
}
