/// Integration tests driving the dashboard tools end to end
use health_dashboard_mcp::*;
use tempfile::tempdir;

#[tokio::test]
async fn server_seeds_demo_data_when_file_missing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let data_path = dir.path().join("health_data.json");

    let server = HealthDashboardServer::new(data_path.clone())
        .await
        .expect("Failed to create server");

    // The demo seed gives the dashboard one user with a month of history
    let users = server.store().list_users().expect("Failed to list users");
    assert_eq!(users.len(), 1);
    assert!(!server.store().physical_entries().unwrap().is_empty());
    assert!(data_path.exists());
}

#[tokio::test]
async fn server_exposes_store_and_analytics() {
    let server = HealthDashboardServer::demo();

    // Both components are reachable for embedding and testing
    let _store: &MemoryStore = server.store();
    let _analytics: &AnalyticsEngine = server.analytics();

    // And the store satisfies the injection seam used by the tools
    let _: &dyn RecordStore = server.store();
}

#[tokio::test]
async fn data_survives_server_restart() {
    let dir = tempdir().expect("Failed to create temp dir");
    let data_path = dir.path().join("health_data.json");

    let entry_count = {
        let server = HealthDashboardServer::new(data_path.clone())
            .await
            .expect("Failed to create first server");
        let user = server.store().list_users().unwrap()[0].clone();

        let response = log_physical(
            server.store(),
            LogPhysicalParams {
                user: user.label(),
                date: None,
                heart_rate: Some(64.0),
                steps: Some(11_000.0),
                sleep_hours: Some(7.8),
                weight: None,
                exercise_minutes: Some(25.0),
            },
        )
        .expect("Failed to log entry");
        assert!(response.success);

        server.store().physical_entries().unwrap().len()
    };

    // A second server on the same path sees the logged entry
    let server2 = HealthDashboardServer::new(data_path)
        .await
        .expect("Failed to create second server");
    assert_eq!(server2.store().physical_entries().unwrap().len(), entry_count);
}

#[tokio::test]
async fn summary_tool_reports_kpis_and_goals() {
    let server = HealthDashboardServer::demo();

    let response = dashboard_summary(
        server.store(),
        SummaryParams {
            user: Some("demo@example.com".to_string()),
            start_date: None,
            end_date: None,
        },
    )
    .expect("Failed to compute summary");

    assert_eq!(response.kpis.len(), 4);
    // The demo history covers every summary metric
    for kpi in &response.kpis {
        assert!(kpi.value.is_some(), "no data for {}", kpi.metric);
        assert!(kpi.samples > 0);
    }
    assert_eq!(response.goals.len(), 3);
    assert!(response.message.contains("Health summary"));
}

#[tokio::test]
async fn summary_tool_renders_no_data_as_zero() {
    let store = MemoryStore::new();
    let response = dashboard_summary(
        &store,
        SummaryParams {
            user: None,
            start_date: None,
            end_date: None,
        },
    )
    .expect("Failed to compute summary");

    for kpi in &response.kpis {
        assert_eq!(kpi.value, None);
        // Legacy rendering: no data displays as zero
        assert!(kpi.display.starts_with('0'));
    }
}

#[tokio::test]
async fn trends_tool_follows_the_demo_series() {
    let server = HealthDashboardServer::demo();

    let response = health_trends(
        server.store(),
        TrendsParams {
            metric: "mood".to_string(),
            user: None,
            start_date: None,
            end_date: None,
            window: Some(3),
            recent_window: None,
        },
    )
    .expect("Failed to compute trends");

    assert!(!response.points.is_empty());
    assert_eq!(response.window, 3);
    // Dates come back sorted ascending
    let dates: Vec<&String> = response.points.iter().map(|p| &p.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn trends_tool_rejects_bad_window() {
    let server = HealthDashboardServer::demo();

    let result = health_trends(
        server.store(),
        TrendsParams {
            metric: "mood".to_string(),
            user: None,
            start_date: None,
            end_date: None,
            window: Some(0),
            recent_window: None,
        },
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn correlations_tool_reports_insufficient_data_for_sparse_history() {
    let store = MemoryStore::new();
    let response = health_correlations(
        &store,
        CorrelationsParams {
            user: None,
            start_date: None,
            end_date: None,
            threshold: None,
            limit: None,
        },
    )
    .expect("Insufficient data is a result, not an error");

    assert!(!response.computed);
    assert_eq!(response.paired_observations, 0);
    assert!(response.message.contains("Insufficient data"));
}

#[tokio::test]
async fn correlations_tool_ranks_demo_associations() {
    let server = HealthDashboardServer::demo();

    let response = health_correlations(
        server.store(),
        CorrelationsParams {
            user: None,
            start_date: None,
            end_date: None,
            threshold: Some(0.3),
            limit: Some(5),
        },
    )
    .expect("Failed to compute correlations");

    assert!(response.computed);
    assert!(response.paired_observations >= 6);
    for c in &response.correlations {
        assert_ne!(c.metric_a, c.metric_b);
        assert!(c.coefficient.abs() > 0.3);
    }
}

#[tokio::test]
async fn goal_flow_set_update_list() {
    let server = HealthDashboardServer::demo();
    let store = server.store();

    let created = set_goal(
        store,
        SetGoalParams {
            user: "demo@example.com".to_string(),
            title: "Drink water".to_string(),
            description: None,
            category: Some("physical".to_string()),
            target_value: 2.0,
            current_value: Some(0.5),
            unit: Some("liters".to_string()),
            target_date: "2030-01-01".to_string(),
        },
    )
    .expect("Failed to create goal");
    assert_eq!(created.progress_percent, Some(25));

    let goal_id = created.goal_id.expect("goal id");
    let updated = update_goal(
        store,
        UpdateGoalParams {
            goal_id: goal_id.clone(),
            current_value: Some(3.0),
            target_value: None,
            completed: Some(true),
        },
    )
    .expect("Failed to update goal");
    // Overshooting the target clamps at 100
    assert_eq!(updated.progress_percent, Some(100));

    let listed = list_goals(
        store,
        ListGoalsParams {
            user: Some("demo@example.com".to_string()),
            open_only: Some(true),
        },
    )
    .expect("Failed to list goals");
    assert!(listed.goals.iter().all(|g| !g.completed));
    assert!(listed.goals.iter().all(|g| g.goal_id != goal_id));
}

#[tokio::test]
async fn insights_tool_always_produces_guidance() {
    let server = HealthDashboardServer::demo();

    let response = health_insights(
        server.store(),
        InsightsParams {
            user: Some("demo@example.com".to_string()),
            start_date: None,
            end_date: None,
        },
    )
    .expect("Failed to generate insights");

    assert!(!response.insights.is_empty());
    assert!(!response.suggestions.is_empty());
}

#[tokio::test]
async fn unknown_user_is_rejected() {
    let server = HealthDashboardServer::demo();

    let result = dashboard_summary(
        server.store(),
        SummaryParams {
            user: Some("nobody@example.com".to_string()),
            start_date: None,
            end_date: None,
        },
    );
    assert!(matches!(
        result,
        Err(ToolError::Store(StoreError::UserNotFound { .. }))
    ));
}
