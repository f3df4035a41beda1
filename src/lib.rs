/// Public library interface for the Health Dashboard MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod store;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use store::{demo_snapshot, MemoryStore, RecordStore, Snapshot, StoreError};
pub use analytics::{
    compute_kpis, correlation_matrix, filter_records, full_date_span, generate_insights,
    inner_join_by_date, mean_of, metric_series, rolling_average, summarize, top_correlations,
    trend_direction, AnalyticsEngine, AnalyticsError, CorrelationMatrix, CorrelationPair,
    DateRange, Direction, FieldSummary, InsightInputs, InsightReport, JoinedRow, JoinedTable,
    Kpi, SeriesPoint, Strength, TrendDirection, DEFAULT_CORRELATION_LIMIT,
    DEFAULT_CORRELATION_THRESHOLD, MIN_CORRELATION_SAMPLES,
};
pub use tools::{
    dashboard_summary, health_correlations, health_insights, health_trends, list_goals,
    list_users, log_mental, log_physical, set_goal, update_goal, CorrelationsParams,
    InsightsParams, ListGoalsParams, ListUsersParams, LogMentalParams, LogPhysicalParams,
    SetGoalParams, SummaryParams, ToolError, TrendsParams, UpdateGoalParams,
};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main health dashboard server that implements the MCP protocol
///
/// This server reads its data from a JSON snapshot (or a built-in demo
/// dataset) and provides tools for filtering, KPIs, trends, correlations
/// and entry/goal management.
pub struct HealthDashboardServer {
    store: MemoryStore,
    analytics: AnalyticsEngine,
}

impl HealthDashboardServer {
    /// Create a new health dashboard server backed by a snapshot file
    ///
    /// Loads the snapshot if it exists; otherwise starts with the demo
    /// dataset so the dashboard has something to show, and persists it to
    /// the given path on the first mutation.
    pub async fn new(data_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Health Dashboard server with data file: {:?}", data_path);

        let store = if data_path.exists() {
            MemoryStore::open(data_path)?
        } else {
            tracing::info!("No data file found, seeding demo data");
            let today = chrono::Utc::now().naive_utc().date();
            store::demo_snapshot(today).save(&data_path)?;
            MemoryStore::open(data_path)?
        };

        let analytics = AnalyticsEngine::new();

        Ok(Self { store, analytics })
    }

    /// Create a server with an in-memory demo dataset (no file persistence)
    pub fn demo() -> Self {
        let today = chrono::Utc::now().naive_utc().date();
        Self {
            store: MemoryStore::from_snapshot(store::demo_snapshot(today)),
            analytics: AnalyticsEngine::new(),
        }
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Report what the store holds before serving
        let users = self.store.list_users()?;
        tracing::info!("Server started successfully, found {} users", users.len());

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the record store (useful for testing)
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Get a reference to the analytics engine (useful for testing)
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }
}
