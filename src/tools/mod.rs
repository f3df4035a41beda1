/// MCP tools for the health dashboard
///
/// This module contains all the MCP tools that external clients (like
/// Claude) can call to read dashboard analytics and manage entries and
/// goals. Each tool is a function over an injected RecordStore with typed
/// params and response structs.

pub mod summary;
pub mod trends;
pub mod correlations;
pub mod insights;
pub mod physical;
pub mod mental;
pub mod goals;
pub mod users;

// Re-export tool functions for easy access
pub use summary::*;
pub use trends::*;
pub use correlations::*;
pub use insights::*;
pub use physical::*;
pub use mental::*;
pub use goals::*;
pub use users::*;

use chrono::{NaiveDate, Utc};
use thiserror::Error;

use crate::analytics::{filter_records, full_date_span, AnalyticsError, DateRange};
use crate::domain::{DomainError, Goal, MentalEntry, PhysicalEntry, User};
use crate::store::{RecordStore, StoreError};

/// Errors that can occur while executing a tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

/// Parse a YYYY-MM-DD date argument
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, ToolError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::InvalidArgument(format!(
            "{} must be a date in YYYY-MM-DD format, got '{}'",
            field, value
        ))
    })
}

/// Resolve an optional user selector (id, email or name) against the store
pub(crate) fn resolve_user<S: RecordStore>(
    store: &S,
    selector: Option<&str>,
) -> Result<Option<User>, ToolError> {
    let Some(selector) = selector.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let user = store
        .list_users()?
        .into_iter()
        .find(|u| u.matches(selector))
        .ok_or_else(|| StoreError::UserNotFound {
            user_id: selector.to_string(),
        })?;
    Ok(Some(user))
}

/// The record sets one dashboard computation pass works on
pub(crate) struct FilteredData {
    pub user: Option<User>,
    pub range: DateRange,
    pub physical: Vec<PhysicalEntry>,
    pub mental: Vec<MentalEntry>,
    pub goals: Vec<Goal>,
}

/// Load and filter everything a dashboard tool needs
///
/// The user selector is optional ("all users"). An omitted date range
/// defaults to the store's full data span (today when empty); a single
/// supplied date means start == end; two dates may arrive in either order.
pub(crate) fn load_filtered<S: RecordStore>(
    store: &S,
    user: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<FilteredData, ToolError> {
    let user = resolve_user(store, user)?;
    let physical_all = store.physical_entries()?;
    let mental_all = store.mental_entries()?;

    let range = match (start, end) {
        (None, None) => {
            let today = Utc::now().naive_utc().date();
            let (lo, hi) = full_date_span(&physical_all, &mental_all, today);
            DateRange::new(lo, hi)
        }
        (Some(d), None) | (None, Some(d)) => DateRange::single(parse_date("date", d)?),
        (Some(a), Some(b)) => {
            DateRange::new(parse_date("start_date", a)?, parse_date("end_date", b)?)
        }
    };

    let user_id = user.as_ref().map(|u| &u.id);
    let physical = filter_records(&physical_all, user_id, range);
    let mental = filter_records(&mental_all, user_id, range);
    let goals = store
        .goals()?
        .into_iter()
        .filter(|g| user_id.map_or(true, |u| &g.user_id == u))
        .collect();

    Ok(FilteredData {
        user,
        range,
        physical,
        mental,
        goals,
    })
}

/// Format an optional KPI value the way the dashboard renders it
///
/// None ("no data") renders as 0, matching the legacy dashboard.
pub(crate) fn format_kpi(value: Option<f64>, precision: usize) -> String {
    format!("{:.*}", precision, value.unwrap_or(0.0))
}
