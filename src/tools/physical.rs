/// Tools for managing physical entries
///
/// This module implements the log_physical, update_physical and
/// delete_physical MCP tools - the dashboard's add/edit/delete forms
/// without the forms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{EntryId, PhysicalEntry};
use crate::store::{RecordStore, StoreError};
use crate::tools::{parse_date, resolve_user, ToolError};

/// Parameters for logging a physical entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogPhysicalParams {
    /// User the entry belongs to (id, email or name)
    pub user: String,
    /// Day the readings are for (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Resting heart rate in bpm (30-220)
    pub heart_rate: Option<f64>,
    /// Step count (0-50000)
    pub steps: Option<f64>,
    /// Hours slept (0-24)
    pub sleep_hours: Option<f64>,
    /// Body weight in kg
    pub weight: Option<f64>,
    /// Minutes of exercise (0-1440)
    pub exercise_minutes: Option<f64>,
}

/// Parameters for updating a physical entry
///
/// Omitted fields keep their current values.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdatePhysicalParams {
    /// ID of the entry to update
    pub entry_id: String,
    /// New day for the readings (YYYY-MM-DD)
    pub date: Option<String>,
    pub heart_rate: Option<f64>,
    pub steps: Option<f64>,
    pub sleep_hours: Option<f64>,
    pub weight: Option<f64>,
    pub exercise_minutes: Option<f64>,
}

/// Parameters for deleting a physical entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteEntryParams {
    /// ID of the entry to delete
    pub entry_id: String,
}

/// Response shared by the entry mutation tools
#[derive(Debug, Serialize)]
pub struct EntryMutationResponse {
    pub success: bool,
    pub entry_id: Option<String>,
    pub message: String,
}

pub(crate) fn parse_entry_id(value: &str) -> Result<EntryId, ToolError> {
    EntryId::from_string(value.trim())
        .map_err(|_| ToolError::InvalidArgument(format!("Invalid entry ID '{}'", value)))
}

/// Log a new physical entry using the provided store
pub fn log_physical<S: RecordStore>(
    store: &S,
    params: LogPhysicalParams,
) -> Result<EntryMutationResponse, ToolError> {
    let user = resolve_user(store, Some(&params.user))?.ok_or_else(|| {
        ToolError::InvalidArgument("A user is required to log an entry".to_string())
    })?;

    let date = match params.date.as_deref() {
        Some(d) => parse_date("date", d)?,
        None => chrono::Utc::now().naive_utc().date(),
    };

    let entry = PhysicalEntry::new(
        user.id.clone(),
        date,
        params.heart_rate,
        params.steps,
        params.sleep_hours,
        params.weight,
        params.exercise_minutes,
    )?;
    let entry_id = entry.id.to_string();
    store.add_physical(entry)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(entry_id.clone()),
        message: format!(
            "Logged physical entry for {} on {}.\nEntry ID: {}",
            user.label(),
            date,
            entry_id
        ),
    })
}

/// Update an existing physical entry using the provided store
pub fn update_physical<S: RecordStore>(
    store: &S,
    params: UpdatePhysicalParams,
) -> Result<EntryMutationResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    let existing = store
        .physical_entries()?
        .into_iter()
        .find(|e| e.id == entry_id)
        .ok_or_else(|| StoreError::EntryNotFound {
            entry_id: params.entry_id.clone(),
        })?;

    let date = match params.date.as_deref() {
        Some(d) => parse_date("date", d)?,
        None => existing.date,
    };

    // Re-run the full validation by building a fresh entry, then keep the
    // original identity and creation time
    let mut updated = PhysicalEntry::new(
        existing.user_id.clone(),
        date,
        params.heart_rate.or(existing.heart_rate),
        params.steps.or(existing.steps),
        params.sleep_hours.or(existing.sleep_hours),
        params.weight.or(existing.weight),
        params.exercise_minutes.or(existing.exercise_minutes),
    )?;
    updated.id = existing.id.clone();
    updated.created_at = existing.created_at;
    store.update_physical(updated)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(existing.id.to_string()),
        message: format!("Updated physical entry {}.", existing.id),
    })
}

/// Delete a physical entry using the provided store
pub fn delete_physical_entry<S: RecordStore>(
    store: &S,
    params: DeleteEntryParams,
) -> Result<EntryMutationResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    store.delete_physical(&entry_id)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(entry_id.to_string()),
        message: format!("Deleted physical entry {}.", entry_id),
    })
}
