/// Tools for managing mental entries
///
/// This module implements the log_mental, update_mental and delete_mental
/// MCP tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::domain::MentalEntry;
use crate::store::{RecordStore, StoreError};
use crate::tools::physical::{parse_entry_id, DeleteEntryParams, EntryMutationResponse};
use crate::tools::{parse_date, resolve_user, ToolError};

/// Parameters for logging a mental entry
#[derive(Debug, Deserialize, JsonSchema)]
pub struct LogMentalParams {
    /// User the entry belongs to (id, email or name)
    pub user: String,
    /// Day the check-in is for (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    /// Mood rating 1-5
    pub mood: Option<f64>,
    /// Stress rating 1-5
    pub stress_level: Option<f64>,
    /// Anxiety rating 1-5
    pub anxiety_level: Option<f64>,
    /// Energy rating 1-5
    pub energy_level: Option<f64>,
    /// Minutes spent meditating (0-1440)
    pub meditation_minutes: Option<f64>,
}

/// Parameters for updating a mental entry
///
/// Omitted fields keep their current values.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateMentalParams {
    /// ID of the entry to update
    pub entry_id: String,
    /// New day for the check-in (YYYY-MM-DD)
    pub date: Option<String>,
    pub mood: Option<f64>,
    pub stress_level: Option<f64>,
    pub anxiety_level: Option<f64>,
    pub energy_level: Option<f64>,
    pub meditation_minutes: Option<f64>,
}

/// Log a new mental entry using the provided store
pub fn log_mental<S: RecordStore>(
    store: &S,
    params: LogMentalParams,
) -> Result<EntryMutationResponse, ToolError> {
    let user = resolve_user(store, Some(&params.user))?.ok_or_else(|| {
        ToolError::InvalidArgument("A user is required to log an entry".to_string())
    })?;

    let date = match params.date.as_deref() {
        Some(d) => parse_date("date", d)?,
        None => chrono::Utc::now().naive_utc().date(),
    };

    let entry = MentalEntry::new(
        user.id.clone(),
        date,
        params.mood,
        params.stress_level,
        params.anxiety_level,
        params.energy_level,
        params.meditation_minutes,
    )?;
    let entry_id = entry.id.to_string();
    store.add_mental(entry)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(entry_id.clone()),
        message: format!(
            "Logged mental entry for {} on {}.\nEntry ID: {}",
            user.label(),
            date,
            entry_id
        ),
    })
}

/// Update an existing mental entry using the provided store
pub fn update_mental<S: RecordStore>(
    store: &S,
    params: UpdateMentalParams,
) -> Result<EntryMutationResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    let existing = store
        .mental_entries()?
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
    let mut updated = MentalEntry::new(
        existing.user_id.clone(),
        date,
        params.mood.or(existing.mood),
        params.stress_level.or(existing.stress_level),
        params.anxiety_level.or(existing.anxiety_level),
        params.energy_level.or(existing.energy_level),
        params.meditation_minutes.or(existing.meditation_minutes),
    )?;
    updated.id = existing.id.clone();
    updated.created_at = existing.created_at;
    store.update_mental(updated)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(existing.id.to_string()),
        message: format!("Updated mental entry {}.", existing.id),
    })
}

/// Delete a mental entry using the provided store
pub fn delete_mental_entry<S: RecordStore>(
    store: &S,
    params: DeleteEntryParams,
) -> Result<EntryMutationResponse, ToolError> {
    let entry_id = parse_entry_id(&params.entry_id)?;
    store.delete_mental(&entry_id)?;

    Ok(EntryMutationResponse {
        success: true,
        entry_id: Some(entry_id.to_string()),
        message: format!("Deleted mental entry {}.", entry_id),
    })
}
