/// Tools for managing goals
///
/// This module implements the goal_set, goal_update and goal_list MCP
/// tools. Progress percentages are derived on every read, never stored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Goal, GoalId};
use crate::store::{RecordStore, StoreError};
use crate::tools::{parse_date, resolve_user, ToolError};

/// Parameters for creating a goal
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetGoalParams {
    /// User the goal belongs to (id, email or name)
    pub user: String,
    /// Short title (e.g. "Walk more")
    pub title: String,
    /// Longer description
    pub description: Option<String>,
    /// Free-form category label (e.g. "physical", "mental")
    pub category: Option<String>,
    /// Value to reach
    pub target_value: f64,
    /// Starting value (defaults to 0)
    pub current_value: Option<f64>,
    /// Unit for the values (e.g. "steps", "hours")
    pub unit: Option<String>,
    /// When the goal should be reached (YYYY-MM-DD)
    pub target_date: String,
}

/// Parameters for updating a goal's progress
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateGoalParams {
    /// ID of the goal to update
    pub goal_id: String,
    /// New progress value
    pub current_value: Option<f64>,
    /// New target value
    pub target_value: Option<f64>,
    /// Mark the goal as completed (or not)
    pub completed: Option<bool>,
}

/// Parameters for listing goals
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListGoalsParams {
    /// User whose goals to list (id, email or name); omit for all users
    pub user: Option<String>,
    /// Only goals not yet completed
    pub open_only: Option<bool>,
}

/// One goal with its derived progress
#[derive(Debug, Serialize)]
pub struct GoalSummary {
    pub goal_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub current_value: f64,
    pub target_value: f64,
    pub unit: String,
    pub target_date: String,
    pub progress_percent: u8,
    pub completed: bool,
}

/// Response from the goal mutation tools
#[derive(Debug, Serialize)]
pub struct GoalMutationResponse {
    pub success: bool,
    pub goal_id: Option<String>,
    pub progress_percent: Option<u8>,
    pub message: String,
}

/// Response from listing goals
#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    pub goals: Vec<GoalSummary>,
    pub message: String,
}

fn goal_summary(goal: &Goal) -> GoalSummary {
    GoalSummary {
        goal_id: goal.id.to_string(),
        title: goal.title.clone(),
        description: goal.description.clone(),
        category: goal.category.clone(),
        current_value: goal.current_value,
        target_value: goal.target_value,
        unit: goal.unit.clone(),
        target_date: goal.target_date.to_string(),
        progress_percent: goal.progress_percent(),
        completed: goal.completed,
    }
}

/// Create a new goal using the provided store
pub fn set_goal<S: RecordStore>(
    store: &S,
    params: SetGoalParams,
) -> Result<GoalMutationResponse, ToolError> {
    let user = resolve_user(store, Some(&params.user))?.ok_or_else(|| {
        ToolError::InvalidArgument("A user is required to create a goal".to_string())
    })?;
    let target_date = parse_date("target_date", &params.target_date)?;

    let goal = Goal::new(
        user.id.clone(),
        params.title,
        params.description.unwrap_or_default(),
        params.category.unwrap_or_else(|| "physical".to_string()),
        params.target_value,
        params.current_value.unwrap_or(0.0),
        params.unit.unwrap_or_default(),
        target_date,
    )?;
    let goal_id = goal.id.to_string();
    let progress = goal.progress_percent();
    let title = goal.title.clone();
    store.add_goal(goal)?;

    Ok(GoalMutationResponse {
        success: true,
        goal_id: Some(goal_id.clone()),
        progress_percent: Some(progress),
        message: format!("Created goal '{}' ({}% complete).\nGoal ID: {}", title, progress, goal_id),
    })
}

/// Update a goal's progress using the provided store
pub fn update_goal<S: RecordStore>(
    store: &S,
    params: UpdateGoalParams,
) -> Result<GoalMutationResponse, ToolError> {
    let goal_id = GoalId::from_string(params.goal_id.trim())
        .map_err(|_| ToolError::InvalidArgument(format!("Invalid goal ID '{}'", params.goal_id)))?;

    let mut goal = store
        .goals()?
        .into_iter()
        .find(|g| g.id == goal_id)
        .ok_or_else(|| StoreError::GoalNotFound {
            goal_id: params.goal_id.clone(),
        })?;

    goal.update(params.current_value, params.target_value, params.completed)?;
    let progress = goal.progress_percent();
    let title = goal.title.clone();
    store.update_goal(goal)?;

    Ok(GoalMutationResponse {
        success: true,
        goal_id: Some(goal_id.to_string()),
        progress_percent: Some(progress),
        message: format!("Updated goal '{}': now {}% complete.", title, progress),
    })
}

/// List goals with derived progress using the provided store
pub fn list_goals<S: RecordStore>(
    store: &S,
    params: ListGoalsParams,
) -> Result<ListGoalsResponse, ToolError> {
    let user = resolve_user(store, params.user.as_deref())?;
    let open_only = params.open_only.unwrap_or(false);

    let goals: Vec<GoalSummary> = store
        .goals()?
        .iter()
        .filter(|g| user.as_ref().map_or(true, |u| g.user_id == u.id))
        .filter(|g| !open_only || !g.completed)
        .map(goal_summary)
        .collect();

    let message = if goals.is_empty() {
        "No goals found.".to_string()
    } else {
        goals
            .iter()
            .map(|g| {
                format!(
                    "- {} [{}%] {}/{} {}{}",
                    g.title,
                    g.progress_percent,
                    g.current_value,
                    g.target_value,
                    g.unit,
                    if g.completed { " (completed)" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListGoalsResponse { goals, message })
}
