/// Tool for listing users
///
/// This module implements the list_users MCP tool: the user picker's data
/// source, with display labels resolved the same way the dashboard does.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::RecordStore;
use crate::tools::ToolError;

/// Parameters for listing users (none)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListUsersParams {}

/// One user in the list
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub user_id: String,
    pub label: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub has_profile: bool,
}

/// Response from listing users
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserSummary>,
    pub message: String,
}

/// List known users using the provided store
pub fn list_users<S: RecordStore>(
    store: &S,
    _params: ListUsersParams,
) -> Result<ListUsersResponse, ToolError> {
    let mut users = Vec::new();
    for user in store.list_users()? {
        let has_profile = store.get_profile(&user.id)?.is_some();
        users.push(UserSummary {
            user_id: user.id.to_string(),
            label: user.label(),
            email: user.email.clone(),
            name: user.name.clone(),
            has_profile,
        });
    }

    let message = if users.is_empty() {
        "No users found. Showing all data.".to_string()
    } else {
        users
            .iter()
            .map(|u| format!("- {} ({})", u.label, u.user_id))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListUsersResponse { users, message })
}
