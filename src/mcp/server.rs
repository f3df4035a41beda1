/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the health dashboard
/// 3. Sends JSON-RPC responses to stdout

use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools::{self, ToolError};
use crate::{HealthDashboardServer, ServerError};

/// MCP server that handles communication with Claude
pub struct McpServer {
    /// The underlying health dashboard server
    dashboard: HealthDashboardServer,
    /// Whether the server has been initialized
    initialized: bool,
}

/// JSON schema for a tool's params struct
fn schema_value<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}))
}

/// Deserialize tool arguments, run the tool, and render the outcome
fn run_tool<P: DeserializeOwned>(
    args: Value,
    run: impl FnOnce(P) -> Result<String, ToolError>,
) -> ToolCallResult {
    let params: P = match serde_json::from_value(args) {
        Ok(p) => p,
        Err(e) => return ToolCallResult::error(format!("Invalid parameters: {}", e)),
    };
    match run(params) {
        Ok(message) => ToolCallResult::success(message),
        Err(e) => {
            warn!("Tool call failed (code {}): {}", tool_error_to_json_rpc_code(&e), e);
            ToolCallResult::error(e.to_string())
        }
    }
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(dashboard: HealthDashboardServer) -> Self {
        Self {
            dashboard,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request)
    }

    /// Handle a JSON-RPC request; notifications produce no response
    fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request)),
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                None
            }
            "tools/list" => Some(self.handle_tools_list(request)),
            "tools/call" => Some(self.handle_tools_call(request)),
            _ => Some(JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            )),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Health Dashboard MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize initialize result: {}", e),
                None,
            ),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "dashboard_summary".to_string(),
                description: "Health summary for a user and date range: average heart rate, \
                              steps, sleep and mood plus goal progress"
                    .to_string(),
                input_schema: schema_value::<tools::SummaryParams>(),
            },
            ToolDefinition {
                name: "health_trends".to_string(),
                description: "Rolling-average series and trend direction for one metric \
                              (e.g. heart_rate, sleep_hours, mood)"
                    .to_string(),
                input_schema: schema_value::<tools::TrendsParams>(),
            },
            ToolDefinition {
                name: "health_correlations".to_string(),
                description: "Strongest correlations between physical and mental metrics \
                              on days with both kinds of entries"
                    .to_string(),
                input_schema: schema_value::<tools::CorrelationsParams>(),
            },
            ToolDefinition {
                name: "health_insights".to_string(),
                description: "Rule-based wellness observations and suggestions for the \
                              selected range"
                    .to_string(),
                input_schema: schema_value::<tools::InsightsParams>(),
            },
            ToolDefinition {
                name: "log_physical".to_string(),
                description: "Log a physical entry (heart rate, steps, sleep, weight, exercise) \
                              for a user and date"
                    .to_string(),
                input_schema: schema_value::<tools::LogPhysicalParams>(),
            },
            ToolDefinition {
                name: "update_physical".to_string(),
                description: "Update fields of an existing physical entry".to_string(),
                input_schema: schema_value::<tools::UpdatePhysicalParams>(),
            },
            ToolDefinition {
                name: "delete_physical".to_string(),
                description: "Delete a physical entry by ID".to_string(),
                input_schema: schema_value::<tools::DeleteEntryParams>(),
            },
            ToolDefinition {
                name: "log_mental".to_string(),
                description: "Log a mental entry (mood, stress, anxiety, energy, meditation) \
                              for a user and date"
                    .to_string(),
                input_schema: schema_value::<tools::LogMentalParams>(),
            },
            ToolDefinition {
                name: "update_mental".to_string(),
                description: "Update fields of an existing mental entry".to_string(),
                input_schema: schema_value::<tools::UpdateMentalParams>(),
            },
            ToolDefinition {
                name: "delete_mental".to_string(),
                description: "Delete a mental entry by ID".to_string(),
                input_schema: schema_value::<tools::DeleteEntryParams>(),
            },
            ToolDefinition {
                name: "goal_set".to_string(),
                description: "Create a goal with a numeric target for a user".to_string(),
                input_schema: schema_value::<tools::SetGoalParams>(),
            },
            ToolDefinition {
                name: "goal_update".to_string(),
                description: "Update a goal's progress, target or completion".to_string(),
                input_schema: schema_value::<tools::UpdateGoalParams>(),
            },
            ToolDefinition {
                name: "goal_list".to_string(),
                description: "List goals with derived progress percentages".to_string(),
                input_schema: schema_value::<tools::ListGoalsParams>(),
            },
            ToolDefinition {
                name: "list_users".to_string(),
                description: "List known users with their display labels".to_string(),
                input_schema: schema_value::<tools::ListUsersParams>(),
            },
        ];

        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        if !self.initialized {
            debug!("tools/call received before the initialized notification");
        }

        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        // A tool called with no arguments still deserializes all-optional params
        let args = if tool_params.arguments.is_null() {
            json!({})
        } else {
            tool_params.arguments
        };

        let store = self.dashboard.store();
        let result = match tool_params.name.as_str() {
            "dashboard_summary" => {
                run_tool(args, |p| tools::dashboard_summary(store, p).map(|r| r.message))
            }
            "health_trends" => {
                run_tool(args, |p| tools::health_trends(store, p).map(|r| r.message))
            }
            "health_correlations" => {
                run_tool(args, |p| tools::health_correlations(store, p).map(|r| r.message))
            }
            "health_insights" => {
                run_tool(args, |p| tools::health_insights(store, p).map(|r| r.message))
            }
            "log_physical" => {
                run_tool(args, |p| tools::log_physical(store, p).map(|r| r.message))
            }
            "update_physical" => {
                run_tool(args, |p| tools::update_physical(store, p).map(|r| r.message))
            }
            "delete_physical" => {
                run_tool(args, |p| tools::delete_physical_entry(store, p).map(|r| r.message))
            }
            "log_mental" => run_tool(args, |p| tools::log_mental(store, p).map(|r| r.message)),
            "update_mental" => {
                run_tool(args, |p| tools::update_mental(store, p).map(|r| r.message))
            }
            "delete_mental" => {
                run_tool(args, |p| tools::delete_mental_entry(store, p).map(|r| r.message))
            }
            "goal_set" => run_tool(args, |p| tools::set_goal(store, p).map(|r| r.message)),
            "goal_update" => run_tool(args, |p| tools::update_goal(store, p).map(|r| r.message)),
            "goal_list" => run_tool(args, |p| tools::list_goals(store, p).map(|r| r.message)),
            "list_users" => run_tool(args, |p| tools::list_users(store, p).map(|r| r.message)),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                format!("Failed to serialize tool result: {}", e),
                None,
            ),
        }
    }
}
