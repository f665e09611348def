//! MCP JSON-RPC handler for the HTTP transport
//!
//! Parses JSON-RPC 2.0 requests from the POST body, delegates to the MCP
//! server tools, and returns JSON-RPC responses. No business logic here,
//! just protocol translation and per-request credential extraction.

use crate::credentials::CredentialDefaults;
use crate::mcp::params::{
    AccountParams, ActiveEventsParams, CreateAwsIntegrationParams, CreateAzureIntegrationParams,
    CreateEmailNotificationParams, CreateMuteRuleParams, CreateOpsGenieNotificationParams,
    CreatePagerDutyNotificationParams, CreateServiceNowNotificationParams,
    CreateSnsNotificationParams, CreateSquadCastNotificationParams,
    CreateVictorOpsNotificationParams, DeleteMuteRuleParams, InboundActionParams,
    InviteUsersParams, ListMuteRulesParams, MetricsParams, MuteMonitorsByServiceParams,
    MuteResourcesByWildcardParams, MuteResourcesPageParams, OpenedEventsParams,
    OutboundActionParams, UpdateAwsIntegrationParams, UpdateAzureIntegrationParams,
    UpdateEmailNotificationParams, UpdateOpsGenieNotificationParams,
    UpdatePagerDutyNotificationParams, UpdateServiceNowNotificationParams,
    UpdateSnsNotificationParams, UpdateSquadCastNotificationParams,
    UpdateVictorOpsNotificationParams,
};
use crate::mcp::BluematadorServer;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Request headers carrying per-request credentials
pub const HEADER_API_KEY: &str = "x-bluematador-api-key";
pub const HEADER_ACCOUNT_ID: &str = "x-bluematador-account-id";
pub const HEADER_BASE_URL: &str = "x-bluematador-base-url";

/// Shared state for the HTTP transport
#[derive(Clone)]
pub struct HttpState {
    pub defaults: Arc<CredentialDefaults>,
    /// When set, requests without an API key header are rejected with 401
    pub require_header_auth: bool,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

/// Credentials carried in request headers, if any
fn extract_header_credentials(headers: &HeaderMap) -> CredentialDefaults {
    CredentialDefaults {
        api_key: header_value(headers, HEADER_API_KEY),
        account_id: header_value(headers, HEADER_ACCOUNT_ID),
        base_url: header_value(headers, HEADER_BASE_URL),
    }
}

/// Macro for generating the HTTP tool router from tool definitions.
///
/// Generates match arms for `handle_tools_call` based on a single list of
/// tool definitions. When adding a new MCP tool:
/// 1. Add the `#[tool]` method in `mcp/server.rs`
/// 2. Add it to the `bridge_methods!` list in `mcp/server/http_bridge.rs`
/// 3. Add the tool to this macro invocation (ONE place for HTTP routing!)
///
/// # Compile-Time Safety
///
/// - Forward check: a tool listed here without a `call_*` method fails to compile
/// - Reverse check: `http_router_covers_all_mcp_tools` verifies all MCP tools are routed
macro_rules! http_tool_router {
    (
        $server:expr,
        $arguments:expr,
        $tool_name:expr,
        { $( $tool:ident => $param_type:ty ),* $(,)? }
    ) => {
        paste::paste! {
            match $tool_name {
                $(
                    stringify!($tool) => match serde_json::from_value::<$param_type>($arguments.clone()) {
                        Ok(params) => $server.[<call_ $tool>](params).await,
                        Err(e) => Err(McpError::invalid_params(
                            format!("Invalid parameters: {}", e),
                            None,
                        )),
                    },
                )*
                _ => Err(McpError::method_not_found::<rmcp::model::CallToolRequestMethod>()),
            }
        }
    };
}

/// Macro to generate a const array of all HTTP-routed tool names.
/// Used by tests to verify all MCP tools are covered by the HTTP router.
macro_rules! http_router_tool_names {
    ( { $( $tool:ident => $param_type:ty ),* $(,)? } ) => {
        &[ $( stringify!($tool), )* ]
    };
}

/// List of all tools handled by the HTTP router.
/// This MUST match the tools in the `http_tool_router!` invocation below.
pub const HTTP_ROUTER_TOOLS: &[&str] = http_router_tool_names!({
    create_aws_integration => CreateAwsIntegrationParams,
    create_azure_integration => CreateAzureIntegrationParams,
    list_integrations => AccountParams,
    update_aws_integration => UpdateAwsIntegrationParams,
    update_azure_integration => UpdateAzureIntegrationParams,
    enable_integration => InboundActionParams,
    disable_integration => InboundActionParams,
    delete_integration => InboundActionParams,
    get_opened_events => OpenedEventsParams,
    get_active_events => ActiveEventsParams,
    get_active_events_summary => ActiveEventsParams,
    list_projects => AccountParams,
    list_users => AccountParams,
    invite_users => InviteUsersParams,
    list_notifications => AccountParams,
    create_email_notification => CreateEmailNotificationParams,
    create_pagerduty_notification => CreatePagerDutyNotificationParams,
    create_opsgenie_notification => CreateOpsGenieNotificationParams,
    create_sns_notification => CreateSnsNotificationParams,
    create_victorops_notification => CreateVictorOpsNotificationParams,
    create_squadcast_notification => CreateSquadCastNotificationParams,
    create_servicenow_notification => CreateServiceNowNotificationParams,
    update_email_notification => UpdateEmailNotificationParams,
    update_pagerduty_notification => UpdatePagerDutyNotificationParams,
    update_opsgenie_notification => UpdateOpsGenieNotificationParams,
    update_sns_notification => UpdateSnsNotificationParams,
    update_victorops_notification => UpdateVictorOpsNotificationParams,
    update_squadcast_notification => UpdateSquadCastNotificationParams,
    update_servicenow_notification => UpdateServiceNowNotificationParams,
    enable_notification => OutboundActionParams,
    disable_notification => OutboundActionParams,
    delete_notification => OutboundActionParams,
    get_metrics => MetricsParams,
    list_mute_rules => ListMuteRulesParams,
    create_mute_rule => CreateMuteRuleParams,
    get_mute_regions => AccountParams,
    get_mute_monitors => AccountParams,
    get_mute_resources => MuteResourcesPageParams,
    delete_mute_rule => DeleteMuteRuleParams,
    mute_monitors_by_service => MuteMonitorsByServiceParams,
    mute_resources_by_wildcard => MuteResourcesByWildcardParams,
});

/// MCP HTTP handler
///
/// Handles JSON-RPC 2.0 requests over HTTP POST. Credentials can arrive in
/// request headers and take precedence over the process-wide defaults. A new
/// server instance is built per request so concurrent clients with clashing
/// JSON-RPC request IDs never interfere.
pub async fn mcp_handler(
    State(state): State<HttpState>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, McpHttpError> {
    debug!("MCP HTTP: request payload: {:?}", payload);

    let header_creds = extract_header_credentials(&headers);
    if state.require_header_auth && header_creds.api_key.is_none() {
        return Err(McpHttpError::Unauthorized(
            "Missing X-Bluematador-Api-Key header".to_string(),
        ));
    }
    let defaults = header_creds.or(&state.defaults);

    let jsonrpc_version = payload.get("jsonrpc").and_then(|v| v.as_str());
    if jsonrpc_version != Some("2.0") {
        error!("MCP HTTP: invalid JSON-RPC version: {:?}", jsonrpc_version);
        return Err(McpHttpError::InvalidJsonRpc(
            "Invalid JSON-RPC version (must be '2.0')".to_string(),
        ));
    }

    let mcp_server = BluematadorServer::with_defaults(defaults);

    let method = payload.get("method").and_then(|v| v.as_str());
    let id = payload.get("id").cloned();
    let params = payload.get("params").cloned().unwrap_or(Value::Null);

    let response_value = match method {
        Some("initialize") => {
            info!("MCP HTTP: handling initialize request");
            let server_info = mcp_server.get_info();
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": server_info.capabilities,
                    "serverInfo": {
                        "name": "bluematador-mcp-server",
                        "version": env!("CARGO_PKG_VERSION")
                    },
                    "instructions": server_info.instructions
                }
            })
        }
        Some("notifications/initialized") => {
            info!("MCP HTTP: client initialized notification received");
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {}
            })
        }
        Some("tools/list") => handle_tools_list(&mcp_server, id),
        Some("tools/call") => handle_tools_call(mcp_server, id, params).await,
        Some(method_name) => {
            error!("MCP HTTP: method not implemented: {}", method_name);
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": -32601,
                    "message": format!("Method not implemented: {}", method_name)
                }
            })
        }
        None => {
            error!("MCP HTTP: missing method in request");
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {
                    "code": -32600,
                    "message": "Invalid Request: missing method"
                }
            })
        }
    };

    Ok(Json(response_value))
}

/// Handle tools/list: returns all available tools dynamically from the tool
/// router, so the HTTP transport always reflects the same tools as stdio.
fn handle_tools_list(mcp_server: &BluematadorServer, id: Option<Value>) -> Value {
    let tools = mcp_server.get_tools();
    let tools_json = serde_json::to_value(&tools).unwrap_or_else(|e| {
        error!("Failed to serialize tools: {}", e);
        serde_json::json!([])
    });

    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "tools": tools_json
        }
    })
}

/// Handle tools/call: execute the requested tool
async fn handle_tools_call(mcp_server: BluematadorServer, id: Option<Value>, params: Value) -> Value {
    let tool_name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
    let arguments = match params.get("arguments") {
        Some(args @ Value::Object(_)) => args.clone(),
        _ => {
            return jsonrpc_error(
                id,
                &McpError::invalid_params("Arguments are required", None),
            );
        }
    };

    info!("MCP HTTP: calling tool '{}'", tool_name);

    let result = http_tool_router!(mcp_server, arguments, tool_name, {
        create_aws_integration => CreateAwsIntegrationParams,
        create_azure_integration => CreateAzureIntegrationParams,
        list_integrations => AccountParams,
        update_aws_integration => UpdateAwsIntegrationParams,
        update_azure_integration => UpdateAzureIntegrationParams,
        enable_integration => InboundActionParams,
        disable_integration => InboundActionParams,
        delete_integration => InboundActionParams,
        get_opened_events => OpenedEventsParams,
        get_active_events => ActiveEventsParams,
        get_active_events_summary => ActiveEventsParams,
        list_projects => AccountParams,
        list_users => AccountParams,
        invite_users => InviteUsersParams,
        list_notifications => AccountParams,
        create_email_notification => CreateEmailNotificationParams,
        create_pagerduty_notification => CreatePagerDutyNotificationParams,
        create_opsgenie_notification => CreateOpsGenieNotificationParams,
        create_sns_notification => CreateSnsNotificationParams,
        create_victorops_notification => CreateVictorOpsNotificationParams,
        create_squadcast_notification => CreateSquadCastNotificationParams,
        create_servicenow_notification => CreateServiceNowNotificationParams,
        update_email_notification => UpdateEmailNotificationParams,
        update_pagerduty_notification => UpdatePagerDutyNotificationParams,
        update_opsgenie_notification => UpdateOpsGenieNotificationParams,
        update_sns_notification => UpdateSnsNotificationParams,
        update_victorops_notification => UpdateVictorOpsNotificationParams,
        update_squadcast_notification => UpdateSquadCastNotificationParams,
        update_servicenow_notification => UpdateServiceNowNotificationParams,
        enable_notification => OutboundActionParams,
        disable_notification => OutboundActionParams,
        delete_notification => OutboundActionParams,
        get_metrics => MetricsParams,
        list_mute_rules => ListMuteRulesParams,
        create_mute_rule => CreateMuteRuleParams,
        get_mute_regions => AccountParams,
        get_mute_monitors => AccountParams,
        get_mute_resources => MuteResourcesPageParams,
        delete_mute_rule => DeleteMuteRuleParams,
        mute_monitors_by_service => MuteMonitorsByServiceParams,
        mute_resources_by_wildcard => MuteResourcesByWildcardParams,
    });

    match result {
        Ok(call_result) => {
            // In rmcp 0.12, call_result.content is Vec<Content>
            let content: Vec<Value> = call_result
                .content
                .into_iter()
                .map(|c| {
                    serde_json::to_value(&c)
                        .unwrap_or_else(|_| serde_json::json!({"type": "unknown"}))
                })
                .collect();

            serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "content": content,
                    "isError": call_result.is_error.unwrap_or(false)
                }
            })
        }
        Err(e) => jsonrpc_error(id, &e),
    }
}

/// Render an MCP error as a JSON-RPC error object, preserving its code
fn jsonrpc_error(id: Option<Value>, error: &McpError) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": error.code.0,
            "message": error.message
        }
    })
}

/// MCP HTTP error type
#[derive(Debug)]
pub enum McpHttpError {
    InvalidJsonRpc(String),
    Unauthorized(String),
    Internal(String),
}

impl IntoResponse for McpHttpError {
    fn into_response(self) -> Response {
        let (status, code, error_message) = match self {
            McpHttpError::InvalidJsonRpc(msg) => (StatusCode::BAD_REQUEST, -32600, msg),
            McpHttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, -32600, msg),
            McpHttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, -32603, msg),
        };

        let body = Json(serde_json::json!({
            "jsonrpc": "2.0",
            "error": {
                "code": code,
                "message": error_message
            },
            "id": null
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> HttpState {
        HttpState {
            defaults: Arc::new(CredentialDefaults::empty()),
            require_header_auth: false,
        }
    }

    fn rpc(method: &str, params: Value) -> Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        })
    }

    #[tokio::test]
    async fn initialize_reports_server_identity() {
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("initialize", Value::Null)),
        )
        .await;
        let response = result.unwrap().0;
        assert_eq!(response["jsonrpc"], "2.0");
        assert_eq!(response["id"], 1);
        assert_eq!(
            response["result"]["serverInfo"]["name"],
            "bluematador-mcp-server"
        );
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn tools_list_includes_the_mute_helpers() {
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("tools/list", Value::Null)),
        )
        .await;
        let response = result.unwrap().0;
        let tools = response["result"]["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert!(names.contains(&"mute_monitors_by_service"));
        assert!(names.contains(&"mute_resources_by_wildcard"));
        assert!(names.contains(&"create_aws_integration"));
        assert_eq!(names.len(), HTTP_ROUTER_TOOLS.len());
    }

    #[tokio::test]
    async fn unknown_tool_returns_method_not_found() {
        let params = serde_json::json!({"name": "no_such_tool", "arguments": {}});
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("tools/call", params)),
        )
        .await;
        let response = result.unwrap().0;
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn missing_credentials_surface_as_invalid_request() {
        let params = serde_json::json!({"name": "list_projects", "arguments": {}});
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("tools/call", params)),
        )
        .await;
        let response = result.unwrap().0;
        assert_eq!(response["error"]["code"], -32600);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("API key is required"));
    }

    #[tokio::test]
    async fn missing_arguments_return_invalid_params() {
        let params = serde_json::json!({"name": "list_projects"});
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("tools/call", params)),
        )
        .await;
        let response = result.unwrap().0;
        assert_eq!(response["error"]["code"], -32602);
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Arguments are required"));
    }

    #[tokio::test]
    async fn malformed_arguments_return_invalid_params() {
        let params = serde_json::json!({
            "name": "invite_users",
            "arguments": {"apiKey": "k", "accountId": "a", "users": "not-an-array"}
        });
        let result = mcp_handler(
            State(test_state()),
            HeaderMap::new(),
            Json(rpc("tools/call", params)),
        )
        .await;
        let response = result.unwrap().0;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn wrong_jsonrpc_version_is_rejected() {
        let payload = serde_json::json!({"jsonrpc": "1.0", "method": "tools/list", "id": 1});
        let result = mcp_handler(State(test_state()), HeaderMap::new(), Json(payload)).await;
        assert!(matches!(result, Err(McpHttpError::InvalidJsonRpc(_))));
    }

    #[tokio::test]
    async fn header_auth_mode_rejects_requests_without_key() {
        let state = HttpState {
            defaults: Arc::new(CredentialDefaults::empty()),
            require_header_auth: true,
        };
        let result = mcp_handler(
            State(state),
            HeaderMap::new(),
            Json(rpc("tools/list", Value::Null)),
        )
        .await;
        assert!(matches!(result, Err(McpHttpError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn header_auth_mode_accepts_requests_with_key() {
        let state = HttpState {
            defaults: Arc::new(CredentialDefaults::empty()),
            require_header_auth: true,
        };
        let mut headers = HeaderMap::new();
        headers.insert(HEADER_API_KEY, "key-from-header".parse().unwrap());
        headers.insert(HEADER_ACCOUNT_ID, "acct".parse().unwrap());
        let result = mcp_handler(State(state), headers, Json(rpc("tools/list", Value::Null))).await;
        assert!(result.is_ok());
    }

    #[test]
    fn http_router_covers_all_mcp_tools() {
        let server = BluematadorServer::with_defaults(CredentialDefaults::empty());
        let mcp_tools: Vec<String> = server
            .get_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        for tool in &mcp_tools {
            assert!(
                HTTP_ROUTER_TOOLS.contains(&tool.as_str()),
                "tool '{tool}' is not routed by the HTTP handler"
            );
        }
        assert_eq!(mcp_tools.len(), HTTP_ROUTER_TOOLS.len());
    }
}
