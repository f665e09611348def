//! API error to MCP error translation
//!
//! Authentication and lookup failures become invalid-request errors,
//! validation failures become invalid-params, and everything else is an
//! internal error. Each message carries the diagnostic block so the model
//! can explain the failure without another round trip.

use crate::mcp::diagnostics::format_detailed_error;
use bluematador_client::ApiError;
use rmcp::ErrorData as McpError;
use serde_json::Value;

/// Map a failed API call to the MCP error the tool should raise
pub fn api_error_to_mcp(error: &ApiError, tool: &str, args: &Value) -> McpError {
    let details = format_detailed_error(error, tool, args);
    match error.status() {
        Some(401) => McpError::invalid_request(format!("Authentication failed: {details}"), None),
        Some(404) => McpError::invalid_request(format!("Resource not found: {details}"), None),
        Some(400) => McpError::invalid_params(format!("Bad request: {details}"), None),
        Some(403) => McpError::invalid_request(format!("Access forbidden: {details}"), None),
        Some(429) => McpError::internal_error(format!("Rate limit exceeded: {details}"), None),
        Some(status) if status >= 500 => {
            McpError::internal_error(format!("Server error: {details}"), None)
        }
        _ => McpError::internal_error(format!("API error: {details}"), None),
    }
}

/// Sugar for tool implementations: converts `Result<T, ApiError>` into a
/// tool result with the full diagnostic message.
pub trait ApiResultExt<T> {
    fn tool_result(self, tool: &str, args: &Value) -> Result<T, McpError>;
}

impl<T> ApiResultExt<T> for Result<T, ApiError> {
    fn tool_result(self, tool: &str, args: &Value) -> Result<T, McpError> {
        self.map_err(|error| api_error_to_mcp(&error, tool, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::json;

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            status,
            message: "nope".to_string(),
            body: String::new(),
            content_type: None,
            method: "POST".to_string(),
            url: "https://app.bluematador.com/zi/accounts/a/inbounds/aws".to_string(),
        }
    }

    #[test]
    fn unauthorized_maps_to_invalid_request() {
        let err = api_error_to_mcp(&status_error(401), "list_projects", &json!({}));
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        assert!(err.message.starts_with("Authentication failed:"));
    }

    #[test]
    fn bad_request_maps_to_invalid_params() {
        let err = api_error_to_mcp(&status_error(400), "create_mute_rule", &json!({}));
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.starts_with("Bad request:"));
    }

    #[test]
    fn not_found_and_forbidden_are_invalid_request() {
        assert!(api_error_to_mcp(&status_error(404), "t", &json!({}))
            .message
            .starts_with("Resource not found:"));
        assert!(api_error_to_mcp(&status_error(403), "t", &json!({}))
            .message
            .starts_with("Access forbidden:"));
    }

    #[test]
    fn rate_limits_and_server_errors_are_internal() {
        let rate = api_error_to_mcp(&status_error(429), "t", &json!({}));
        assert_eq!(rate.code, ErrorCode::INTERNAL_ERROR);
        assert!(rate.message.starts_with("Rate limit exceeded:"));

        let server = api_error_to_mcp(&status_error(502), "t", &json!({}));
        assert_eq!(server.code, ErrorCode::INTERNAL_ERROR);
        assert!(server.message.starts_with("Server error:"));
    }

    #[test]
    fn transport_errors_fall_through_to_api_error() {
        let error = ApiError::Request("builder failure".to_string());
        let err = api_error_to_mcp(&error, "t", &json!({}));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.starts_with("API error:"));
    }
}
