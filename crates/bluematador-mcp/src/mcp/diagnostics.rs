//! Diagnostic blocks appended to tool errors
//!
//! API failures are returned to the model as a markdown report: timestamp,
//! tool name, HTTP status, response body, sanitized request parameters, and
//! status-specific troubleshooting hints. Credential fields are redacted
//! before the arguments are echoed back.

use bluematador_client::{ApiError, TransportKind};
use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use std::fmt::Write;

const REDACTED: &str = "***REDACTED***";

/// Argument keys that must never appear in error output
const SENSITIVE_KEYS: &[&str] = &[
    "apiKey",
    "secret",
    "password",
    "serviceSecret",
    "secretAccessKey",
];

/// Replace credential values in a serialized argument object
pub fn sanitize_args(args: &Value) -> Value {
    let mut sanitized = args.clone();
    if let Value::Object(map) = &mut sanitized {
        for key in SENSITIVE_KEYS {
            if let Some(value) = map.get_mut(*key) {
                *value = Value::String(REDACTED.to_string());
            }
        }
    }
    sanitized
}

/// Render the full diagnostic block for a failed API call
pub fn format_detailed_error(error: &ApiError, tool: &str, args: &Value) -> String {
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut info = String::new();
    let _ = write!(info, "\n🔍 **Error Details:**\n");
    let _ = write!(info, "📅 **Time:** {timestamp}\n");
    let _ = write!(info, "🛠️ **Tool:** {tool}\n");

    if let Some(status) = error.status() {
        let _ = write!(info, "📊 **HTTP Status:** {status}\n");
    }

    let _ = write!(info, "💬 **Error Message:** {error}\n");

    if let ApiError::Status { body, .. } = error {
        if !body.is_empty() {
            let _ = write!(info, "📄 **Response Data:**\n```\n{body}\n```\n");
        }
    }

    if !args.is_null() {
        let sanitized = sanitize_args(args);
        let rendered =
            serde_json::to_string_pretty(&sanitized).unwrap_or_else(|_| sanitized.to_string());
        let _ = write!(info, "📋 **Request Parameters:**\n```json\n{rendered}\n```\n");
    }

    if let Some(url) = error.url() {
        let _ = write!(info, "🔗 **Request URL:** {url}\n");
    }
    if let Some(method) = error.method() {
        let _ = write!(info, "📡 **HTTP Method:** {method}\n");
    }
    if let ApiError::Status {
        content_type: Some(content_type),
        ..
    } = error
    {
        let _ = write!(info, "📄 **Response Content-Type:** {content_type}\n");
    }

    if let ApiError::Transport { kind, .. } = error {
        match kind {
            TransportKind::Timeout => {
                let _ = write!(info, "⏱️ **Timeout:** Request timed out\n");
            }
            TransportKind::Connect => {
                let _ = write!(
                    info,
                    "❌ **Connection:** Connection refused - API server may be down\n"
                );
            }
            TransportKind::Other => {}
        }
    }

    let _ = write!(info, "\n💡 **Troubleshooting Suggestions:**\n");
    match error.status() {
        Some(401) => {
            info.push_str("- Verify your API key is correct and has not expired\n");
            info.push_str("- Check if your account has the necessary permissions\n");
        }
        Some(403) => {
            info.push_str("- Your API key may not have permission for this resource\n");
            info.push_str("- Check if the account ID is correct\n");
        }
        Some(404) => {
            info.push_str("- Verify the resource ID exists in your account\n");
            info.push_str("- Check if the resource was recently deleted\n");
        }
        Some(429) => {
            info.push_str("- You're making requests too quickly - implement rate limiting\n");
            info.push_str("- Wait a few seconds and try again\n");
        }
        Some(status) if status >= 500 => {
            info.push_str("- Bluematador API server is experiencing issues\n");
            info.push_str("- Try again in a few minutes\n");
        }
        _ => {
            if matches!(
                error,
                ApiError::Transport {
                    kind: TransportKind::Connect | TransportKind::Other,
                    ..
                }
            ) {
                info.push_str("- Check your internet connection\n");
                info.push_str("- Verify the API base URL is correct\n");
            }
        }
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn status_error(status: u16) -> ApiError {
        ApiError::Status {
            status,
            message: "boom".to_string(),
            body: "{\"message\":\"boom\"}".to_string(),
            content_type: Some("application/json".to_string()),
            method: "GET".to_string(),
            url: "https://app.bluematador.com/zi/accounts/a/events".to_string(),
        }
    }

    #[test]
    fn credentials_are_redacted() {
        let args = json!({
            "apiKey": "super-secret",
            "secretAccessKey": "aws-secret",
            "name": "prod"
        });
        let sanitized = sanitize_args(&args);
        assert_eq!(sanitized["apiKey"], "***REDACTED***");
        assert_eq!(sanitized["secretAccessKey"], "***REDACTED***");
        assert_eq!(sanitized["name"], "prod");
    }

    #[test]
    fn absent_sensitive_keys_are_not_inserted() {
        let sanitized = sanitize_args(&json!({ "name": "prod" }));
        assert!(sanitized.get("apiKey").is_none());
    }

    #[test]
    fn report_includes_status_url_and_hints() {
        let report = format_detailed_error(&status_error(401), "list_events", &json!({}));
        assert!(report.contains("🛠️ **Tool:** list_events"));
        assert!(report.contains("📊 **HTTP Status:** 401"));
        assert!(report.contains("🔗 **Request URL:** https://app.bluematador.com"));
        assert!(report.contains("Verify your API key is correct"));
    }

    #[test]
    fn report_never_leaks_credentials() {
        let args = json!({ "apiKey": "leak-me", "password": "hunter2" });
        let report = format_detailed_error(&status_error(500), "create_integration", &args);
        assert!(!report.contains("leak-me"));
        assert!(!report.contains("hunter2"));
        assert!(report.contains("***REDACTED***"));
    }

    #[test]
    fn timeout_errors_mention_the_timeout() {
        let error = ApiError::Transport {
            kind: TransportKind::Timeout,
            message: "deadline elapsed".to_string(),
            method: "GET".to_string(),
            url: "https://app.bluematador.com/zi/accounts/a/projects".to_string(),
        };
        let report = format_detailed_error(&error, "list_projects", &Value::Null);
        assert!(report.contains("⏱️ **Timeout:** Request timed out"));
    }

    #[test]
    fn server_errors_suggest_retrying() {
        let report = format_detailed_error(&status_error(503), "get_metrics", &json!({}));
        assert!(report.contains("Try again in a few minutes"));
    }
}
