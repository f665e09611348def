//! Tool Implementation Helpers
//!
//! The `#[tool_router]` macro requires all `#[tool]` methods to live in one
//! impl block, so the heavy logic is extracted here and server.rs keeps thin
//! wrapper methods.
//!
//! # Module Organization
//!
//! - `account` - projects, users, invitations
//! - `events` - opened/active events and the 30-day summary
//! - `integrations` - AWS/Azure inbound management
//! - `metrics` - raw metrics queries
//! - `mute_rules` - mute rule CRUD plus the service and wildcard helpers
//! - `notifications` - outbound channel management

pub mod account;
pub mod events;
pub mod integrations;
pub mod metrics;
pub mod mute_rules;
pub mod notifications;

pub use account::{invite_users_impl, list_projects_impl, list_users_impl};
pub use events::{active_events_impl, active_events_summary_impl, opened_events_impl};
pub use integrations::{
    create_aws_integration_impl, create_azure_integration_impl, delete_integration_impl,
    disable_integration_impl, enable_integration_impl, list_integrations_impl,
    update_aws_integration_impl, update_azure_integration_impl,
};
pub use metrics::get_metrics_impl;
pub use mute_rules::{
    create_mute_rule_impl, delete_mute_rule_impl, get_mute_monitors_impl, get_mute_regions_impl,
    get_mute_resources_impl, list_mute_rules_impl, mute_monitors_by_service_impl,
    mute_resources_by_wildcard_impl,
};
pub use notifications::{
    create_email_notification_impl, create_opsgenie_notification_impl,
    create_pagerduty_notification_impl, create_servicenow_notification_impl,
    create_sns_notification_impl, create_squadcast_notification_impl,
    create_victorops_notification_impl, delete_notification_impl, disable_notification_impl,
    enable_notification_impl, list_notifications_impl, update_email_notification_impl,
    update_opsgenie_notification_impl, update_pagerduty_notification_impl,
    update_servicenow_notification_impl, update_sns_notification_impl,
    update_squadcast_notification_impl, update_victorops_notification_impl,
};

use crate::credentials::{self, CredentialDefaults};
use crate::mcp::params::AuthParams;
use bluematador_client::BluematadorClient;
use rmcp::ErrorData as McpError;
use serde::Serialize;
use serde_json::Value;

/// Resolved per-call context: an authenticated client, the target account,
/// and the serialized arguments for error diagnostics.
pub(crate) struct CallContext {
    pub client: BluematadorClient,
    pub account_id: String,
    pub args: Value,
}

/// Resolve credentials and build a fresh client for one tool call
pub(crate) fn connect<P: Serialize>(
    auth: &AuthParams,
    defaults: &CredentialDefaults,
    params: &P,
) -> Result<CallContext, McpError> {
    let creds = credentials::resolve(auth, defaults)?;
    let args = serde_json::to_value(params).unwrap_or(Value::Null);
    Ok(CallContext {
        client: creds.client(),
        account_id: creds.account_id,
        args,
    })
}
