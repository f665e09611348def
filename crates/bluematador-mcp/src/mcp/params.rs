//! MCP parameter types
//!
//! One struct per tool schema. Every tool carries the shared [`AuthParams`]
//! so callers can authenticate per call; field names are camelCase on the
//! wire to match the REST API.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default for `hide` on mute tools
fn default_hide() -> bool {
    false
}

// ============================================================================
// Shared auth
// ============================================================================

/// Credential arguments accepted by every tool. All optional; missing values
/// fall back to transport defaults (environment or request headers).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthParams {
    #[schemars(
        description = "Blue Matador API key - Get from https://app.bluematador.com/ur/app#/account/apikeys"
    )]
    pub api_key: Option<String>,
    #[schemars(
        description = "Blue Matador account ID in UUID format - Get from https://app.bluematador.com/ur/app#/account/apikeys"
    )]
    pub account_id: Option<String>,
    #[schemars(
        description = "Blue Matador base URL (optional, defaults to https://app.bluematador.com)"
    )]
    pub base_url: Option<String>,
}

/// Tools that need nothing beyond the account scope
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Account-scoped request")]
pub struct AccountParams {
    #[serde(flatten)]
    pub auth: AuthParams,
}

// ============================================================================
// Integrations
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for creating an AWS integration")]
pub struct CreateAwsIntegrationParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Name for the AWS integration")]
    pub name: String,
    #[schemars(description = "AWS IAM role ARN for Blue Matador to assume")]
    pub role_arn: String,
    #[schemars(description = "External ID for the AWS role")]
    pub external_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for creating an Azure integration")]
pub struct CreateAzureIntegrationParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Name for the Azure integration")]
    pub name: String,
    #[schemars(description = "Azure subscription ID")]
    pub subscription_id: String,
    #[schemars(description = "Azure tenant ID")]
    pub tenant_id: String,
    #[schemars(description = "Azure application (client) ID")]
    pub application_id: String,
    #[schemars(description = "Azure client secret")]
    pub secret: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for updating an AWS integration")]
pub struct UpdateAwsIntegrationParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Integration ID (UUID format)")]
    pub inbound_id: String,
    #[schemars(description = "Name for the AWS integration")]
    pub name: String,
    #[schemars(description = "AWS IAM role ARN for Blue Matador to assume")]
    pub role_arn: String,
    #[schemars(description = "External ID for the AWS role")]
    pub external_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for updating an Azure integration")]
pub struct UpdateAzureIntegrationParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Integration ID (UUID format)")]
    pub inbound_id: String,
    #[schemars(description = "Name for the Azure integration")]
    pub name: String,
    #[schemars(description = "Azure subscription ID")]
    pub subscription_id: String,
    #[schemars(description = "Azure tenant ID")]
    pub tenant_id: String,
    #[schemars(description = "Azure application (client) ID")]
    pub application_id: String,
    #[schemars(description = "Azure client secret")]
    pub secret: String,
}

/// Enable, disable, or delete an integration by ID
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Integration action by ID")]
pub struct InboundActionParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Integration ID (UUID format)")]
    pub inbound_id: String,
}

// ============================================================================
// Events
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for querying opened events")]
pub struct OpenedEventsParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Start time in ISO 8601 format (e.g., 2023-10-23T21:44:58Z)")]
    pub start: String,
    #[schemars(description = "End time in ISO 8601 format (e.g., 2023-10-24T21:44:58Z)")]
    pub end: String,
    #[schemars(description = "Project ID to filter events (optional)")]
    pub project: Option<String>,
}

/// Active events and the 30-day summary share this shape
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for querying active events")]
pub struct ActiveEventsParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Project ID to filter events (optional)")]
    pub project: Option<String>,
}

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "A user to invite")]
pub struct InviteUserParams {
    #[schemars(description = "User email address")]
    pub email: String,
    #[schemars(description = "Whether the user should have admin privileges")]
    pub admin: bool,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for inviting users to an account")]
pub struct InviteUsersParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Array of users to invite")]
    pub users: Vec<InviteUserParams>,
}

// ============================================================================
// Notifications
// ============================================================================

/// Enable, disable, or delete a notification by ID
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Notification action by ID")]
pub struct OutboundActionParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Notification ID (UUID format)")]
    pub outbound_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Email notification settings")]
pub struct EmailFields {
    #[schemars(description = "Email address to send notifications to")]
    pub email: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "PagerDuty notification settings")]
pub struct PagerDutyFields {
    #[schemars(description = "Name for the PagerDuty integration")]
    pub name: String,
    #[schemars(description = "PagerDuty account name")]
    pub account: String,
    #[schemars(description = "PagerDuty service name")]
    pub service_name: String,
    #[schemars(description = "PagerDuty service integration key")]
    pub service_secret: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "OpsGenie notification settings")]
pub struct OpsGenieFields {
    #[schemars(description = "Name for the OpsGenie integration")]
    pub name: String,
    #[schemars(description = "OpsGenie API key")]
    pub apikey: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "AWS SNS notification settings")]
pub struct SnsFields {
    #[schemars(description = "Name for the SNS integration")]
    pub name: String,
    #[schemars(description = "AWS SNS topic ARN")]
    pub topic_arn: String,
    #[schemars(description = "AWS access key ID")]
    pub access_key_id: String,
    #[schemars(description = "AWS secret access key")]
    pub secret_access_key: String,
    #[schemars(description = "Send resolution notifications")]
    pub send_resolve: bool,
    #[schemars(description = "Send notifications as JSON")]
    pub send_json: bool,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "VictorOps notification settings")]
pub struct VictorOpsFields {
    #[schemars(description = "Name for the VictorOps integration")]
    pub name: String,
    #[schemars(description = "VictorOps integration ID")]
    pub integration_id: String,
    #[schemars(description = "VictorOps routing key")]
    pub routing_key: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "SquadCast notification settings")]
pub struct SquadCastFields {
    #[schemars(description = "Name for the SquadCast integration")]
    pub name: String,
    #[schemars(description = "SquadCast source instance URL")]
    pub source_instance: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "ServiceNow notification settings")]
pub struct ServiceNowFields {
    #[schemars(description = "Name for the ServiceNow integration")]
    pub name: String,
    #[schemars(description = "ServiceNow instance name")]
    pub instance_name: String,
    #[schemars(description = "ServiceNow username")]
    pub username: String,
    #[schemars(description = "ServiceNow password")]
    pub password: String,
    #[schemars(description = "ServiceNow source instance")]
    pub source_instance: String,
    #[schemars(
        description = "Event severities to include (e.g., [\"alert\", \"warning\", \"anomaly\"])"
    )]
    pub severities: Vec<String>,
}

/// Create params wrap the provider fields; update params add the target ID.
macro_rules! notification_params {
    ($($create:ident, $update:ident => $fields:ty),* $(,)?) => {
        $(
            #[derive(Debug, Serialize, Deserialize, JsonSchema)]
            pub struct $create {
                #[serde(flatten)]
                pub auth: AuthParams,
                #[serde(flatten)]
                pub fields: $fields,
            }

            #[derive(Debug, Serialize, Deserialize, JsonSchema)]
            #[serde(rename_all = "camelCase")]
            pub struct $update {
                #[serde(flatten)]
                pub auth: AuthParams,
                #[schemars(description = "Notification ID (UUID format)")]
                pub outbound_id: String,
                #[serde(flatten)]
                pub fields: $fields,
            }
        )*
    };
}

notification_params!(
    CreateEmailNotificationParams, UpdateEmailNotificationParams => EmailFields,
    CreatePagerDutyNotificationParams, UpdatePagerDutyNotificationParams => PagerDutyFields,
    CreateOpsGenieNotificationParams, UpdateOpsGenieNotificationParams => OpsGenieFields,
    CreateSnsNotificationParams, UpdateSnsNotificationParams => SnsFields,
    CreateVictorOpsNotificationParams, UpdateVictorOpsNotificationParams => VictorOpsFields,
    CreateSquadCastNotificationParams, UpdateSquadCastNotificationParams => SquadCastFields,
    CreateServiceNowNotificationParams, UpdateServiceNowNotificationParams => ServiceNowFields,
);

// ============================================================================
// Metrics
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for querying metrics data")]
pub struct MetricsParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Metric name to query (e.g., \"aws.ec2.cpuutilization\")")]
    pub metrics: String,
    #[schemars(description = "Aggregation function (e.g., \"avg\", \"max\", \"min\", \"sum\")")]
    pub agg: String,
    #[schemars(description = "Start time in ISO 8601 format")]
    pub start: String,
    #[schemars(description = "End time in ISO 8601 format")]
    pub end: String,
    #[schemars(description = "Grouping dimensions (optional)")]
    pub groups: Option<String>,
}

// ============================================================================
// Mute rules
// ============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for listing mute rules")]
pub struct ListMuteRulesParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Include inactive mute rules (optional)")]
    pub include_inactive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "A specific resource to mute")]
pub struct MuteResourceParam {
    #[schemars(description = "Resource ARN/ID")]
    pub arn: String,
    #[schemars(description = "Resource reference type (e.g., aws_arn, azure_id)")]
    pub ref_type: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[schemars(description = "Parameters for creating a mute rule")]
pub struct CreateMuteRuleParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "If true, hide events completely. If false, show but mute them.")]
    pub hide: bool,
    #[schemars(description = "Specific resource to mute (optional)")]
    pub resource: Option<MuteResourceParam>,
    #[schemars(description = "Project IDs to apply mute rule to (optional)")]
    pub projects: Option<Vec<String>>,
    #[schemars(description = "AWS/Azure regions to apply mute rule to (optional)")]
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for deleting a mute rule")]
pub struct DeleteMuteRuleParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Mute rule ID to delete")]
    pub mute_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for listing mutable resources")]
pub struct MuteResourcesPageParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Page number for pagination (optional)")]
    pub page: Option<u32>,
    #[schemars(description = "Number of resources per page (optional)")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for muting monitors of a service")]
pub struct MuteMonitorsByServiceParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(description = "Service name (e.g., \"sqs\", \"rds\", \"ec2\", \"lambda\")")]
    pub service_name: String,
    #[schemars(
        description = "Specific monitor names to mute (optional - if not provided, all monitors for the service will be retrieved and muted)"
    )]
    pub monitor_names: Option<Vec<String>>,
    #[schemars(description = "If true, hide events completely. If false, show but mute them.")]
    #[serde(default = "default_hide")]
    pub hide: bool,
    #[schemars(description = "Project IDs to apply mute rule to (optional)")]
    pub projects: Option<Vec<String>>,
    #[schemars(description = "AWS/Azure regions to apply mute rule to (optional)")]
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(description = "Parameters for muting resources by wildcard pattern")]
pub struct MuteResourcesByWildcardParams {
    #[serde(flatten)]
    pub auth: AuthParams,
    #[schemars(
        description = "Wildcard pattern to match resource names/ARNs (e.g., \"sqs-*\", \"*-prod\", \"app-*-db\"). Use * for any characters."
    )]
    pub resource_pattern: String,
    #[schemars(
        description = "Filter by service type (optional, e.g., \"sqs\", \"rds\", \"ec2\", \"lambda\")"
    )]
    pub service_type: Option<String>,
    #[schemars(description = "If true, hide events completely. If false, show but mute them.")]
    #[serde(default = "default_hide")]
    pub hide: bool,
    #[schemars(description = "Project IDs to apply mute rule to (optional)")]
    pub projects: Option<Vec<String>>,
    #[schemars(description = "AWS/Azure regions to apply mute rule to (optional)")]
    pub regions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_params_flatten_into_tool_args() {
        let json = serde_json::json!({
            "apiKey": "k",
            "accountId": "a",
            "inboundId": "i-1"
        });
        let params: InboundActionParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.auth.api_key.as_deref(), Some("k"));
        assert_eq!(params.inbound_id, "i-1");
    }

    #[test]
    fn hide_defaults_to_false() {
        let json = serde_json::json!({
            "apiKey": "k",
            "accountId": "a",
            "serviceName": "sqs"
        });
        let params: MuteMonitorsByServiceParams = serde_json::from_value(json).unwrap();
        assert!(!params.hide);
    }

    #[test]
    fn notification_fields_flatten() {
        let json = serde_json::json!({
            "apiKey": "k",
            "accountId": "a",
            "outboundId": "o-1",
            "name": "pd",
            "account": "acme",
            "serviceName": "svc",
            "serviceSecret": "sekret",
            "severities": ["alert"]
        });
        let params: UpdatePagerDutyNotificationParams = serde_json::from_value(json).unwrap();
        assert_eq!(params.outbound_id, "o-1");
        assert_eq!(params.fields.service_name, "svc");
    }

    #[test]
    fn auth_is_optional_in_schemas() {
        let json = serde_json::json!({ "serviceName": "rds" });
        let params: MuteMonitorsByServiceParams = serde_json::from_value(json).unwrap();
        assert!(params.auth.api_key.is_none());
    }
}
