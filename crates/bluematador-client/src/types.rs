//! Wire types for the Blue Matador API
//!
//! All field names are camelCase on the wire. Nothing here is cached; these
//! structs exist only to shape requests and decode responses.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Integrations (inbounds)
// ============================================================================

/// Payload for creating or updating an AWS integration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsIntegrationData {
    pub name: String,
    pub role_arn: String,
    pub external_id: String,
}

/// Payload for creating or updating an Azure integration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureIntegrationData {
    pub name: String,
    pub subscription_id: String,
    pub tenant_id: String,
    pub application_id: String,
    pub secret: String,
}

/// Ingestion health counters reported per integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationStatus {
    #[serde(default)]
    pub total_success: u64,
    #[serde(default)]
    pub total_error: u64,
    #[serde(default)]
    pub recent_errors: Vec<String>,
}

/// Provider-specific integration data; only the common fields are typed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationData {
    pub name: String,
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A cloud integration (inbound) attached to an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integration {
    pub id: String,
    pub account_id: String,
    pub inbound_type: String,
    pub created: String,
    pub enabled: bool,
    pub data: IntegrationData,
}

/// Response to create/update calls for inbounds and outbounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponse {
    pub id: String,
    pub enabled: bool,
    #[serde(default)]
    pub created: Option<String>,
}

// ============================================================================
// Events
// ============================================================================

/// A resource reference, either an AWS ARN or an Azure resource ID
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub arn: String,
    #[serde(default)]
    pub ref_type: Option<String>,
}

/// A key/value tag attached to a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

/// The resource an event fired on
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "ref")]
    pub resource_ref: Option<ResourceRef>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// A monitoring event (alert, warning, or anomaly)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub type_text: String,
    pub severity: String,
    pub summary_text: String,
    pub opened: String,
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub source: Option<EventSource>,
}

// ============================================================================
// Projects and users
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// A pending account invitation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteUser {
    pub email: String,
    pub admin: bool,
}

// ============================================================================
// Notifications (outbounds)
// ============================================================================

/// Severity filter applied to a notification channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityFilter {
    pub all: Vec<String>,
}

impl SeverityFilter {
    pub fn new(severities: Vec<String>) -> Self {
        Self { all: severities }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotificationData {
    pub email: String,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerDutyNotificationData {
    pub name: String,
    pub account: String,
    pub service_name: String,
    pub service_secret: String,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpsGenieNotificationData {
    pub name: String,
    pub apikey: String,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnsNotificationData {
    pub name: String,
    pub topic_arn: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub send_resolve: bool,
    pub send_json: bool,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictorOpsNotificationData {
    pub name: String,
    pub integration_id: String,
    pub routing_key: String,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquadCastNotificationData {
    pub name: String,
    pub source_instance: String,
    pub severities: SeverityFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceNowCredentials {
    pub instance_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceNowNotificationData {
    pub name: String,
    pub credentials: ServiceNowCredentials,
    pub source_instance: String,
    pub severities: SeverityFilter,
}

/// Delivery counters reported per notification channel
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(default)]
    pub status: IntegrationStatus,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A notification channel (outbound) attached to an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub outbound_type: String,
    pub enabled: bool,
    #[serde(default)]
    pub data: NotificationData,
}

// ============================================================================
// Mute rules
// ============================================================================

/// An existing mute rule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRule {
    pub id: String,
    pub hide: bool,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub resource: Option<ResourceRef>,
    #[serde(default)]
    pub projects: Option<Vec<String>>,
    #[serde(default)]
    pub regions: Option<Vec<String>>,
}

/// Payload for creating a mute rule. All scoping fields are optional; an
/// empty rule mutes everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMuteRule {
    pub hide: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitors: Option<BTreeMap<String, Vec<String>>>,
}

/// Regions available for mute-rule scoping
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRegions {
    pub aws_regions: Vec<String>,
    pub azure_regions: Vec<String>,
}

/// Monitor names available for mute-rule scoping, keyed by service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuteMonitors {
    pub monitors: BTreeMap<String, Vec<String>>,
}

/// One page of resources available for mute-rule scoping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuteResources {
    pub resources: Vec<ResourceRef>,
}

// ============================================================================
// Metrics
// ============================================================================

/// A metrics query; results come back as untyped JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsQuery {
    pub metrics: String,
    pub agg: String,
    pub start: String,
    pub end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_mute_rule_omits_empty_scopes() {
        let rule = CreateMuteRule {
            hide: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json, serde_json::json!({"hide": true}));
    }

    #[test]
    fn create_mute_rule_serializes_monitor_scope() {
        let mut monitors = BTreeMap::new();
        monitors.insert("sqs".to_string(), vec!["queue-depth".to_string()]);
        let rule = CreateMuteRule {
            hide: false,
            monitors: Some(monitors),
            ..Default::default()
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["monitors"]["sqs"][0], "queue-depth");
        assert!(json.get("resource").is_none());
    }

    #[test]
    fn event_source_ref_uses_wire_name() {
        let json = serde_json::json!({
            "label": "orders-queue",
            "ref": {"arn": "arn:aws:sqs:us-east-1:1:orders", "refType": "aws_arn"},
            "tags": [{"key": "Environment", "value": "prod"}]
        });
        let source: EventSource = serde_json::from_value(json).unwrap();
        let resource = source.resource_ref.unwrap();
        assert_eq!(resource.ref_type.as_deref(), Some("aws_arn"));
        assert_eq!(source.tags[0].key, "Environment");
    }

    #[test]
    fn integration_tolerates_unknown_data_fields() {
        let json = serde_json::json!({
            "id": "i-1",
            "accountId": "a-1",
            "inboundType": "aws",
            "created": "2024-01-01T00:00:00Z",
            "enabled": true,
            "data": {
                "name": "prod",
                "status": {"totalSuccess": 10, "totalError": 1, "recentErrors": []},
                "roleArn": "arn:aws:iam::1:role/bm"
            }
        });
        let integration: Integration = serde_json::from_value(json).unwrap();
        assert_eq!(integration.data.name, "prod");
        assert_eq!(integration.data.status.total_success, 10);
        assert!(integration.data.extra.contains_key("roleArn"));
    }
}
