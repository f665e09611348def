//! Notifications: list, per-provider create/update, enable, disable, delete
//!
//! Seven providers share one flow: map the tool fields onto the provider's
//! wire payload, post it to the right outbound path, and report the new
//! channel. The detail lines in the response vary per provider.

use super::{connect, CallContext};
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::params::{
    AccountParams, CreateEmailNotificationParams, CreateOpsGenieNotificationParams,
    CreatePagerDutyNotificationParams, CreateServiceNowNotificationParams,
    CreateSnsNotificationParams, CreateSquadCastNotificationParams,
    CreateVictorOpsNotificationParams, EmailFields, OpsGenieFields, OutboundActionParams,
    PagerDutyFields, ServiceNowFields, SnsFields, SquadCastFields, UpdateEmailNotificationParams,
    UpdateOpsGenieNotificationParams, UpdatePagerDutyNotificationParams,
    UpdateServiceNowNotificationParams, UpdateSnsNotificationParams,
    UpdateSquadCastNotificationParams, UpdateVictorOpsNotificationParams, VictorOpsFields,
};
use bluematador_client::{
    EmailNotificationData, Notification, NotificationKind, OpsGenieNotificationData,
    PagerDutyNotificationData, ServiceNowCredentials, ServiceNowNotificationData, SeverityFilter,
    SnsNotificationData, SquadCastNotificationData, VictorOpsNotificationData,
};
use rmcp::ErrorData as McpError;
use std::fmt::Write;

// ============================================================================
// list_notifications
// ============================================================================

pub struct ListNotificationsResult {
    pub notifications: Vec<Notification>,
}

impl ListNotificationsResult {
    pub fn build_message(&self) -> String {
        if self.notifications.is_empty() {
            return "No notification integrations found for this account.".to_string();
        }
        let list = self
            .notifications
            .iter()
            .map(|notification| {
                format!(
                    "- {} (ID: {})\n  Enabled: {}\n  Success: {}, Errors: {}",
                    notification.outbound_type,
                    notification.id,
                    notification.enabled,
                    notification.data.status.total_success,
                    notification.data.status.total_error,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "Found {} notification integration(s):\n\n{list}",
            self.notifications.len()
        )
    }
}

pub async fn list_notifications_impl(
    defaults: &CredentialDefaults,
    params: AccountParams,
) -> Result<ListNotificationsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let notifications = ctx
        .client
        .list_notifications(&ctx.account_id)
        .await
        .tool_result("list_notifications", &ctx.args)?;
    Ok(ListNotificationsResult { notifications })
}

// ============================================================================
// Shared create/update result
// ============================================================================

/// Outcome of any provider create or update call
pub struct NotificationResult {
    pub provider: &'static str,
    pub id: String,
    pub enabled: bool,
    pub created: Option<String>,
    pub detail_lines: Vec<String>,
    pub updated: bool,
}

impl NotificationResult {
    pub fn build_message(&self) -> String {
        let mut message = format!(
            "{} notification {} successfully!\n\nDetails:\n- ID: {}",
            self.provider,
            if self.updated { "updated" } else { "created" },
            self.id,
        );
        for line in &self.detail_lines {
            let _ = write!(message, "\n{line}");
        }
        let _ = write!(message, "\n- Enabled: {}", self.enabled);
        if !self.updated {
            let _ = write!(
                message,
                "\n- Created: {}",
                self.created.as_deref().unwrap_or("unknown")
            );
        }
        message
    }
}

fn severities_line(severities: &[String]) -> String {
    format!("- Severities: {}", severities.join(", "))
}

fn email_payload(fields: &EmailFields) -> (EmailNotificationData, Vec<String>) {
    let data = EmailNotificationData {
        email: fields.email.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Email: {}", fields.email),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn pagerduty_payload(fields: &PagerDutyFields) -> (PagerDutyNotificationData, Vec<String>) {
    let data = PagerDutyNotificationData {
        name: fields.name.clone(),
        account: fields.account.clone(),
        service_name: fields.service_name.clone(),
        service_secret: fields.service_secret.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        format!("- Account: {}", fields.account),
        format!("- Service: {}", fields.service_name),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn opsgenie_payload(fields: &OpsGenieFields) -> (OpsGenieNotificationData, Vec<String>) {
    let data = OpsGenieNotificationData {
        name: fields.name.clone(),
        apikey: fields.apikey.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn sns_payload(fields: &SnsFields) -> (SnsNotificationData, Vec<String>) {
    let data = SnsNotificationData {
        name: fields.name.clone(),
        topic_arn: fields.topic_arn.clone(),
        access_key_id: fields.access_key_id.clone(),
        secret_access_key: fields.secret_access_key.clone(),
        send_resolve: fields.send_resolve,
        send_json: fields.send_json,
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        format!("- Topic ARN: {}", fields.topic_arn),
        format!("- Send Resolve: {}", fields.send_resolve),
        format!("- Send JSON: {}", fields.send_json),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn victorops_payload(fields: &VictorOpsFields) -> (VictorOpsNotificationData, Vec<String>) {
    let data = VictorOpsNotificationData {
        name: fields.name.clone(),
        integration_id: fields.integration_id.clone(),
        routing_key: fields.routing_key.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        format!("- Integration ID: {}", fields.integration_id),
        format!("- Routing Key: {}", fields.routing_key),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn squadcast_payload(fields: &SquadCastFields) -> (SquadCastNotificationData, Vec<String>) {
    let data = SquadCastNotificationData {
        name: fields.name.clone(),
        source_instance: fields.source_instance.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        format!("- Source Instance: {}", fields.source_instance),
        severities_line(&fields.severities),
    ];
    (data, details)
}

fn servicenow_payload(fields: &ServiceNowFields) -> (ServiceNowNotificationData, Vec<String>) {
    let data = ServiceNowNotificationData {
        name: fields.name.clone(),
        credentials: ServiceNowCredentials {
            instance_name: fields.instance_name.clone(),
            username: fields.username.clone(),
            password: fields.password.clone(),
        },
        source_instance: fields.source_instance.clone(),
        severities: SeverityFilter::new(fields.severities.clone()),
    };
    let details = vec![
        format!("- Name: {}", fields.name),
        format!("- Instance: {}", fields.instance_name),
        format!("- Username: {}", fields.username),
        format!("- Source Instance: {}", fields.source_instance),
        severities_line(&fields.severities),
    ];
    (data, details)
}

async fn create_notification<T: serde::Serialize>(
    ctx: &CallContext,
    tool: &str,
    provider: &'static str,
    kind: NotificationKind,
    data: &T,
    detail_lines: Vec<String>,
) -> Result<NotificationResult, McpError> {
    let result = ctx
        .client
        .create_notification(&ctx.account_id, kind, data)
        .await
        .tool_result(tool, &ctx.args)?;
    Ok(NotificationResult {
        provider,
        id: result.id,
        enabled: result.enabled,
        created: result.created,
        detail_lines,
        updated: false,
    })
}

async fn update_notification<T: serde::Serialize>(
    ctx: &CallContext,
    tool: &str,
    provider: &'static str,
    kind: NotificationKind,
    outbound_id: &str,
    data: &T,
    detail_lines: Vec<String>,
) -> Result<NotificationResult, McpError> {
    let result = ctx
        .client
        .update_notification(&ctx.account_id, kind, outbound_id, data)
        .await
        .tool_result(tool, &ctx.args)?;
    Ok(NotificationResult {
        provider,
        id: result.id,
        enabled: result.enabled,
        created: result.created,
        detail_lines,
        updated: true,
    })
}

// ============================================================================
// Per-provider create/update implementations
// ============================================================================

pub async fn create_email_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateEmailNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = email_payload(&params.fields);
    create_notification(
        &ctx,
        "create_email_notification",
        "Email",
        NotificationKind::Email,
        &data,
        details,
    )
    .await
}

pub async fn update_email_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateEmailNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = email_payload(&params.fields);
    update_notification(
        &ctx,
        "update_email_notification",
        "Email",
        NotificationKind::Email,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_pagerduty_notification_impl(
    defaults: &CredentialDefaults,
    params: CreatePagerDutyNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = pagerduty_payload(&params.fields);
    create_notification(
        &ctx,
        "create_pagerduty_notification",
        "PagerDuty",
        NotificationKind::PagerDuty,
        &data,
        details,
    )
    .await
}

pub async fn update_pagerduty_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdatePagerDutyNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = pagerduty_payload(&params.fields);
    update_notification(
        &ctx,
        "update_pagerduty_notification",
        "PagerDuty",
        NotificationKind::PagerDuty,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_opsgenie_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateOpsGenieNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = opsgenie_payload(&params.fields);
    create_notification(
        &ctx,
        "create_opsgenie_notification",
        "OpsGenie",
        NotificationKind::OpsGenie,
        &data,
        details,
    )
    .await
}

pub async fn update_opsgenie_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateOpsGenieNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = opsgenie_payload(&params.fields);
    update_notification(
        &ctx,
        "update_opsgenie_notification",
        "OpsGenie",
        NotificationKind::OpsGenie,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_sns_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateSnsNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = sns_payload(&params.fields);
    create_notification(
        &ctx,
        "create_sns_notification",
        "AWS SNS",
        NotificationKind::Sns,
        &data,
        details,
    )
    .await
}

pub async fn update_sns_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateSnsNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = sns_payload(&params.fields);
    update_notification(
        &ctx,
        "update_sns_notification",
        "AWS SNS",
        NotificationKind::Sns,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_victorops_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateVictorOpsNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = victorops_payload(&params.fields);
    create_notification(
        &ctx,
        "create_victorops_notification",
        "VictorOps",
        NotificationKind::VictorOps,
        &data,
        details,
    )
    .await
}

pub async fn update_victorops_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateVictorOpsNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = victorops_payload(&params.fields);
    update_notification(
        &ctx,
        "update_victorops_notification",
        "VictorOps",
        NotificationKind::VictorOps,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_squadcast_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateSquadCastNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = squadcast_payload(&params.fields);
    create_notification(
        &ctx,
        "create_squadcast_notification",
        "SquadCast",
        NotificationKind::SquadCast,
        &data,
        details,
    )
    .await
}

pub async fn update_squadcast_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateSquadCastNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = squadcast_payload(&params.fields);
    update_notification(
        &ctx,
        "update_squadcast_notification",
        "SquadCast",
        NotificationKind::SquadCast,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

pub async fn create_servicenow_notification_impl(
    defaults: &CredentialDefaults,
    params: CreateServiceNowNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = servicenow_payload(&params.fields);
    create_notification(
        &ctx,
        "create_servicenow_notification",
        "ServiceNow",
        NotificationKind::ServiceNow,
        &data,
        details,
    )
    .await
}

pub async fn update_servicenow_notification_impl(
    defaults: &CredentialDefaults,
    params: UpdateServiceNowNotificationParams,
) -> Result<NotificationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let (data, details) = servicenow_payload(&params.fields);
    update_notification(
        &ctx,
        "update_servicenow_notification",
        "ServiceNow",
        NotificationKind::ServiceNow,
        &params.outbound_id,
        &data,
        details,
    )
    .await
}

// ============================================================================
// enable_notification / disable_notification / delete_notification
// ============================================================================

pub struct NotificationActionResult {
    pub outbound_id: String,
    pub action: &'static str,
}

impl NotificationActionResult {
    pub fn build_message(&self) -> String {
        format!(
            "Notification {} has been {} successfully.",
            self.outbound_id, self.action
        )
    }
}

pub async fn enable_notification_impl(
    defaults: &CredentialDefaults,
    params: OutboundActionParams,
) -> Result<NotificationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .enable_notification(&ctx.account_id, &params.outbound_id)
        .await
        .tool_result("enable_notification", &ctx.args)?;
    Ok(NotificationActionResult {
        outbound_id: params.outbound_id,
        action: "enabled",
    })
}

pub async fn disable_notification_impl(
    defaults: &CredentialDefaults,
    params: OutboundActionParams,
) -> Result<NotificationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .disable_notification(&ctx.account_id, &params.outbound_id)
        .await
        .tool_result("disable_notification", &ctx.args)?;
    Ok(NotificationActionResult {
        outbound_id: params.outbound_id,
        action: "disabled",
    })
}

pub async fn delete_notification_impl(
    defaults: &CredentialDefaults,
    params: OutboundActionParams,
) -> Result<NotificationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .delete_notification(&ctx.account_id, &params.outbound_id)
        .await
        .tool_result("delete_notification", &ctx.args)?;
    Ok(NotificationActionResult {
        outbound_id: params.outbound_id,
        action: "deleted",
    })
}
