//! MCP server exposing the Blue Matador monitoring API
//!
//! Parameter types live in `params.rs`; tool logic lives in `server/tools/`.
//! This file contains:
//! - `BluematadorServer` struct
//! - Thin `#[tool]` wrappers (via the `#[tool_router]` macro)
//! - `ServerHandler` implementation

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
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ErrorData as McpError,
};
use std::sync::Arc;

// ============================================================================
// MCP Server
// ============================================================================

/// MCP server for the Blue Matador monitoring platform.
///
/// Every tool accepts optional `apiKey`/`accountId`/`baseUrl` arguments;
/// values missing from a call fall back to the transport defaults the server
/// was constructed with.
#[derive(Clone)]
pub struct BluematadorServer {
    defaults: Arc<CredentialDefaults>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BluematadorServer {
    /// Create a server with credential defaults from the process environment
    pub fn new() -> Self {
        Self::with_defaults(CredentialDefaults::from_env())
    }

    /// Create a server with explicit credential defaults
    pub fn with_defaults(defaults: CredentialDefaults) -> Self {
        Self {
            defaults: Arc::new(defaults),
            tool_router: Self::tool_router(),
        }
    }

    // =========================================================================
    // Integrations
    // =========================================================================

    #[tool(description = "Create a new AWS integration in Bluematador")]
    async fn create_aws_integration(
        &self,
        Parameters(params): Parameters<CreateAwsIntegrationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_aws_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(false),
        )]))
    }

    #[tool(description = "Create a new Azure integration in Bluematador")]
    async fn create_azure_integration(
        &self,
        Parameters(params): Parameters<CreateAzureIntegrationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_azure_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(false),
        )]))
    }

    #[tool(description = "List all integrations for a Bluematador account")]
    async fn list_integrations(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::list_integrations_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update an existing AWS integration")]
    async fn update_aws_integration(
        &self,
        Parameters(params): Parameters<UpdateAwsIntegrationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_aws_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(true),
        )]))
    }

    #[tool(description = "Update an existing Azure integration")]
    async fn update_azure_integration(
        &self,
        Parameters(params): Parameters<UpdateAzureIntegrationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_azure_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(true),
        )]))
    }

    #[tool(description = "Enable a Bluematador integration")]
    async fn enable_integration(
        &self,
        Parameters(params): Parameters<InboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::enable_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Disable a Bluematador integration")]
    async fn disable_integration(
        &self,
        Parameters(params): Parameters<InboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::disable_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Delete a Bluematador integration")]
    async fn delete_integration(
        &self,
        Parameters(params): Parameters<InboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::delete_integration_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    // =========================================================================
    // Events
    // =========================================================================

    #[tool(description = "Get Bluematador events that were opened within a time period")]
    async fn get_opened_events(
        &self,
        Parameters(params): Parameters<OpenedEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::opened_events_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Get currently active Bluematador events")]
    async fn get_active_events(
        &self,
        Parameters(params): Parameters<ActiveEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::active_events_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Get summary of active events for the last 30 days")]
    async fn get_active_events_summary(
        &self,
        Parameters(params): Parameters<ActiveEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::active_events_summary_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    // =========================================================================
    // Projects and users
    // =========================================================================

    #[tool(description = "List all Bluematador projects for an account")]
    async fn list_projects(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::list_projects_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "List all users in a Bluematador account")]
    async fn list_users(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::list_users_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Invite users to a Bluematador account")]
    async fn invite_users(
        &self,
        Parameters(params): Parameters<InviteUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::invite_users_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    #[tool(description = "List all notification integrations for an account")]
    async fn list_notifications(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::list_notifications_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create an email notification integration")]
    async fn create_email_notification(
        &self,
        Parameters(params): Parameters<CreateEmailNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_email_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create a PagerDuty notification integration")]
    async fn create_pagerduty_notification(
        &self,
        Parameters(params): Parameters<CreatePagerDutyNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_pagerduty_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create an OpsGenie notification integration")]
    async fn create_opsgenie_notification(
        &self,
        Parameters(params): Parameters<CreateOpsGenieNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_opsgenie_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create an AWS SNS notification integration")]
    async fn create_sns_notification(
        &self,
        Parameters(params): Parameters<CreateSnsNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_sns_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create a VictorOps notification integration")]
    async fn create_victorops_notification(
        &self,
        Parameters(params): Parameters<CreateVictorOpsNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_victorops_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create a SquadCast notification integration")]
    async fn create_squadcast_notification(
        &self,
        Parameters(params): Parameters<CreateSquadCastNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_squadcast_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create a ServiceNow notification integration")]
    async fn create_servicenow_notification(
        &self,
        Parameters(params): Parameters<CreateServiceNowNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_servicenow_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update an email notification integration")]
    async fn update_email_notification(
        &self,
        Parameters(params): Parameters<UpdateEmailNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_email_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update a PagerDuty notification integration")]
    async fn update_pagerduty_notification(
        &self,
        Parameters(params): Parameters<UpdatePagerDutyNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_pagerduty_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update an OpsGenie notification integration")]
    async fn update_opsgenie_notification(
        &self,
        Parameters(params): Parameters<UpdateOpsGenieNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_opsgenie_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update an AWS SNS notification integration")]
    async fn update_sns_notification(
        &self,
        Parameters(params): Parameters<UpdateSnsNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_sns_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update a VictorOps notification integration")]
    async fn update_victorops_notification(
        &self,
        Parameters(params): Parameters<UpdateVictorOpsNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_victorops_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update a SquadCast notification integration")]
    async fn update_squadcast_notification(
        &self,
        Parameters(params): Parameters<UpdateSquadCastNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_squadcast_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Update a ServiceNow notification integration")]
    async fn update_servicenow_notification(
        &self,
        Parameters(params): Parameters<UpdateServiceNowNotificationParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::update_servicenow_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Enable a notification integration")]
    async fn enable_notification(
        &self,
        Parameters(params): Parameters<OutboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::enable_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Disable a notification integration")]
    async fn disable_notification(
        &self,
        Parameters(params): Parameters<OutboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::disable_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Delete a notification integration")]
    async fn delete_notification(
        &self,
        Parameters(params): Parameters<OutboundActionParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::delete_notification_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    #[tool(description = "Query Bluematador metrics data")]
    async fn get_metrics(
        &self,
        Parameters(params): Parameters<MetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::get_metrics_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    // =========================================================================
    // Mute rules
    // =========================================================================

    #[tool(description = "List mute rules for an account")]
    async fn list_mute_rules(
        &self,
        Parameters(params): Parameters<ListMuteRulesParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::list_mute_rules_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Create a mute rule to suppress alerts")]
    async fn create_mute_rule(
        &self,
        Parameters(params): Parameters<CreateMuteRuleParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::create_mute_rule_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Get available AWS and Azure regions for mute rules")]
    async fn get_mute_regions(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::get_mute_regions_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Get available monitors for mute rules")]
    async fn get_mute_monitors(
        &self,
        Parameters(params): Parameters<AccountParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::get_mute_monitors_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Get available resources for mute rules with pagination")]
    async fn get_mute_resources(
        &self,
        Parameters(params): Parameters<MuteResourcesPageParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::get_mute_resources_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(description = "Delete a mute rule")]
    async fn delete_mute_rule(
        &self,
        Parameters(params): Parameters<DeleteMuteRuleParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::delete_mute_rule_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(
        description = "Mute monitors for specific services (e.g., SQS, RDS, EC2) by creating a targeted mute rule"
    )]
    async fn mute_monitors_by_service(
        &self,
        Parameters(params): Parameters<MuteMonitorsByServiceParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::mute_monitors_by_service_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }

    #[tool(
        description = "Mute monitors for resources using wildcard patterns (e.g., \"sqs-*\", \"*-prod\", \"app-*-db\")"
    )]
    async fn mute_resources_by_wildcard(
        &self,
        Parameters(params): Parameters<MuteResourcesByWildcardParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = tools::mute_resources_by_wildcard_impl(&self.defaults, params).await?;
        Ok(CallToolResult::success(vec![Content::text(
            result.build_message(),
        )]))
    }
}

impl Default for BluematadorServer {
    fn default() -> Self {
        Self::new()
    }
}

// HTTP bridge methods used by the axum JSON-RPC transport
mod http_bridge;

// Tool implementation logic extracted from the #[tool] wrappers
mod tools;

// Implement the ServerHandler trait to define server capabilities
#[tool_handler(router = self.tool_router)]
impl rmcp::ServerHandler for BluematadorServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Blue Matador monitoring tools.\n\n\
                 ## Authentication\n\
                 Every tool accepts `apiKey` and `accountId` arguments. Both can also be\n\
                 provided once via the BLUEMATADOR_API_KEY and BLUEMATADOR_ACCOUNT_ID\n\
                 environment variables (or request headers on the HTTP transport).\n\
                 Get both from https://app.bluematador.com/ur/app#/account/apikeys\n\n\
                 ## Capabilities\n\
                 - Manage AWS/Azure integrations (create, update, enable, disable, delete)\n\
                 - Query events: opened windows, currently active, 30-day summary\n\
                 - Manage projects, users, and invitations\n\
                 - Manage notification channels: Email, PagerDuty, OpsGenie, SNS,\n\
                   VictorOps, SquadCast, ServiceNow\n\
                 - Query metrics data\n\
                 - Manage mute rules, including muting whole services\n\
                   (mute_monitors_by_service) and wildcard resource patterns\n\
                   (mute_resources_by_wildcard)\n\n\
                 ## Tips\n\
                 - Use get_mute_monitors to discover service and monitor names\n\
                 - Use get_mute_resources to discover resource ARNs before muting\n\
                 - Wildcard patterns use * for any characters, e.g. \"sqs-*\""
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Internal Unit Tests
// ============================================================================

#[cfg(test)]
mod tests;
