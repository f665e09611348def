//! HTTP Bridge Methods for BluematadorServer
//!
//! These public methods allow the axum JSON-RPC handler to call MCP tools
//! directly. Errors stay as `McpError` so the HTTP transport can surface the
//! tool's own JSON-RPC error code instead of flattening everything to -32603.

use super::BluematadorServer;
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
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

/// Generates a `call_<tool>` bridge method per tool
macro_rules! bridge_methods {
    ( $( $tool:ident => $param_type:ty ),* $(,)? ) => {
        paste::paste! {
            impl BluematadorServer {
                $(
                    pub async fn [<call_ $tool>](
                        &self,
                        params: $param_type,
                    ) -> Result<CallToolResult, McpError> {
                        self.$tool(Parameters(params)).await
                    }
                )*
            }
        }
    };
}

impl BluematadorServer {
    /// Get all registered tools from the tool router.
    /// Used by the HTTP MCP handler to dynamically list tools instead of
    /// maintaining a separate hardcoded list.
    pub fn get_tools(&self) -> Vec<rmcp::model::Tool> {
        self.tool_router.list_all()
    }
}

bridge_methods!(
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
);
