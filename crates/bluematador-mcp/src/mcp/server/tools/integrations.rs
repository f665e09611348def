//! Integrations: create, list, update, enable, disable, delete
//!
//! Cloud integrations (inbounds) pull monitoring data from AWS and Azure.

use super::connect;
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::params::{
    CreateAwsIntegrationParams, CreateAzureIntegrationParams, InboundActionParams,
    UpdateAwsIntegrationParams, UpdateAzureIntegrationParams,
};
use bluematador_client::{AwsIntegrationData, AzureIntegrationData, Integration};
use rmcp::ErrorData as McpError;
use std::fmt::Write;

// ============================================================================
// create_aws_integration / update_aws_integration
// ============================================================================

pub struct AwsIntegrationResult {
    pub id: String,
    pub name: String,
    pub role_arn: String,
    pub external_id: String,
    pub enabled: bool,
    pub created: Option<String>,
}

impl AwsIntegrationResult {
    pub fn build_message(&self, updated: bool) -> String {
        let mut message = format!(
            "AWS integration {} successfully!\n\nDetails:\n- ID: {}\n- Name: {}\n- Role ARN: {}\n- External ID: {}\n- Enabled: {}",
            if updated { "updated" } else { "created" },
            self.id,
            self.name,
            self.role_arn,
            self.external_id,
            self.enabled,
        );
        if !updated {
            let _ = write!(
                message,
                "\n- Created: {}",
                self.created.as_deref().unwrap_or("unknown")
            );
        }
        message
    }
}

pub async fn create_aws_integration_impl(
    defaults: &CredentialDefaults,
    params: CreateAwsIntegrationParams,
) -> Result<AwsIntegrationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let data = AwsIntegrationData {
        name: params.name.clone(),
        role_arn: params.role_arn.clone(),
        external_id: params.external_id.clone(),
    };
    let result = ctx
        .client
        .create_aws_integration(&ctx.account_id, &data)
        .await
        .tool_result("create_aws_integration", &ctx.args)?;
    Ok(AwsIntegrationResult {
        id: result.id,
        name: params.name,
        role_arn: params.role_arn,
        external_id: params.external_id,
        enabled: result.enabled,
        created: result.created,
    })
}

pub async fn update_aws_integration_impl(
    defaults: &CredentialDefaults,
    params: UpdateAwsIntegrationParams,
) -> Result<AwsIntegrationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let data = AwsIntegrationData {
        name: params.name.clone(),
        role_arn: params.role_arn.clone(),
        external_id: params.external_id.clone(),
    };
    let result = ctx
        .client
        .update_aws_integration(&ctx.account_id, &params.inbound_id, &data)
        .await
        .tool_result("update_aws_integration", &ctx.args)?;
    Ok(AwsIntegrationResult {
        id: result.id,
        name: params.name,
        role_arn: params.role_arn,
        external_id: params.external_id,
        enabled: result.enabled,
        created: result.created,
    })
}

// ============================================================================
// create_azure_integration / update_azure_integration
// ============================================================================

pub struct AzureIntegrationResult {
    pub id: String,
    pub name: String,
    pub subscription_id: String,
    pub tenant_id: String,
    pub application_id: String,
    pub enabled: bool,
    pub created: Option<String>,
}

impl AzureIntegrationResult {
    pub fn build_message(&self, updated: bool) -> String {
        let mut message = format!(
            "Azure integration {} successfully!\n\nDetails:\n- ID: {}\n- Name: {}\n- Subscription ID: {}\n- Tenant ID: {}\n- Application ID: {}\n- Enabled: {}",
            if updated { "updated" } else { "created" },
            self.id,
            self.name,
            self.subscription_id,
            self.tenant_id,
            self.application_id,
            self.enabled,
        );
        if !updated {
            let _ = write!(
                message,
                "\n- Created: {}",
                self.created.as_deref().unwrap_or("unknown")
            );
        }
        message
    }
}

pub async fn create_azure_integration_impl(
    defaults: &CredentialDefaults,
    params: CreateAzureIntegrationParams,
) -> Result<AzureIntegrationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let data = AzureIntegrationData {
        name: params.name.clone(),
        subscription_id: params.subscription_id.clone(),
        tenant_id: params.tenant_id.clone(),
        application_id: params.application_id.clone(),
        secret: params.secret,
    };
    let result = ctx
        .client
        .create_azure_integration(&ctx.account_id, &data)
        .await
        .tool_result("create_azure_integration", &ctx.args)?;
    Ok(AzureIntegrationResult {
        id: result.id,
        name: params.name,
        subscription_id: params.subscription_id,
        tenant_id: params.tenant_id,
        application_id: params.application_id,
        enabled: result.enabled,
        created: result.created,
    })
}

pub async fn update_azure_integration_impl(
    defaults: &CredentialDefaults,
    params: UpdateAzureIntegrationParams,
) -> Result<AzureIntegrationResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let data = AzureIntegrationData {
        name: params.name.clone(),
        subscription_id: params.subscription_id.clone(),
        tenant_id: params.tenant_id.clone(),
        application_id: params.application_id.clone(),
        secret: params.secret,
    };
    let result = ctx
        .client
        .update_azure_integration(&ctx.account_id, &params.inbound_id, &data)
        .await
        .tool_result("update_azure_integration", &ctx.args)?;
    Ok(AzureIntegrationResult {
        id: result.id,
        name: params.name,
        subscription_id: params.subscription_id,
        tenant_id: params.tenant_id,
        application_id: params.application_id,
        enabled: result.enabled,
        created: result.created,
    })
}

// ============================================================================
// list_integrations
// ============================================================================

pub struct ListIntegrationsResult {
    pub integrations: Vec<Integration>,
}

impl ListIntegrationsResult {
    pub fn build_message(&self) -> String {
        if self.integrations.is_empty() {
            return "No integrations found for this account.".to_string();
        }
        let list = self
            .integrations
            .iter()
            .map(|integration| {
                let status = &integration.data.status;
                format!(
                    "- {} ({})\n  ID: {}\n  Enabled: {}\n  Success: {}, Errors: {}\n  Created: {}",
                    integration.data.name,
                    integration.inbound_type,
                    integration.id,
                    integration.enabled,
                    status.total_success,
                    status.total_error,
                    integration.created,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "Found {} integration(s):\n\n{list}",
            self.integrations.len()
        )
    }
}

pub async fn list_integrations_impl(
    defaults: &CredentialDefaults,
    params: crate::mcp::params::AccountParams,
) -> Result<ListIntegrationsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let integrations = ctx
        .client
        .list_integrations(&ctx.account_id)
        .await
        .tool_result("list_integrations", &ctx.args)?;
    Ok(ListIntegrationsResult { integrations })
}

// ============================================================================
// enable_integration / disable_integration / delete_integration
// ============================================================================

pub struct IntegrationActionResult {
    pub inbound_id: String,
    pub action: &'static str,
}

impl IntegrationActionResult {
    pub fn build_message(&self) -> String {
        format!(
            "Integration {} has been {} successfully.",
            self.inbound_id, self.action
        )
    }
}

pub async fn enable_integration_impl(
    defaults: &CredentialDefaults,
    params: InboundActionParams,
) -> Result<IntegrationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .enable_integration(&ctx.account_id, &params.inbound_id)
        .await
        .tool_result("enable_integration", &ctx.args)?;
    Ok(IntegrationActionResult {
        inbound_id: params.inbound_id,
        action: "enabled",
    })
}

pub async fn disable_integration_impl(
    defaults: &CredentialDefaults,
    params: InboundActionParams,
) -> Result<IntegrationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .disable_integration(&ctx.account_id, &params.inbound_id)
        .await
        .tool_result("disable_integration", &ctx.args)?;
    Ok(IntegrationActionResult {
        inbound_id: params.inbound_id,
        action: "disabled",
    })
}

pub async fn delete_integration_impl(
    defaults: &CredentialDefaults,
    params: InboundActionParams,
) -> Result<IntegrationActionResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .delete_integration(&ctx.account_id, &params.inbound_id)
        .await
        .tool_result("delete_integration", &ctx.args)?;
    Ok(IntegrationActionResult {
        inbound_id: params.inbound_id,
        action: "deleted",
    })
}
