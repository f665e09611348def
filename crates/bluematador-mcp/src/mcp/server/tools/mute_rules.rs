//! Mute rules: CRUD plus the service and wildcard composition tools
//!
//! The two composition tools validate everything they can before any
//! mutating call. `mute_monitors_by_service` creates one rule scoped to a
//! service's monitors; `mute_resources_by_wildcard` fans out one rule per
//! matched resource and reports per-resource success or failure.

use super::connect;
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::params::{
    AccountParams, CreateMuteRuleParams, DeleteMuteRuleParams, ListMuteRulesParams,
    MuteMonitorsByServiceParams, MuteResourcesByWildcardParams, MuteResourcesPageParams,
};
use crate::mute;
use bluematador_client::{CreateMuteRule, MuteMonitors, MuteRegions, MuteRule, ResourceRef};
use rmcp::ErrorData as McpError;
use std::collections::BTreeMap;
use std::fmt::Write;

fn hide_sentence(hide: bool) -> &'static str {
    if hide {
        "Events will be completely hidden."
    } else {
        "Events will be shown but muted."
    }
}

fn scope_len(scope: &Option<Vec<String>>) -> usize {
    scope.as_ref().map(Vec::len).unwrap_or(0)
}

// ============================================================================
// list_mute_rules
// ============================================================================

pub struct ListMuteRulesResult {
    pub rules: Vec<MuteRule>,
}

impl ListMuteRulesResult {
    pub fn build_message(&self) -> String {
        if self.rules.is_empty() {
            return "No mute rules found for this account.".to_string();
        }
        let list = self
            .rules
            .iter()
            .map(|rule| {
                format!(
                    "- Rule ID: {}\n  Hide: {}\n  Active: {}\n  Resource: {}\n  Projects: {}\n  Regions: {}",
                    rule.id,
                    rule.hide,
                    rule.active,
                    rule.resource
                        .as_ref()
                        .map(|r| r.arn.as_str())
                        .unwrap_or("All resources"),
                    scope_len(&rule.projects),
                    scope_len(&rule.regions),
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("Found {} mute rule(s):\n\n{list}", self.rules.len())
    }
}

pub async fn list_mute_rules_impl(
    defaults: &CredentialDefaults,
    params: ListMuteRulesParams,
) -> Result<ListMuteRulesResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let rules = ctx
        .client
        .list_mute_rules(&ctx.account_id, params.include_inactive)
        .await
        .tool_result("list_mute_rules", &ctx.args)?;
    Ok(ListMuteRulesResult { rules })
}

// ============================================================================
// create_mute_rule
// ============================================================================

pub struct CreateMuteRuleResult {
    pub hide: bool,
    pub resource: Option<String>,
    pub project_count: usize,
    pub region_count: usize,
}

impl CreateMuteRuleResult {
    pub fn build_message(&self) -> String {
        format!(
            "Mute rule created successfully!\n\nDetails:\n- Hide events: {}\n- Resource: {}\n- Projects: {}\n- Regions: {}",
            self.hide,
            self.resource.as_deref().unwrap_or("All resources"),
            self.project_count,
            self.region_count,
        )
    }
}

pub async fn create_mute_rule_impl(
    defaults: &CredentialDefaults,
    params: CreateMuteRuleParams,
) -> Result<CreateMuteRuleResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let resource = params.resource.as_ref().map(|r| ResourceRef {
        arn: r.arn.clone(),
        ref_type: r.ref_type.clone(),
    });
    let data = CreateMuteRule {
        hide: params.hide,
        resource,
        projects: params.projects.clone(),
        regions: params.regions.clone(),
        monitors: None,
    };
    ctx.client
        .create_mute_rule(&ctx.account_id, &data)
        .await
        .tool_result("create_mute_rule", &ctx.args)?;
    Ok(CreateMuteRuleResult {
        hide: params.hide,
        resource: params.resource.map(|r| r.arn),
        project_count: scope_len(&params.projects),
        region_count: scope_len(&params.regions),
    })
}

// ============================================================================
// get_mute_regions
// ============================================================================

pub struct MuteRegionsResult {
    pub regions: MuteRegions,
}

impl MuteRegionsResult {
    pub fn build_message(&self) -> String {
        format!(
            "Available regions for mute rules:\n\n**AWS Regions:**\n{}\n\n**Azure Regions:**\n{}",
            self.regions.aws_regions.join(", "),
            self.regions.azure_regions.join(", "),
        )
    }
}

pub async fn get_mute_regions_impl(
    defaults: &CredentialDefaults,
    params: AccountParams,
) -> Result<MuteRegionsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let regions = ctx
        .client
        .mute_regions(&ctx.account_id)
        .await
        .tool_result("get_mute_regions", &ctx.args)?;
    Ok(MuteRegionsResult { regions })
}

// ============================================================================
// get_mute_monitors
// ============================================================================

pub struct MuteMonitorsResult {
    pub monitors: MuteMonitors,
}

impl MuteMonitorsResult {
    pub fn build_message(&self) -> String {
        let list = self
            .monitors
            .monitors
            .iter()
            .map(|(service, monitors)| format!("**{service}:**\n  {}", monitors.join(", ")))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("Available monitors for mute rules:\n\n{list}")
    }
}

pub async fn get_mute_monitors_impl(
    defaults: &CredentialDefaults,
    params: AccountParams,
) -> Result<MuteMonitorsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let monitors = ctx
        .client
        .mute_monitors(&ctx.account_id)
        .await
        .tool_result("get_mute_monitors", &ctx.args)?;
    Ok(MuteMonitorsResult { monitors })
}

// ============================================================================
// get_mute_resources
// ============================================================================

pub struct MuteResourcesResult {
    pub resources: Vec<ResourceRef>,
    pub page: Option<u32>,
}

impl MuteResourcesResult {
    pub fn build_message(&self) -> String {
        if self.resources.is_empty() {
            return "No resources found for mute rules.".to_string();
        }
        let list = self
            .resources
            .iter()
            .map(|resource| {
                format!(
                    "- {} ({})",
                    resource.arn,
                    resource.ref_type.as_deref().unwrap_or("resource")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        let page = self
            .page
            .map(|p| format!(" (Page {p})"))
            .unwrap_or_default();
        format!("Available resources for mute rules{page}:\n\n{list}")
    }
}

pub async fn get_mute_resources_impl(
    defaults: &CredentialDefaults,
    params: MuteResourcesPageParams,
) -> Result<MuteResourcesResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let response = ctx
        .client
        .mute_resources(&ctx.account_id, params.page, params.page_size)
        .await
        .tool_result("get_mute_resources", &ctx.args)?;
    Ok(MuteResourcesResult {
        resources: response.resources,
        page: params.page,
    })
}

// ============================================================================
// delete_mute_rule
// ============================================================================

pub struct DeleteMuteRuleResult {
    pub mute_id: String,
}

impl DeleteMuteRuleResult {
    pub fn build_message(&self) -> String {
        format!("Mute rule {} has been deleted successfully.", self.mute_id)
    }
}

pub async fn delete_mute_rule_impl(
    defaults: &CredentialDefaults,
    params: DeleteMuteRuleParams,
) -> Result<DeleteMuteRuleResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    ctx.client
        .delete_mute_rule(&ctx.account_id, &params.mute_id)
        .await
        .tool_result("delete_mute_rule", &ctx.args)?;
    Ok(DeleteMuteRuleResult {
        mute_id: params.mute_id,
    })
}

// ============================================================================
// mute_monitors_by_service
// ============================================================================

#[derive(Debug)]
pub struct MuteByServiceResult {
    pub service: String,
    pub monitors: Vec<String>,
    pub hide: bool,
    pub project_count: usize,
    pub region_count: usize,
}

impl MuteByServiceResult {
    pub fn build_message(&self) -> String {
        format!(
            "Mute rule created successfully for {} service!\n\nDetails:\n- Service: {}\n- Monitors muted: {}\n- Hide events: {}\n- Projects: {}\n- Regions: {}\n\n{}",
            self.service,
            self.service,
            self.monitors.join(", "),
            self.hide,
            self.project_count,
            self.region_count,
            hide_sentence(self.hide),
        )
    }
}

pub async fn mute_monitors_by_service_impl(
    defaults: &CredentialDefaults,
    params: MuteMonitorsByServiceParams,
) -> Result<MuteByServiceResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;

    // Validate the service and monitor names before creating anything
    let available = ctx
        .client
        .mute_monitors(&ctx.account_id)
        .await
        .tool_result("mute_monitors_by_service", &ctx.args)?;

    let service_key = mute::resolve_service(&available.monitors, &params.service_name)
        .ok_or_else(|| {
            let services = available
                .monitors
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            McpError::invalid_params(
                format!(
                    "Service \"{}\" not found. Available services: {services}",
                    params.service_name
                ),
                None,
            )
        })?
        .to_string();

    let service_monitors = available.monitors.get(&service_key).cloned().unwrap_or_default();

    let monitors_to_mute = match &params.monitor_names {
        Some(requested) if !requested.is_empty() => {
            let invalid = mute::invalid_monitors(&service_monitors, requested);
            if !invalid.is_empty() {
                return Err(McpError::invalid_params(
                    format!(
                        "Invalid monitors for service \"{service_key}\": {}. Available monitors: {}",
                        invalid.join(", "),
                        service_monitors.join(", "),
                    ),
                    None,
                ));
            }
            requested.clone()
        }
        _ => service_monitors,
    };

    let mut monitors = BTreeMap::new();
    monitors.insert(service_key.clone(), monitors_to_mute.clone());
    let data = CreateMuteRule {
        hide: params.hide,
        resource: None,
        projects: params.projects.clone(),
        regions: params.regions.clone(),
        monitors: Some(monitors),
    };
    ctx.client
        .create_mute_rule(&ctx.account_id, &data)
        .await
        .tool_result("mute_monitors_by_service", &ctx.args)?;

    Ok(MuteByServiceResult {
        service: service_key,
        monitors: monitors_to_mute,
        hide: params.hide,
        project_count: scope_len(&params.projects),
        region_count: scope_len(&params.regions),
    })
}

// ============================================================================
// mute_resources_by_wildcard
// ============================================================================

#[derive(Debug)]
pub struct MuteByWildcardResult {
    pub pattern: String,
    pub service_type: Option<String>,
    pub matched: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub hide: bool,
    pub project_count: usize,
    pub region_count: usize,
    pub result_lines: Vec<String>,
}

impl MuteByWildcardResult {
    pub fn build_message(&self) -> String {
        let mut message = format!(
            "Wildcard mute rules created!\n\n**Pattern:** {}\n**Service Filter:** {}\n**Matched Resources:** {}\n**Successfully Muted:** {}\n**Failed:** {}\n**Hide Events:** {}\n**Projects:** {}\n**Regions:** {}\n\n**Results:**\n",
            self.pattern,
            self.service_type.as_deref().unwrap_or("All services"),
            self.matched,
            self.success_count,
            self.failure_count,
            self.hide,
            self.project_count,
            self.region_count,
        );
        message.push_str(&self.result_lines.join("\n"));
        let _ = write!(message, "\n\n{}", hide_sentence(self.hide));
        message
    }
}

pub async fn mute_resources_by_wildcard_impl(
    defaults: &CredentialDefaults,
    params: MuteResourcesByWildcardParams,
) -> Result<MuteByWildcardResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;

    let response = ctx
        .client
        .mute_resources(&ctx.account_id, None, None)
        .await
        .tool_result("mute_resources_by_wildcard", &ctx.args)?;
    let all_resources = response.resources;

    if all_resources.is_empty() {
        return Err(McpError::invalid_request(
            "No resources found in the account to apply wildcard pattern to.",
            None,
        ));
    }

    let pattern = mute::wildcard_regex(&params.resource_pattern).map_err(|e| {
        McpError::invalid_params(
            format!("Invalid pattern \"{}\": {e}", params.resource_pattern),
            None,
        )
    })?;

    // A "*" pattern matches the empty string, so drop empty references
    // before matching; a rule without an ARN would mute everything.
    let matching: Vec<&ResourceRef> = all_resources
        .iter()
        .filter(|resource| !resource.arn.is_empty())
        .filter(|resource| mute::matches(&resource.arn, &pattern, params.service_type.as_deref()))
        .collect();

    if matching.is_empty() {
        let service_filter = params
            .service_type
            .as_deref()
            .map(|s| format!(" and service type \"{s}\""))
            .unwrap_or_default();
        return Err(McpError::invalid_request(
            format!(
                "No resources found matching pattern \"{}\"{service_filter}. Total resources available: {}",
                params.resource_pattern,
                all_resources.len(),
            ),
            None,
        ));
    }

    // Fan out one rule per resource. Individual failures are recorded,
    // never propagated, so a partial run still reports what happened.
    let mut result_lines = Vec::with_capacity(matching.len());
    let mut success_count = 0usize;
    let mut failure_count = 0usize;
    for resource in &matching {
        let data = CreateMuteRule {
            hide: params.hide,
            resource: Some((*resource).clone()),
            projects: params.projects.clone(),
            regions: params.regions.clone(),
            monitors: None,
        };
        match ctx.client.create_mute_rule(&ctx.account_id, &data).await {
            Ok(()) => {
                success_count += 1;
                result_lines.push(format!("✅ {}", resource.arn));
            }
            Err(error) => {
                failure_count += 1;
                result_lines.push(format!("❌ {} (Error: {error})", resource.arn));
            }
        }
    }

    Ok(MuteByWildcardResult {
        pattern: params.resource_pattern,
        service_type: params.service_type,
        matched: matching.len(),
        success_count,
        failure_count,
        hide: params.hide,
        project_count: scope_len(&params.projects),
        region_count: scope_len(&params.regions),
        result_lines,
    })
}
