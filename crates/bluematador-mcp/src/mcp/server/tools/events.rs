//! Events: opened window, currently active, 30-day summary

use super::connect;
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::format::format_events;
use crate::mcp::params::{ActiveEventsParams, OpenedEventsParams};
use bluematador_client::Event;
use rmcp::ErrorData as McpError;

fn project_suffix(project: Option<&str>) -> String {
    project
        .map(|p| format!(" for project {p}"))
        .unwrap_or_default()
}

// ============================================================================
// get_opened_events
// ============================================================================

pub struct OpenedEventsResult {
    pub events: Vec<Event>,
    pub start: String,
    pub end: String,
    pub project: Option<String>,
}

impl OpenedEventsResult {
    pub fn build_message(&self) -> String {
        let suffix = project_suffix(self.project.as_deref());
        if self.events.is_empty() {
            return format!(
                "No events found between {} and {}{suffix}.",
                self.start, self.end
            );
        }
        format!(
            "Found {} events opened between {} and {}{suffix}:\n\n---\n\n{}",
            self.events.len(),
            self.start,
            self.end,
            format_events(&self.events),
        )
    }
}

pub async fn opened_events_impl(
    defaults: &CredentialDefaults,
    params: OpenedEventsParams,
) -> Result<OpenedEventsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let events = ctx
        .client
        .opened_events(
            &ctx.account_id,
            &params.start,
            &params.end,
            params.project.as_deref(),
        )
        .await
        .tool_result("get_opened_events", &ctx.args)?;
    Ok(OpenedEventsResult {
        events,
        start: params.start,
        end: params.end,
        project: params.project,
    })
}

// ============================================================================
// get_active_events
// ============================================================================

pub struct ActiveEventsResult {
    pub events: Vec<Event>,
    pub project: Option<String>,
}

impl ActiveEventsResult {
    pub fn build_message(&self) -> String {
        let suffix = project_suffix(self.project.as_deref());
        if self.events.is_empty() {
            return format!("No active events found{suffix}.");
        }
        format!(
            "Found {} active events{suffix}:\n\n---\n\n{}",
            self.events.len(),
            format_events(&self.events),
        )
    }
}

pub async fn active_events_impl(
    defaults: &CredentialDefaults,
    params: ActiveEventsParams,
) -> Result<ActiveEventsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let events = ctx
        .client
        .active_events(&ctx.account_id, params.project.as_deref())
        .await
        .tool_result("get_active_events", &ctx.args)?;
    Ok(ActiveEventsResult {
        events,
        project: params.project,
    })
}

// ============================================================================
// get_active_events_summary
// ============================================================================

pub struct EventsSummaryResult {
    pub summary: serde_json::Value,
    pub project: Option<String>,
}

impl EventsSummaryResult {
    pub fn build_message(&self) -> String {
        let suffix = project_suffix(self.project.as_deref());
        let rendered = serde_json::to_string_pretty(&self.summary)
            .unwrap_or_else(|_| self.summary.to_string());
        format!("Events summary for the last 30 days{suffix}:\n\n{rendered}")
    }
}

pub async fn active_events_summary_impl(
    defaults: &CredentialDefaults,
    params: ActiveEventsParams,
) -> Result<EventsSummaryResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let summary = ctx
        .client
        .active_events_summary(&ctx.account_id, params.project.as_deref())
        .await
        .tool_result("get_active_events_summary", &ctx.args)?;
    Ok(EventsSummaryResult {
        summary,
        project: params.project,
    })
}
