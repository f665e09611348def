//! Metrics: raw query passthrough

use super::connect;
use crate::credentials::CredentialDefaults;
use crate::mcp::error::ApiResultExt;
use crate::mcp::params::MetricsParams;
use bluematador_client::MetricsQuery;
use rmcp::ErrorData as McpError;

pub struct GetMetricsResult {
    pub query: MetricsQuery,
    pub results: serde_json::Value,
}

impl GetMetricsResult {
    pub fn build_message(&self) -> String {
        let rendered = serde_json::to_string_pretty(&self.results)
            .unwrap_or_else(|_| self.results.to_string());
        format!(
            "Metrics query results:\n\n**Query:** {} ({})\n**Time Range:** {} to {}\n**Groups:** {}\n\n**Results:**\n{rendered}",
            self.query.metrics,
            self.query.agg,
            self.query.start,
            self.query.end,
            self.query.groups.as_deref().unwrap_or("None"),
        )
    }
}

pub async fn get_metrics_impl(
    defaults: &CredentialDefaults,
    params: MetricsParams,
) -> Result<GetMetricsResult, McpError> {
    let ctx = connect(&params.auth, defaults, &params)?;
    let query = MetricsQuery {
        metrics: params.metrics,
        agg: params.agg,
        start: params.start,
        end: params.end,
        groups: params.groups,
    };
    let results = ctx
        .client
        .get_metrics(&ctx.account_id, &query)
        .await
        .tool_result("get_metrics", &ctx.args)?;
    Ok(GetMetricsResult { query, results })
}
