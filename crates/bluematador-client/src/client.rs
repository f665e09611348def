//! HTTP client for the Blue Matador API
//!
//! One async method per endpoint. The account ID is passed per call; the API
//! key and base URL are fixed at construction. All endpoints live under
//! `/zi/accounts/{accountId}/`.

use crate::error::{ApiError, TransportKind};
use crate::types::*;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://app.bluematador.com";

/// Which notification provider an outbound call targets.
///
/// The variant decides the path segment under `/outbounds/`; the request
/// body shape is the caller's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Email,
    PagerDuty,
    OpsGenie,
    Sns,
    VictorOps,
    SquadCast,
    ServiceNow,
}

impl NotificationKind {
    /// Path segment used by the API for this provider
    pub fn path_segment(&self) -> &'static str {
        match self {
            NotificationKind::Email => "email",
            NotificationKind::PagerDuty => "pagerduty",
            NotificationKind::OpsGenie => "opsgenie",
            NotificationKind::Sns => "sns",
            NotificationKind::VictorOps => "victorops",
            NotificationKind::SquadCast => "squadcast",
            NotificationKind::ServiceNow => "servicenow",
        }
    }
}

/// Authenticated client for one API key
#[derive(Debug, Clone)]
pub struct BluematadorClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BluematadorClient {
    /// Create a client. `base_url` falls back to [`DEFAULT_BASE_URL`] when
    /// `None`; trailing slashes are trimmed so path joins stay predictable.
    pub fn new(api_key: impl Into<String>, base_url: Option<&str>) -> Self {
        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Self {
            http: reqwest::Client::new(),
            base_url: base.to_string(),
            api_key: api_key.into(),
        }
    }

    fn account_url(&self, account_id: &str, path: &str) -> String {
        format!("{}/zi/accounts/{}/{}", self.base_url, account_id, path)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.api_key.clone())
    }

    /// Send the request and fail on any non-2xx status
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let method = request.method().to_string();
        let url = request.url().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            let kind = if e.is_timeout() {
                TransportKind::Timeout
            } else if e.is_connect() {
                TransportKind::Connect
            } else {
                TransportKind::Other
            };
            ApiError::Transport {
                kind,
                message: e.to_string(),
                method: method.clone(),
                url: url.clone(),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response.text().await.unwrap_or_default();

        // Prefer the API's own message field when the body is JSON
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    body.clone()
                }
            });

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
            body,
            content_type,
            method,
            url,
        })
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.dispatch(builder).await?;
        let url = response.url().to_string();
        response.json().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
            url,
        })
    }

    async fn send_unit(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.dispatch(builder).await.map(|_| ())
    }

    // ========================================================================
    // Integrations (inbounds)
    // ========================================================================

    pub async fn create_aws_integration(
        &self,
        account_id: &str,
        data: &AwsIntegrationData,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(account_id, "inbounds/aws");
        self.send(self.request(Method::POST, url).json(data)).await
    }

    pub async fn create_azure_integration(
        &self,
        account_id: &str,
        data: &AzureIntegrationData,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(account_id, "inbounds/azure");
        self.send(self.request(Method::POST, url).json(data)).await
    }

    pub async fn list_integrations(&self, account_id: &str) -> Result<Vec<Integration>, ApiError> {
        let url = self.account_url(account_id, "inbounds");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn update_aws_integration(
        &self,
        account_id: &str,
        inbound_id: &str,
        data: &AwsIntegrationData,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(account_id, &format!("inbounds/aws/{inbound_id}"));
        self.send(self.request(Method::PUT, url).json(data)).await
    }

    pub async fn update_azure_integration(
        &self,
        account_id: &str,
        inbound_id: &str,
        data: &AzureIntegrationData,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(account_id, &format!("inbounds/azure/{inbound_id}"));
        self.send(self.request(Method::PUT, url).json(data)).await
    }

    pub async fn enable_integration(
        &self,
        account_id: &str,
        inbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("inbounds/{inbound_id}/enable"));
        self.send_unit(self.request(Method::PUT, url)).await
    }

    pub async fn disable_integration(
        &self,
        account_id: &str,
        inbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("inbounds/{inbound_id}/disable"));
        self.send_unit(self.request(Method::PUT, url)).await
    }

    pub async fn delete_integration(
        &self,
        account_id: &str,
        inbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("inbounds/{inbound_id}"));
        self.send_unit(self.request(Method::DELETE, url)).await
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub async fn opened_events(
        &self,
        account_id: &str,
        start: &str,
        end: &str,
        project: Option<&str>,
    ) -> Result<Vec<Event>, ApiError> {
        let url = self.account_url(account_id, "events");
        let mut builder = self
            .request(Method::GET, url)
            .query(&[("start", start), ("end", end)]);
        if let Some(project) = project {
            builder = builder.query(&[("project", project)]);
        }
        self.send(builder).await
    }

    pub async fn active_events(
        &self,
        account_id: &str,
        project: Option<&str>,
    ) -> Result<Vec<Event>, ApiError> {
        let url = self.account_url(account_id, "events/active");
        let mut builder = self.request(Method::GET, url);
        if let Some(project) = project {
            builder = builder.query(&[("project", project)]);
        }
        self.send(builder).await
    }

    pub async fn active_events_summary(
        &self,
        account_id: &str,
        project: Option<&str>,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.account_url(account_id, "events/summary");
        let mut builder = self.request(Method::GET, url);
        if let Some(project) = project {
            builder = builder.query(&[("project", project)]);
        }
        self.send(builder).await
    }

    // ========================================================================
    // Projects and users
    // ========================================================================

    pub async fn list_projects(&self, account_id: &str) -> Result<Vec<Project>, ApiError> {
        let url = self.account_url(account_id, "projects");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn list_users(&self, account_id: &str) -> Result<UsersResponse, ApiError> {
        let url = self.account_url(account_id, "users");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn invite_users(
        &self,
        account_id: &str,
        users: &[InviteUser],
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, "users/invite");
        self.send_unit(self.request(Method::POST, url).json(users))
            .await
    }

    // ========================================================================
    // Notifications (outbounds)
    // ========================================================================

    pub async fn list_notifications(
        &self,
        account_id: &str,
    ) -> Result<Vec<Notification>, ApiError> {
        let url = self.account_url(account_id, "outbounds");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn create_notification<T: Serialize>(
        &self,
        account_id: &str,
        kind: NotificationKind,
        data: &T,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(account_id, &format!("outbounds/{}", kind.path_segment()));
        self.send(self.request(Method::POST, url).json(data)).await
    }

    pub async fn update_notification<T: Serialize>(
        &self,
        account_id: &str,
        kind: NotificationKind,
        outbound_id: &str,
        data: &T,
    ) -> Result<CreateResponse, ApiError> {
        let url = self.account_url(
            account_id,
            &format!("outbounds/{}/{outbound_id}", kind.path_segment()),
        );
        self.send(self.request(Method::PUT, url).json(data)).await
    }

    pub async fn enable_notification(
        &self,
        account_id: &str,
        outbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("outbounds/{outbound_id}/enable"));
        self.send_unit(self.request(Method::PUT, url)).await
    }

    pub async fn disable_notification(
        &self,
        account_id: &str,
        outbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("outbounds/{outbound_id}/disable"));
        self.send_unit(self.request(Method::PUT, url)).await
    }

    pub async fn delete_notification(
        &self,
        account_id: &str,
        outbound_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("outbounds/{outbound_id}"));
        self.send_unit(self.request(Method::DELETE, url)).await
    }

    // ========================================================================
    // Metrics
    // ========================================================================

    pub async fn get_metrics(
        &self,
        account_id: &str,
        query: &MetricsQuery,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.account_url(account_id, "metrics");
        let mut builder = self.request(Method::GET, url).query(&[
            ("metrics", query.metrics.as_str()),
            ("agg", query.agg.as_str()),
            ("start", query.start.as_str()),
            ("end", query.end.as_str()),
        ]);
        if let Some(groups) = &query.groups {
            builder = builder.query(&[("groups", groups.as_str())]);
        }
        self.send(builder).await
    }

    // ========================================================================
    // Mute rules
    // ========================================================================

    pub async fn list_mute_rules(
        &self,
        account_id: &str,
        include_inactive: Option<bool>,
    ) -> Result<Vec<MuteRule>, ApiError> {
        let url = self.account_url(account_id, "mutes");
        let mut builder = self.request(Method::GET, url);
        if let Some(include_inactive) = include_inactive {
            builder = builder.query(&[("includeInactive", include_inactive.to_string())]);
        }
        self.send(builder).await
    }

    pub async fn create_mute_rule(
        &self,
        account_id: &str,
        data: &CreateMuteRule,
    ) -> Result<(), ApiError> {
        let url = self.account_url(account_id, "mutes");
        self.send_unit(self.request(Method::POST, url).json(data))
            .await
    }

    pub async fn delete_mute_rule(&self, account_id: &str, mute_id: &str) -> Result<(), ApiError> {
        let url = self.account_url(account_id, &format!("mutes/{mute_id}"));
        self.send_unit(self.request(Method::DELETE, url)).await
    }

    pub async fn mute_regions(&self, account_id: &str) -> Result<MuteRegions, ApiError> {
        let url = self.account_url(account_id, "mutes/regions");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn mute_monitors(&self, account_id: &str) -> Result<MuteMonitors, ApiError> {
        let url = self.account_url(account_id, "mutes/monitors");
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn mute_resources(
        &self,
        account_id: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<MuteResources, ApiError> {
        let url = self.account_url(account_id, "mutes/resources");
        let mut builder = self.request(Method::GET, url);
        if let Some(page) = page {
            builder = builder.query(&[("page", page.to_string())]);
        }
        if let Some(page_size) = page_size {
            builder = builder.query(&[("pageSize", page_size.to_string())]);
        }
        self.send(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = BluematadorClient::new("key", Some("https://example.com/"));
        assert_eq!(
            client.account_url("acct", "inbounds"),
            "https://example.com/zi/accounts/acct/inbounds"
        );
    }

    #[test]
    fn default_base_url_is_production() {
        let client = BluematadorClient::new("key", None);
        assert!(client
            .account_url("acct", "mutes")
            .starts_with("https://app.bluematador.com/zi/accounts/"));
    }

    #[test]
    fn notification_kind_path_segments() {
        assert_eq!(NotificationKind::Email.path_segment(), "email");
        assert_eq!(NotificationKind::PagerDuty.path_segment(), "pagerduty");
        assert_eq!(NotificationKind::ServiceNow.path_segment(), "servicenow");
    }
}
