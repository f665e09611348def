//! Credential resolution
//!
//! Every tool call needs an API key and an account ID. Per-call arguments
//! win over transport defaults (environment variables for stdio, request
//! headers for HTTP). Resolution failures surface before any network call.

use crate::mcp::params::AuthParams;
use bluematador_client::BluematadorClient;
use rmcp::ErrorData as McpError;

pub const ENV_API_KEY: &str = "BLUEMATADOR_API_KEY";
pub const ENV_ACCOUNT_ID: &str = "BLUEMATADOR_ACCOUNT_ID";
pub const ENV_BASE_URL: &str = "BLUEMATADOR_BASE_URL";

const API_KEYS_PAGE: &str = "https://app.bluematador.com/ur/app#/account/apikeys";

/// Fallback credentials used when a tool call omits the auth arguments
#[derive(Debug, Clone, Default)]
pub struct CredentialDefaults {
    pub api_key: Option<String>,
    pub account_id: Option<String>,
    pub base_url: Option<String>,
}

impl CredentialDefaults {
    /// No defaults; every call must carry its own credentials
    pub const fn empty() -> Self {
        Self {
            api_key: None,
            account_id: None,
            base_url: None,
        }
    }

    /// Read defaults from the process environment
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(ENV_API_KEY).ok().filter(|v| !v.is_empty()),
            account_id: std::env::var(ENV_ACCOUNT_ID).ok().filter(|v| !v.is_empty()),
            base_url: std::env::var(ENV_BASE_URL).ok().filter(|v| !v.is_empty()),
        }
    }

    /// Overlay `self` on top of `fallback`; present fields in `self` win
    pub fn or(self, fallback: &CredentialDefaults) -> Self {
        Self {
            api_key: self.api_key.or_else(|| fallback.api_key.clone()),
            account_id: self.account_id.or_else(|| fallback.account_id.clone()),
            base_url: self.base_url.or_else(|| fallback.base_url.clone()),
        }
    }
}

/// Fully resolved credentials for one tool call
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub account_id: String,
    pub base_url: Option<String>,
}

impl Credentials {
    /// Build a fresh API client for this call. Clients are never shared
    /// across calls so concurrent callers can use different API keys.
    pub fn client(&self) -> BluematadorClient {
        BluematadorClient::new(self.api_key.clone(), self.base_url.as_deref())
    }
}

/// Resolve credentials for a call, argument values first
pub fn resolve(auth: &AuthParams, defaults: &CredentialDefaults) -> Result<Credentials, McpError> {
    let api_key = auth
        .api_key
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| defaults.api_key.clone())
        .ok_or_else(|| {
            McpError::invalid_request(
                format!("API key is required. Get your API key from {API_KEYS_PAGE}"),
                None,
            )
        })?;

    let account_id = auth
        .account_id
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| defaults.account_id.clone())
        .ok_or_else(|| {
            McpError::invalid_request(
                format!("Account ID is required. Get your account ID (UUID format) from {API_KEYS_PAGE}"),
                None,
            )
        })?;

    let base_url = auth
        .base_url
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| defaults.base_url.clone());

    Ok(Credentials {
        api_key,
        account_id,
        base_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth(api_key: Option<&str>, account_id: Option<&str>) -> AuthParams {
        AuthParams {
            api_key: api_key.map(String::from),
            account_id: account_id.map(String::from),
            base_url: None,
        }
    }

    #[test]
    fn arguments_win_over_defaults() {
        let defaults = CredentialDefaults {
            api_key: Some("env-key".to_string()),
            account_id: Some("env-account".to_string()),
            base_url: Some("https://env.example".to_string()),
        };
        let creds = resolve(&auth(Some("arg-key"), Some("arg-account")), &defaults).unwrap();
        assert_eq!(creds.api_key, "arg-key");
        assert_eq!(creds.account_id, "arg-account");
        assert_eq!(creds.base_url.as_deref(), Some("https://env.example"));
    }

    #[test]
    fn defaults_fill_missing_arguments() {
        let defaults = CredentialDefaults {
            api_key: Some("env-key".to_string()),
            account_id: Some("env-account".to_string()),
            base_url: None,
        };
        let creds = resolve(&auth(None, None), &defaults).unwrap();
        assert_eq!(creds.api_key, "env-key");
        assert_eq!(creds.account_id, "env-account");
    }

    #[test]
    fn missing_api_key_points_at_the_apikeys_page() {
        let err = resolve(&auth(None, Some("acct")), &CredentialDefaults::empty()).unwrap_err();
        assert!(err.message.contains("API key is required"));
        assert!(err.message.contains("account/apikeys"));
    }

    #[test]
    fn missing_account_id_is_reported_separately() {
        let err = resolve(&auth(Some("key"), None), &CredentialDefaults::empty()).unwrap_err();
        assert!(err.message.contains("Account ID is required"));
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let err = resolve(&auth(Some(""), Some("acct")), &CredentialDefaults::empty()).unwrap_err();
        assert!(err.message.contains("API key is required"));
    }

    #[test]
    fn overlay_prefers_present_fields() {
        let headers = CredentialDefaults {
            api_key: Some("header-key".to_string()),
            account_id: None,
            base_url: None,
        };
        let env = CredentialDefaults {
            api_key: Some("env-key".to_string()),
            account_id: Some("env-account".to_string()),
            base_url: None,
        };
        let merged = headers.or(&env);
        assert_eq!(merged.api_key.as_deref(), Some("header-key"));
        assert_eq!(merged.account_id.as_deref(), Some("env-account"));
    }
}
