//! HTTP server lifecycle management

use super::mcp::{mcp_handler, HttpState};
use crate::credentials::CredentialDefaults;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// HTTP server exposing the MCP endpoint and a health check
pub struct HttpServer {
    addr: SocketAddr,
    state: HttpState,
}

async fn health_handler() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "name": "bluematador-mcp-server",
        "version": env!("CARGO_PKG_VERSION"),
        "transport": "Streamable HTTP",
        "endpoint": "/mcp",
        "description": "Bluematador MCP Server - Remote Access via Streamable HTTP"
    }))
}

impl HttpServer {
    pub fn new(addr: SocketAddr, defaults: CredentialDefaults, require_header_auth: bool) -> Self {
        Self {
            addr,
            state: HttpState {
                defaults: Arc::new(defaults),
                require_header_auth,
            },
        }
    }

    /// Build the router: POST /mcp for JSON-RPC, GET /health for probes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/mcp", post(mcp_handler))
            .route("/health", get(health_handler))
            .with_state(self.state.clone())
    }

    /// Run the server until the shutdown future resolves
    pub async fn run_until<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind HTTP server on {}: {}", self.addr, e))?;

        info!("🚀 Bluematador MCP server listening on {}", self.addr);
        info!("📡 JSON-RPC endpoint: http://{}/mcp", self.addr);
        info!("❤️  Health check: http://{}/health", self.addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_payload_names_the_mcp_endpoint() {
        let body = health_handler().await.0;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["name"], "bluematador-mcp-server");
        assert_eq!(body["endpoint"], "/mcp");
        assert_eq!(body["transport"], "Streamable HTTP");
    }
}
