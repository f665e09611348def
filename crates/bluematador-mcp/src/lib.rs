//! MCP surface for the Blue Matador monitoring API
//!
//! Exposes the REST API as MCP tools over two transports:
//! - stdio, via the rmcp service machinery (`mcp::BluematadorServer`)
//! - HTTP JSON-RPC, via an axum handler (`http`)
//!
//! Credentials can arrive per tool call, from the environment, or (for the
//! HTTP transport) from request headers. See [`credentials`].

pub mod credentials;
pub mod http;
pub mod mcp;
pub mod mute;
