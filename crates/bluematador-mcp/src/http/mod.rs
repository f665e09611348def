//! HTTP JSON-RPC transport
//!
//! Serves the same tool surface as the stdio transport over POST /mcp, plus
//! a static /health endpoint. Stateless: every request gets its own server
//! instance so JSON-RPC request IDs from different clients never collide.

pub mod mcp;
pub mod server;

pub use mcp::{mcp_handler, HttpState};
pub use server::HttpServer;
