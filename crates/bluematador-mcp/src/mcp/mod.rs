//! MCP server and tool surface

pub mod diagnostics;
pub mod error;
pub mod format;
pub mod params;
pub mod server;

pub use server::BluematadorServer;
