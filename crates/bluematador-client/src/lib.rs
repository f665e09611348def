//! Typed client for the Blue Matador monitoring REST API
//!
//! This crate owns the HTTP surface: endpoint paths, authentication headers,
//! request/response shapes, and error normalization. Nothing above it needs
//! to know URLs or status codes beyond what [`ApiError`] exposes.

mod client;
mod error;
mod types;

pub use client::{BluematadorClient, NotificationKind, DEFAULT_BASE_URL};
pub use error::{ApiError, TransportKind};
pub use types::*;
