//! HTTP server adapters
//!
//! This module provides adapters that translate between HTTP frameworks
//! and the HTTP-agnostic API layer.
//!
//! Currently supported:
//! - `tiny_http` - Lightweight HTTP server started by `herbtrace serve`

#[cfg(feature = "ui")]
pub mod tiny_http;
