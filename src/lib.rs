//! Spanner MCP Server Library
//!
//! This library provides MCP (Model Context Protocol) tools for AI assistants
//! to inspect Cloud Spanner query plans and to read or change database schemas.
//! Access to Spanner itself is supplied by the embedding application through
//! the [`spanner::SpannerClient`] and [`spanner::PlanRowSource`] traits.

pub mod config;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod models;
pub mod spanner;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::SpannerError;
pub use mcp::SpannerService;
