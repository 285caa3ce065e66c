//! Data models for the Spanner MCP Server.
//!
//! This module re-exports all model types used throughout the application.

pub mod database;
pub mod ddl;
pub mod plan;

// Re-export commonly used types
pub use database::DatabasePath;
pub use ddl::{DatabaseDdl, OperationProgress, UpdateDatabaseDdlMetadata};
pub use plan::{
    ChildLink, PlanNode, PlanNodeKind, PlanRow, QueryPlan, ResolvedChildLink, ShortRepresentation,
};
