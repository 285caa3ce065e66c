//! MCP tool implementations.
//!
//! This module contains all Spanner tool handlers:
//! - `plan`: Analyze a query and render its execution plan
//! - `get_ddl`: Fetch the database schema
//! - `update_ddl`: Apply schema changes
//! - `format`: Plain-text rendering of plan rows

pub mod ddl;
pub mod format;
pub mod plan;
pub mod timeout;

pub use ddl::{DdlToolHandler, GetDdlInput, GetDdlOutput, UpdateDdlInput, UpdateDdlOutput};
pub use format::format_plan;
pub use plan::{PlanInput, PlanOutput, PlanToolHandler};
