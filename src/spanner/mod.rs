//! Seams to the Spanner service.
//!
//! Network access, authentication and plan-graph linearization are provided by
//! the embedding application through the [`SpannerClient`] and
//! [`PlanRowSource`] traits. The tool handlers only depend on these traits.

use crate::error::SpannerResult;
use crate::models::{
    DatabaseDdl, DatabasePath, PlanRow, QueryPlan, UpdateDatabaseDdlMetadata,
};
use futures_util::future::BoxFuture;

/// Data and admin API calls used by the tools.
///
/// Implementations are shared between concurrent tool calls.
pub trait SpannerClient: Send + Sync {
    /// Analyze `query` in PLAN mode and return its execution plan.
    ///
    /// The statement is not executed.
    fn analyze_query<'a>(
        &'a self,
        database: &'a DatabasePath,
        query: &'a str,
    ) -> BoxFuture<'a, SpannerResult<QueryPlan>>;

    /// Fetch the schema of `database`.
    fn get_database_ddl<'a>(
        &'a self,
        database: &'a DatabasePath,
    ) -> BoxFuture<'a, SpannerResult<DatabaseDdl>>;

    /// Apply `statements` and resolve once the schema change has completed.
    fn update_database_ddl<'a>(
        &'a self,
        database: &'a DatabasePath,
        statements: &'a [String],
    ) -> BoxFuture<'a, SpannerResult<UpdateDatabaseDdlMetadata>>;
}

/// Turns a raw plan graph into display-ready rows.
pub trait PlanRowSource: Send + Sync {
    /// Rows in pre-order (parent before its descendants), with child links
    /// resolved and tree indentation applied to each row's text.
    fn process_plan(&self, plan: &QueryPlan) -> SpannerResult<Vec<PlanRow>>;
}
