//! Query plan tool.
//!
//! This module implements the `plan` MCP tool. The statement is analyzed in
//! PLAN mode (never executed) and the resulting plan is returned twice: as
//! machine-readable JSON and as a rendered operator tree.

use crate::error::{SpannerError, SpannerResult};
use crate::models::{DatabasePath, QueryPlan};
use crate::spanner::{PlanRowSource, SpannerClient};
use crate::tools::format::format_plan;
use crate::tools::timeout::with_timeout;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Input for the plan tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlanInput {
    /// query text of SQL or GQL
    pub query: String,
    /// Google Cloud project
    pub project: String,
    /// Spanner instance id
    pub instance: String,
    /// Spanner database id
    pub database: String,
}

/// Output from the plan tool.
#[derive(Debug, Clone)]
pub struct PlanOutput {
    pub plan: QueryPlan,
    /// Operator table and predicate list
    pub rendered: String,
}

impl PlanOutput {
    /// Text contents returned to the caller: plan JSON first, rendered plan second.
    pub fn into_contents(self) -> SpannerResult<Vec<String>> {
        Ok(vec![serde_json::to_string_pretty(&self.plan)?, self.rendered])
    }
}

/// Handler for the plan tool.
pub struct PlanToolHandler {
    client: Arc<dyn SpannerClient>,
    row_source: Arc<dyn PlanRowSource>,
    timeout: Duration,
}

impl PlanToolHandler {
    /// Create a new plan tool handler.
    pub fn new(
        client: Arc<dyn SpannerClient>,
        row_source: Arc<dyn PlanRowSource>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            row_source,
            timeout,
        }
    }

    /// Handle the plan tool call.
    pub async fn plan(&self, input: PlanInput) -> SpannerResult<PlanOutput> {
        let start = Instant::now();

        let query = input.query.trim();
        if query.is_empty() {
            return Err(SpannerError::invalid_input("query is required"));
        }
        let database = DatabasePath::new(&input.project, &input.instance, &input.database)?;

        info!(database = %database, "Analyzing query");
        let plan = with_timeout(
            "AnalyzeQuery",
            self.timeout,
            self.client.analyze_query(&database, query),
        )
        .await?;

        let rows = self.row_source.process_plan(&plan)?;
        let rendered = format_plan(&rows);

        debug!(
            nodes = plan.plan_nodes.len(),
            rows = rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rendered query plan"
        );

        Ok(PlanOutput { plan, rendered })
    }
}
