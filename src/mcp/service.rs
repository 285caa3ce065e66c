//! MCP service implementation using rmcp.
//!
//! This module defines the SpannerService struct with all Spanner tools
//! exposed via the MCP protocol using the rmcp framework's macros.

use crate::config::Config;
use crate::error::SpannerResult;
use crate::spanner::{PlanRowSource, SpannerClient};
use crate::tools::ddl::{
    DdlToolHandler, GetDdlInput, GetDdlOutput, UpdateDdlInput, UpdateDdlOutput,
};
use crate::tools::plan::{PlanInput, PlanOutput, PlanToolHandler};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
};
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub struct SpannerService {
    plan_handler: Arc<PlanToolHandler>,
    ddl_handler: Arc<DdlToolHandler>,
    /// Tool router for MCP tool dispatch (auto-generated)
    tool_router: ToolRouter<Self>,
}

impl SpannerService {
    /// Create a new SpannerService instance.
    ///
    /// # Arguments
    ///
    /// * `client` - Spanner data and admin API access shared by all tools
    /// * `row_source` - Linearizes plan graphs for the rendered plan output
    /// * `config` - Supplies the request and DDL timeouts
    pub fn new(
        client: Arc<dyn SpannerClient>,
        row_source: Arc<dyn PlanRowSource>,
        config: &Config,
    ) -> Self {
        Self {
            plan_handler: Arc::new(PlanToolHandler::new(
                client.clone(),
                row_source,
                config.request_timeout_duration(),
            )),
            ddl_handler: Arc::new(DdlToolHandler::new(
                client,
                config.request_timeout_duration(),
                config.ddl_timeout_duration(),
            )),
            tool_router: Self::tool_router(),
        }
    }
}

/// Wrap handler output as text contents, or log and convert the error.
fn text_result(
    tool: &str,
    contents: SpannerResult<Vec<String>>,
) -> Result<CallToolResult, McpError> {
    match contents {
        Ok(contents) => Ok(CallToolResult::success(
            contents.into_iter().map(Content::text).collect(),
        )),
        Err(e) => {
            warn!(tool, error = %e, "Tool call failed");
            Err(e.into())
        }
    }
}

#[tool_router]
impl SpannerService {
    #[tool(
        description = "Get execution plan for the query. The first content is machine-readable JSON of the QueryPlan message. The second content is human-readable rendered query plan."
    )]
    async fn plan(
        &self,
        Parameters(input): Parameters<PlanInput>,
    ) -> Result<CallToolResult, McpError> {
        let contents = self
            .plan_handler
            .plan(input)
            .await
            .and_then(PlanOutput::into_contents);
        text_result("plan", contents)
    }

    #[tool(
        description = "Get DDL of the database. The first content is the whole response, and the second content is unmarshalled proto_descriptors (optional)."
    )]
    async fn get_ddl(
        &self,
        Parameters(input): Parameters<GetDdlInput>,
    ) -> Result<CallToolResult, McpError> {
        let contents = self
            .ddl_handler
            .get_ddl(input)
            .await
            .and_then(GetDdlOutput::into_contents);
        text_result("get_ddl", contents)
    }

    #[tool(description = "Update DDL of the database")]
    async fn update_ddl(
        &self,
        Parameters(input): Parameters<UpdateDdlInput>,
    ) -> Result<CallToolResult, McpError> {
        let contents = self
            .ddl_handler
            .update_ddl(input)
            .await
            .and_then(UpdateDdlOutput::into_contents);
        text_result("update_ddl", contents)
    }
}

#[tool_handler]
impl ServerHandler for SpannerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "spanner-mcp-server".to_owned(),
                title: Some("Spanner MCP".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Cloud Spanner tools for inspecting query plans and managing schemas.\n\
                \n\
                Every tool takes `project`, `instance` and `database` to identify the database.\n\
                \n\
                ## Tools\n\
                - `plan`: Analyze a SQL or GQL query without executing it. Returns the plan as JSON \
                  and as a rendered operator tree with predicates listed by operator ID.\n\
                - `get_ddl`: Return the database schema. Set `include_proto_descriptors` only when \
                  proto bundle definitions are needed.\n\
                - `update_ddl`: Apply DDL statements and wait for the schema change to complete. \
                  Long-running changes (e.g. index backfills) may take minutes."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DatabaseDdl, DatabasePath, PlanRow, QueryPlan, UpdateDatabaseDdlMetadata,
    };
    use futures_util::future::BoxFuture;

    struct NoopClient;

    impl SpannerClient for NoopClient {
        fn analyze_query<'a>(
            &'a self,
            _database: &'a DatabasePath,
            _query: &'a str,
        ) -> BoxFuture<'a, SpannerResult<QueryPlan>> {
            Box::pin(async { Ok(QueryPlan::default()) })
        }

        fn get_database_ddl<'a>(
            &'a self,
            _database: &'a DatabasePath,
        ) -> BoxFuture<'a, SpannerResult<DatabaseDdl>> {
            Box::pin(async { Ok(DatabaseDdl::default()) })
        }

        fn update_database_ddl<'a>(
            &'a self,
            _database: &'a DatabasePath,
            _statements: &'a [String],
        ) -> BoxFuture<'a, SpannerResult<UpdateDatabaseDdlMetadata>> {
            Box::pin(async { Ok(UpdateDatabaseDdlMetadata::default()) })
        }
    }

    struct NoRows;

    impl PlanRowSource for NoRows {
        fn process_plan(&self, _plan: &QueryPlan) -> SpannerResult<Vec<PlanRow>> {
            Ok(Vec::new())
        }
    }

    fn create_test_service() -> SpannerService {
        SpannerService::new(Arc::new(NoopClient), Arc::new(NoRows), &Config::default())
    }

    #[test]
    fn test_server_info() {
        let service = create_test_service();
        let info = service.get_info();
        assert_eq!(info.server_info.name, "spanner-mcp-server");
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("update_ddl"));
    }

    #[test]
    fn test_tools_registered() {
        let service = create_test_service();
        let mut names: Vec<String> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["get_ddl", "plan", "update_ddl"]);
    }

    #[tokio::test]
    async fn test_plan_tool_succeeds() {
        let service = create_test_service();
        let input = PlanInput {
            query: "SELECT 1".to_string(),
            project: "p".to_string(),
            instance: "i".to_string(),
            database: "d".to_string(),
        };
        let result = service.plan(Parameters(input)).await.unwrap();
        assert_ne!(result.is_error, Some(true));
    }

    #[tokio::test]
    async fn test_invalid_input_maps_to_invalid_params() {
        let service = create_test_service();
        let input = UpdateDdlInput {
            project: "p".to_string(),
            instance: "i".to_string(),
            database: "d".to_string(),
            statements: Vec::new(),
        };
        let err = service.update_ddl(Parameters(input)).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
    }
}
