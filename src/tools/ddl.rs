//! Schema (DDL) tools.
//!
//! This module implements the `get_ddl` and `update_ddl` MCP tools.

use crate::error::{SpannerError, SpannerResult};
use crate::models::{DatabaseDdl, DatabasePath, UpdateDatabaseDdlMetadata};
use crate::spanner::SpannerClient;
use crate::tools::timeout::with_timeout;
use prost::Message;
use prost_types::FileDescriptorSet;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Input for the get_ddl tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDdlInput {
    /// Google Cloud project
    pub project: String,
    /// Spanner instance id
    pub instance: String,
    /// Spanner database id
    pub database: String,
    /// Enable only if proto_descriptors is needed. Default: false
    #[serde(default)]
    pub include_proto_descriptors: bool,
}

/// Output from the get_ddl tool.
#[derive(Debug, Clone)]
pub struct GetDdlOutput {
    /// DDL response; descriptors are cleared unless requested
    pub ddl: DatabaseDdl,
    /// Decoded proto descriptors, only when requested
    pub descriptors: Option<FileDescriptorSet>,
}

impl GetDdlOutput {
    /// Text contents returned to the caller: the whole response, then the
    /// decoded descriptors when they were requested.
    pub fn into_contents(self) -> SpannerResult<Vec<String>> {
        let mut contents = vec![serde_json::to_string_pretty(&self.ddl)?];
        if let Some(descriptors) = self.descriptors {
            contents.push(format!("{:#?}", descriptors));
        }
        Ok(contents)
    }
}

/// Input for the update_ddl tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateDdlInput {
    /// Google Cloud project
    pub project: String,
    /// Spanner instance id
    pub instance: String,
    /// Spanner database id
    pub database: String,
    /// DDL statements
    pub statements: Vec<String>,
}

/// Output from the update_ddl tool.
#[derive(Debug, Clone)]
pub struct UpdateDdlOutput {
    pub metadata: UpdateDatabaseDdlMetadata,
}

impl UpdateDdlOutput {
    pub fn into_contents(self) -> SpannerResult<Vec<String>> {
        Ok(vec![serde_json::to_string_pretty(&self.metadata)?])
    }
}

/// Handler for the DDL tools.
pub struct DdlToolHandler {
    client: Arc<dyn SpannerClient>,
    request_timeout: Duration,
    ddl_timeout: Duration,
}

impl DdlToolHandler {
    /// Create a new DDL tool handler.
    ///
    /// `request_timeout` bounds DDL fetches; `ddl_timeout` bounds waiting for
    /// a schema update to complete.
    pub fn new(
        client: Arc<dyn SpannerClient>,
        request_timeout: Duration,
        ddl_timeout: Duration,
    ) -> Self {
        Self {
            client,
            request_timeout,
            ddl_timeout,
        }
    }

    /// Handle the get_ddl tool call.
    pub async fn get_ddl(&self, input: GetDdlInput) -> SpannerResult<GetDdlOutput> {
        let database = DatabasePath::new(&input.project, &input.instance, &input.database)?;

        info!(database = %database, "Fetching database DDL");
        let mut ddl = with_timeout(
            "GetDatabaseDdl",
            self.request_timeout,
            self.client.get_database_ddl(&database),
        )
        .await?;

        // Descriptors are validated even when the caller does not want them.
        let descriptors = FileDescriptorSet::decode(ddl.proto_descriptors.as_slice())?;
        debug!(
            statements = ddl.statements.len(),
            proto_files = descriptors.file.len(),
            "Fetched database DDL"
        );

        let descriptors = if input.include_proto_descriptors {
            Some(descriptors)
        } else {
            ddl.proto_descriptors.clear();
            None
        };

        Ok(GetDdlOutput { ddl, descriptors })
    }

    /// Handle the update_ddl tool call.
    pub async fn update_ddl(&self, input: UpdateDdlInput) -> SpannerResult<UpdateDdlOutput> {
        let database = DatabasePath::new(&input.project, &input.instance, &input.database)?;

        if input.statements.is_empty() {
            return Err(SpannerError::invalid_input(
                "statements must contain at least one DDL statement",
            ));
        }
        if let Some(index) = input.statements.iter().position(|s| s.trim().is_empty()) {
            return Err(SpannerError::invalid_input(format!(
                "statements[{}] is empty",
                index
            )));
        }

        info!(
            database = %database,
            statements = input.statements.len(),
            "Updating database DDL"
        );
        let metadata = with_timeout(
            "UpdateDatabaseDdl",
            self.ddl_timeout,
            self.client.update_database_ddl(&database, &input.statements),
        )
        .await?;
        info!(
            database = %database,
            committed = metadata.commit_timestamps.len(),
            "Database DDL updated"
        );

        Ok(UpdateDdlOutput { metadata })
    }
}
