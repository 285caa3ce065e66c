//! Query plan models.
//!
//! [`QueryPlan`] mirrors the plan returned by Spanner when a statement is
//! analyzed in PLAN mode. [`PlanRow`] is the linearized, display-ready form
//! consumed by the plan formatter.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;

/// Execution plan of a statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    /// Nodes in pre-order; `plan_nodes[i].index == i`.
    #[serde(default)]
    pub plan_nodes: Vec<PlanNode>,
}

impl QueryPlan {
    pub fn node(&self, index: u32) -> Option<&PlanNode> {
        self.plan_nodes.get(index as usize)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanNodeKind {
    #[default]
    KindUnspecified,
    /// Produces rows (scans, joins, unions, ...)
    Relational,
    /// Produces a single value (expressions, function calls, ...)
    Scalar,
}

/// One operator or expression of a [`QueryPlan`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanNode {
    pub index: u32,
    #[serde(default)]
    pub kind: PlanNodeKind,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_links: Vec<ChildLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_representation: Option<ShortRepresentation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_stats: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildLink {
    pub child_index: u32,
    /// Role of the child, e.g. "Input", "Map" or "Split Range". May be empty.
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub link_type: String,
    /// Variable the parent uses to refer to the child's output. May be empty.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub variable: String,
}

/// Condensed description of a scalar node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortRepresentation {
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub subqueries: BTreeMap<String, u32>,
}

/// A child link with the referenced child already looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedChildLink {
    /// Empty when the child's output is not bound to a variable.
    pub variable_name: String,
    pub child_description: String,
}

impl ResolvedChildLink {
    pub fn new(variable_name: impl Into<String>, child_description: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            child_description: child_description.into(),
        }
    }

    /// `$var=description`, or just the description when unbound.
    pub fn describe(&self) -> String {
        if self.variable_name.is_empty() {
            self.child_description.clone()
        } else {
            format!("${}={}", self.variable_name, self.child_description)
        }
    }
}

/// One display-ready line of a linearized plan tree.
///
/// Rows are produced by a [`PlanRowSource`](crate::spanner::PlanRowSource) in
/// pre-order, with the tree indentation already applied to `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRow {
    /// Plan node index; unique within a plan.
    pub id: u32,
    /// Decorated label for the ID column, e.g. `*3` for a node with predicates.
    /// Falls back to the bare `id` when unset.
    pub display_id: Option<String>,
    pub text: String,
    pub predicates: Vec<String>,
    /// Child links grouped by link type. The empty key holds untyped links.
    pub child_links: BTreeMap<String, Vec<ResolvedChildLink>>,
}

impl PlanRow {
    pub fn new(id: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_display_id(mut self, display_id: impl Into<String>) -> Self {
        self.display_id = Some(display_id.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<String>) -> Self {
        self.predicates.push(predicate.into());
        self
    }

    pub fn with_child_link(mut self, link_type: impl Into<String>, link: ResolvedChildLink) -> Self {
        self.child_links
            .entry(link_type.into())
            .or_default()
            .push(link);
        self
    }

    /// Label shown in the ID column of the plan table.
    pub fn format_id(&self) -> String {
        match &self.display_id {
            Some(label) => label.clone(),
            None => self.id.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
