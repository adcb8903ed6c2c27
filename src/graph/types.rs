//! Graph model type definitions
//!
//! This module defines the core types for workflow graph snapshots:
//! typed nodes, typed edges, and the full graph definition that the
//! classifier and compiler read.

use serde::{Deserialize, Serialize};

/// Name the source sentinel carries in generated artifacts
pub const START_SENTINEL: &str = "__start__";
/// Name the end sentinel carries in generated artifacts
pub const END_SENTINEL: &str = "__end__";

/// Kind of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Unique entry marker, surfaced as `__start__`
    Source,
    /// Unique exit marker, surfaced as `__end__`
    End,
    /// User-defined work unit
    Custom,
}

/// A node in the workflow graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable unique identifier, assigned at creation, never reused
    pub id: String,
    /// Node kind
    pub kind: NodeKind,
    /// Display label; fixed to `source`/`end` for the sentinels
    pub label: String,
}

impl Node {
    /// Create the source sentinel node
    pub fn source(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Source,
            label: "source".to_string(),
        }
    }

    /// Create the end sentinel node
    pub fn end(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::End,
            label: "end".to_string(),
        }
    }

    /// Create a custom node with the given label
    pub fn custom(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Custom,
            label: label.into(),
        }
    }

    /// Name this node carries in generated artifacts: the sentinel text
    /// for source/end, the normalized label for custom nodes.
    pub fn generated_name(&self) -> String {
        match self.kind {
            NodeKind::Source => START_SENTINEL.to_string(),
            NodeKind::End => END_SENTINEL.to_string(),
            NodeKind::Custom => normalize_label(&self.label),
        }
    }
}

/// Replace whitespace runs in a label with single underscores so it can
/// be used verbatim as a function/state-key identifier.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Execution semantics recorded on an edge at creation/retyping time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionType {
    /// Single deterministic transition
    #[default]
    Normal,
    /// Runtime branch selection among siblings
    Conditional,
    /// Concurrent fan-out to siblings
    Parallel,
    /// Self-referential transition (`source == target`)
    Cyclic,
}

/// An edge in the workflow graph.
///
/// Edges reference nodes by id; they never own them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Stable unique identifier (`edge-N`, monotonically increasing)
    pub id: String,
    /// Source node id
    pub source: String,
    /// Target node id
    pub target: String,
    /// Execution semantics chosen at creation/retyping time
    #[serde(default)]
    pub execution: ExecutionType,
    /// User-supplied decision-function name; overrides the generated
    /// default for the whole branch-group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Distinguishes independent branch-groups sharing one source node
    #[serde(default)]
    pub group: u32,
}

impl Edge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// A full graph snapshot.
///
/// The compiler treats this as immutable: it only reads nodes and edges
/// and produces a new derived spec value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDef {
    /// Optional display name of the drawing; the compiled spec always
    /// uses the fixed aggregate name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl GraphDef {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// The unique source node, if present
    pub fn source_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::Source)
    }

    /// The unique end node, if present
    pub fn end_node(&self) -> Option<&Node> {
        self.nodes.iter().find(|n| n.kind == NodeKind::End)
    }

    /// All custom nodes, in insertion order
    pub fn custom_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind == NodeKind::Custom)
    }

    /// Outgoing edges of a node, in insertion order
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}
