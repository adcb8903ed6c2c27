// SPDX-License-Identifier: MIT

//! Graph builder - programmatic graph construction
//!
//! Models the interactive editor's creation rules: monotonic `node-N` /
//! `edge-N` identifier assignment, `Node N` default labels, and the
//! sentinel pair seeded into every new graph.

use super::types::{Edge, ExecutionType, GraphDef, Node, NodeKind};

/// Builds a [`GraphDef`] snapshot incrementally.
///
/// Identifiers are never reused, even after removals.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node: u32,
    next_edge: u32,
}

impl GraphBuilder {
    /// Create a builder seeded with the source and end sentinel nodes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: vec![Node::source("source"), Node::end("end")],
            edges: Vec::new(),
            next_node: 0,
            next_edge: 0,
        }
    }

    /// Add a custom node with the default `Node N` label, returning its id
    pub fn add_node(&mut self) -> String {
        self.next_node += 1;
        let id = format!("node-{}", self.next_node);
        let label = format!("Node {}", self.next_node);
        self.nodes.push(Node::custom(id.clone(), label));
        id
    }

    /// Add a custom node with an explicit label, returning its id
    pub fn add_labeled_node(&mut self, label: impl Into<String>) -> String {
        let id = self.add_node();
        self.relabel_node(&id, label);
        id
    }

    /// Rename a custom node. Sentinel labels are fixed and ignored here.
    pub fn relabel_node(&mut self, id: &str, label: impl Into<String>) {
        if let Some(node) = self
            .nodes
            .iter_mut()
            .find(|n| n.id == id && n.kind == NodeKind::Custom)
        {
            node.label = label.into();
        }
    }

    /// Connect two nodes with a normal edge (cyclic when self-referential),
    /// returning the edge id
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        let execution = if source == target {
            ExecutionType::Cyclic
        } else {
            ExecutionType::Normal
        };
        self.push_edge(source, target, execution, None, 0)
    }

    /// Connect two nodes with a conditional edge in the given branch-group
    pub fn connect_conditional(&mut self, source: &str, target: &str, group: u32) -> String {
        self.push_edge(source, target, ExecutionType::Conditional, None, group)
    }

    /// Connect two nodes with a parallel edge in the given branch-group
    pub fn connect_parallel(&mut self, source: &str, target: &str, group: u32) -> String {
        self.push_edge(source, target, ExecutionType::Parallel, None, group)
    }

    /// Set the user label on an edge (names the decision function for
    /// the whole branch-group)
    pub fn label_edge(&mut self, id: &str, label: impl Into<String>) {
        if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
            edge.label = Some(label.into());
        }
    }

    /// Change the stored execution type of an edge
    pub fn retype_edge(&mut self, id: &str, execution: ExecutionType) {
        if let Some(edge) = self.edges.iter_mut().find(|e| e.id == id) {
            edge.execution = execution;
        }
    }

    fn push_edge(
        &mut self,
        source: &str,
        target: &str,
        execution: ExecutionType,
        label: Option<String>,
        group: u32,
    ) -> String {
        self.next_edge += 1;
        let id = format!("edge-{}", self.next_edge);
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            execution,
            label,
            group,
        });
        id
    }

    /// Finish construction, producing the immutable snapshot
    pub fn build(self) -> GraphDef {
        GraphDef {
            name: self.name,
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_seeds_sentinels() {
        let graph = GraphBuilder::new("demo").build();
        assert_eq!(graph.nodes.len(), 2);
        assert!(graph.source_node().is_some());
        assert!(graph.end_node().is_some());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_monotonic_ids_and_default_labels() {
        let mut builder = GraphBuilder::new("demo");
        let a = builder.add_node();
        let b = builder.add_node();
        assert_eq!(a, "node-1");
        assert_eq!(b, "node-2");

        let e1 = builder.connect("source", &a);
        let e2 = builder.connect(&a, &b);
        assert_eq!(e1, "edge-1");
        assert_eq!(e2, "edge-2");

        let graph = builder.build();
        assert_eq!(graph.node("node-1").unwrap().label, "Node 1");
        assert_eq!(graph.node("node-2").unwrap().label, "Node 2");
    }

    #[test]
    fn test_self_loop_is_cyclic() {
        let mut builder = GraphBuilder::new("demo");
        let a = builder.add_node();
        builder.connect(&a, &a);
        let graph = builder.build();
        assert_eq!(graph.edges[0].execution, ExecutionType::Cyclic);
    }

    #[test]
    fn test_relabel_ignores_sentinels() {
        let mut builder = GraphBuilder::new("demo");
        builder.relabel_node("source", "not allowed");
        let graph = builder.build();
        assert_eq!(graph.source_node().unwrap().label, "source");
    }

    #[test]
    fn test_label_and_retype_edge() {
        let mut builder = GraphBuilder::new("demo");
        let a = builder.add_node();
        let b = builder.add_node();
        let e = builder.connect(&a, &b);
        builder.label_edge(&e, "route");
        builder.retype_edge(&e, ExecutionType::Conditional);
        let graph = builder.build();
        assert_eq!(graph.edges[0].label.as_deref(), Some("route"));
        assert_eq!(graph.edges[0].execution, ExecutionType::Conditional);
    }
}
