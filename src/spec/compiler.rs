// SPDX-License-Identifier: MIT

//! Spec compiler - graph snapshot to canonical specification
//!
//! `compile` walks a classified graph snapshot and emits the canonical
//! intermediate representation. It never mutates the graph; the same
//! snapshot compiles to the same spec value every time.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::GraphError;
use crate::graph::classifier::{classify, BranchKind};
use crate::graph::types::{normalize_label, GraphDef, Node, NodeKind, END_SENTINEL, START_SENTINEL};
use crate::graph::EdgeClass;

use super::types::{Spec, SpecEdge, SPEC_NAME};

/// Compile a graph snapshot into the canonical spec.
///
/// Validation failures are returned as [`GraphError`] and no partial
/// spec is produced. Emission order is fixed for reproducible, diffable
/// output: direct edges from `__start__`, direct edges into `__end__`,
/// remaining direct edges, conditional group records, parallel group
/// records; insertion order within each bucket.
pub fn compile(graph: &GraphDef) -> Result<Spec, GraphError> {
    let (source, end) = validate_sentinels(graph)?;

    let nodes_by_id: HashMap<&str, &Node> =
        graph.nodes.iter().map(|n| (n.id.as_str(), n)).collect();

    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            if !nodes_by_id.contains_key(endpoint.as_str()) {
                return Err(GraphError::UnknownNode {
                    edge: edge.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
    }

    validate_labels(graph)?;
    validate_reachability(graph, &source.id, &end.id)?;

    let classified = classify(graph);
    let name_of = |id: &str| nodes_by_id[id].generated_name();

    // Node-name set: custom endpoints in edge insertion order, deduplicated.
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    for edge in &graph.edges {
        for endpoint in [&edge.source, &edge.target] {
            let node = nodes_by_id[endpoint.as_str()];
            if node.kind == NodeKind::Custom {
                let name = normalize_label(&node.label);
                if seen.insert(name.clone()) {
                    names.push(name);
                }
            }
        }
    }

    let mut from_start = Vec::new();
    let mut into_end = Vec::new();
    let mut remaining = Vec::new();
    for (idx, edge) in graph.edges.iter().enumerate() {
        match classified.classes[idx] {
            EdgeClass::Normal | EdgeClass::Cyclic => {
                let from = name_of(&edge.source);
                let to = name_of(&edge.target);
                let bucket = if from == START_SENTINEL {
                    &mut from_start
                } else if to == END_SENTINEL {
                    &mut into_end
                } else {
                    &mut remaining
                };
                bucket.push(SpecEdge::Direct { from, to });
            }
            EdgeClass::Branch { .. } => {}
        }
    }

    let mut edges = from_start;
    edges.append(&mut into_end);
    edges.append(&mut remaining);

    for group in classified.groups_of(BranchKind::Conditional) {
        edges.push(SpecEdge::Conditional {
            from: name_of(&group.source),
            condition: group.label.clone(),
            paths: group
                .edges
                .iter()
                .map(|&i| name_of(&graph.edges[i].target))
                .collect(),
        });
    }
    for group in classified.groups_of(BranchKind::Parallel) {
        edges.push(SpecEdge::Parallel {
            from: name_of(&group.source),
            parallel: group
                .edges
                .iter()
                .map(|&i| name_of(&graph.edges[i].target))
                .collect(),
        });
    }

    Ok(Spec {
        name: SPEC_NAME.to_string(),
        nodes: names,
        edges,
    })
}

fn validate_sentinels(graph: &GraphDef) -> Result<(&Node, &Node), GraphError> {
    let sources: Vec<&Node> = graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::Source)
        .collect();
    let ends: Vec<&Node> = graph
        .nodes
        .iter()
        .filter(|n| n.kind == NodeKind::End)
        .collect();
    let source = match sources.as_slice() {
        [] => return Err(GraphError::MissingSource),
        [source] => *source,
        many => return Err(GraphError::MultipleSources(many.len())),
    };
    let end = match ends.as_slice() {
        [] => return Err(GraphError::MissingEnd),
        [end] => *end,
        many => return Err(GraphError::MultipleEnds(many.len())),
    };
    Ok((source, end))
}

/// Two distinct custom nodes resolving to one normalized label would be
/// silently collapsed into a single spec entry; fail fast instead.
fn validate_labels(graph: &GraphDef) -> Result<(), GraphError> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for node in graph.custom_nodes() {
        let label = normalize_label(&node.label);
        if let Some(first) = seen.get(label.as_str()) {
            return Err(GraphError::AmbiguousLabel {
                label,
                first: (*first).to_string(),
                second: node.id.clone(),
            });
        }
        seen.insert(label, node.id.as_str());
    }
    Ok(())
}

fn validate_reachability(graph: &GraphDef, start: &str, end: &str) -> Result<(), GraphError> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        if id == end {
            return Ok(());
        }
        if !visited.insert(id) {
            continue;
        }
        if let Some(targets) = adjacency.get(id) {
            queue.extend(targets.iter().copied());
        }
    }
    Err(GraphError::Unreachable)
}
