// SPDX-License-Identifier: MIT

//! Derived edge classification
//!
//! Classification is a view recomputed in full from the current edge
//! set on every call: it depends only on the edges' source/target,
//! stored execution type, user label, and group index, never on the
//! order mutations happened in. Calling it twice on the same snapshot
//! yields the same result.

use std::collections::HashMap;

use super::types::{normalize_label, ExecutionType, GraphDef};

/// Branch semantics of a group of sibling edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchKind {
    /// Runtime selection of one sibling target
    Conditional,
    /// Concurrent fan-out to every sibling target
    Parallel,
}

/// A set of sibling edges leaving one source node, compiled to a single
/// decision function and a single conditional/parallel spec record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchGroup {
    /// Source node id shared by every sibling
    pub source: String,
    pub kind: BranchKind,
    /// Decision-function name: the first user-supplied sibling label,
    /// or the generated `conditional_edge_N` / `parallel_execution_N`
    pub label: String,
    /// Indexes into `GraphDef::edges`, in sibling insertion order
    pub edges: Vec<usize>,
}

/// Classification of a single edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeClass {
    /// Single deterministic transition
    Normal,
    /// Self-loop with no fan-out
    Cyclic,
    /// Member of the branch-group at the given index
    Branch { group: usize },
}

/// Full classification of a graph snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// One class per edge, parallel to `GraphDef::edges`
    pub classes: Vec<EdgeClass>,
    /// Branch-groups in discovery order (edge insertion order)
    pub groups: Vec<BranchGroup>,
}

impl Classification {
    /// Groups of one kind, in discovery order
    pub fn groups_of(&self, kind: BranchKind) -> impl Iterator<Item = &BranchGroup> {
        self.groups.iter().filter(move |g| g.kind == kind)
    }
}

struct PendingGroup {
    source: String,
    kind: BranchKind,
    ordinal: u32,
    user_label: Option<String>,
    edges: Vec<usize>,
}

/// Classify every edge of the graph and compute branch-groups.
///
/// A source with a single outgoing edge yields `Normal` (`Cyclic` for a
/// self-loop; a lone self-loop is never demoted to `Normal`). A source
/// with more than one outgoing edge puts every outgoing edge into a
/// branch-group: edges stored as normal or cyclic are promoted into the
/// conditional group carrying their group index, since branching on a
/// condition is the default when no concurrent-vs-branch choice was
/// recorded.
pub fn classify(graph: &GraphDef) -> Classification {
    let mut fan_out: HashMap<&str, usize> = HashMap::new();
    for edge in &graph.edges {
        *fan_out.entry(edge.source.as_str()).or_insert(0) += 1;
    }

    let mut classes = Vec::with_capacity(graph.edges.len());
    let mut pending: Vec<PendingGroup> = Vec::new();
    let mut group_index: HashMap<(String, BranchKind, u32), usize> = HashMap::new();
    let mut conditional_count = 0u32;
    let mut parallel_count = 0u32;

    for (idx, edge) in graph.edges.iter().enumerate() {
        let siblings = fan_out[edge.source.as_str()];
        if siblings <= 1 {
            if edge.is_self_loop() {
                classes.push(EdgeClass::Cyclic);
            } else {
                classes.push(EdgeClass::Normal);
            }
            continue;
        }

        let kind = match edge.execution {
            ExecutionType::Parallel => BranchKind::Parallel,
            _ => BranchKind::Conditional,
        };
        let key = (edge.source.clone(), kind, edge.group);
        let group = *group_index.entry(key).or_insert_with(|| {
            let ordinal = match kind {
                BranchKind::Conditional => {
                    conditional_count += 1;
                    conditional_count
                }
                BranchKind::Parallel => {
                    parallel_count += 1;
                    parallel_count
                }
            };
            pending.push(PendingGroup {
                source: edge.source.clone(),
                kind,
                ordinal,
                user_label: None,
                edges: Vec::new(),
            });
            pending.len() - 1
        });

        let entry = &mut pending[group];
        entry.edges.push(idx);
        if entry.user_label.is_none() {
            if let Some(label) = edge.label.as_deref() {
                if !label.trim().is_empty() {
                    entry.user_label = Some(normalize_label(label));
                }
            }
        }
        classes.push(EdgeClass::Branch { group });
    }

    let groups = pending
        .into_iter()
        .map(|g| {
            let label = g.user_label.unwrap_or_else(|| match g.kind {
                BranchKind::Conditional => format!("conditional_edge_{}", g.ordinal),
                BranchKind::Parallel => format!("parallel_execution_{}", g.ordinal),
            });
            BranchGroup {
                source: g.source,
                kind: g.kind,
                label,
                edges: g.edges,
            }
        })
        .collect();

    Classification { classes, groups }
}
