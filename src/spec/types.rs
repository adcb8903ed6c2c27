//! Canonical specification types

use serde::{Deserialize, Serialize};

/// Fixed name of the generated workflow aggregate
pub const SPEC_NAME: &str = "CustomAgent";

/// One edge record of the canonical spec.
///
/// Every `from`/`to`/path entry is either a sentinel (`__start__`,
/// `__end__`) or a member of [`Spec::nodes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpecEdge {
    /// Runtime branch selection: one decision function, many paths
    Conditional {
        from: String,
        condition: String,
        paths: Vec<String>,
    },
    /// Concurrent fan-out to every listed target
    Parallel { from: String, parallel: Vec<String> },
    /// Single deterministic transition
    Direct { from: String, to: String },
}

/// The canonical intermediate representation of a compiled graph.
///
/// A pure value, fully reconstructible from the graph snapshot it was
/// compiled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    /// Always [`SPEC_NAME`]
    pub name: String,
    /// Unique custom node names, insertion order preserved
    pub nodes: Vec<String>,
    /// Edge records in the compiler's fixed emission order
    pub edges: Vec<SpecEdge>,
}

impl Spec {
    /// Whether any conditional record is present
    pub fn has_conditional(&self) -> bool {
        self.edges
            .iter()
            .any(|e| matches!(e, SpecEdge::Conditional { .. }))
    }

    /// Whether any parallel record is present
    pub fn has_parallel(&self) -> bool {
        self.edges
            .iter()
            .any(|e| matches!(e, SpecEdge::Parallel { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_edge_json_shapes() {
        let direct = SpecEdge::Direct {
            from: "__start__".to_string(),
            to: "A".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&direct).unwrap(),
            serde_json::json!({"from": "__start__", "to": "A"})
        );

        let conditional = SpecEdge::Conditional {
            from: "A".to_string(),
            condition: "route".to_string(),
            paths: vec!["B".to_string(), "__end__".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&conditional).unwrap(),
            serde_json::json!({"from": "A", "condition": "route", "paths": ["B", "__end__"]})
        );

        let parallel = SpecEdge::Parallel {
            from: "A".to_string(),
            parallel: vec!["B".to_string(), "C".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&parallel).unwrap(),
            serde_json::json!({"from": "A", "parallel": ["B", "C"]})
        );
    }

    #[test]
    fn test_spec_edge_json_round_trip() {
        let edges = vec![
            SpecEdge::Conditional {
                from: "A".to_string(),
                condition: "route".to_string(),
                paths: vec!["B".to_string()],
            },
            SpecEdge::Parallel {
                from: "A".to_string(),
                parallel: vec!["B".to_string()],
            },
            SpecEdge::Direct {
                from: "A".to_string(),
                to: "B".to_string(),
            },
        ];
        let json = serde_json::to_string(&edges).unwrap();
        let parsed: Vec<SpecEdge> = serde_json::from_str(&json).unwrap();
        assert_eq!(edges, parsed);
    }

    #[test]
    fn test_feature_flags() {
        let spec = Spec {
            name: SPEC_NAME.to_string(),
            nodes: vec!["A".to_string()],
            edges: vec![SpecEdge::Direct {
                from: "__start__".to_string(),
                to: "A".to_string(),
            }],
        };
        assert!(!spec.has_conditional());
        assert!(!spec.has_parallel());
    }
}
