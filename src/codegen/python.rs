//! Python code emitter
//!
//! Emits LangGraph Python source from the canonical spec by string
//! templating: imports assembled conditionally on graph features, one
//! function per node, one decision function per branch record, and
//! registration statements mirroring the spec's edge order.

use crate::graph::types::{END_SENTINEL, START_SENTINEL};
use crate::spec::{Spec, SpecEdge};

use super::GeneratedCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Stub,
    Implementation,
}

/// Emit the Python stub and implementation for a spec
pub fn emit(spec: &Spec) -> GeneratedCode {
    GeneratedCode {
        stub: emit_source(spec, Mode::Stub),
        implementation: emit_source(spec, Mode::Implementation),
    }
}

fn emit_source(spec: &Spec, mode: Mode) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Imports depend on which graph features are present.
    lines.push("from langgraph.graph import StateGraph, START, END".to_string());
    let mut typing = String::from("from typing import TypedDict");
    if spec.has_conditional() {
        typing.push_str(", Literal");
    }
    if spec.has_parallel() {
        typing.push_str(", Annotated");
    }
    lines.push(typing);
    if spec.has_parallel() {
        lines.push("import operator".to_string());
    }
    if !spec.nodes.is_empty() {
        lines.push("from langchain_core.runnables.config import RunnableConfig".to_string());
    }
    lines.push(String::new());
    lines.push(String::new());

    lines.push("class State(TypedDict):".to_string());
    lines.push("    \"\"\"State class for the agent\"\"\"".to_string());
    lines.push("    # Add your state variables here".to_string());
    if spec.has_parallel() {
        lines.push("    # Parallel fan-out writes concurrently: reduce into one key".to_string());
        lines.push("    node_return: Annotated[list, operator.add]".to_string());
    }
    lines.push(String::new());
    lines.push(String::new());

    for node in &spec.nodes {
        lines.push(format!(
            "def {}(state: State, config: RunnableConfig) -> State:",
            node
        ));
        match mode {
            Mode::Stub => lines.push("    ...".to_string()),
            Mode::Implementation => lines.push("    return {}".to_string()),
        }
        lines.push(String::new());
        lines.push(String::new());
    }

    let mut parallel_ordinal = 0usize;
    for edge in &spec.edges {
        match edge {
            SpecEdge::Conditional {
                from,
                condition,
                paths,
            } => {
                let literals: Vec<String> = paths.iter().map(|p| literal_entry(p)).collect();
                lines.push(format!(
                    "def {}(state: State, config: RunnableConfig) -> Literal[{}]:",
                    condition,
                    literals.join(", ")
                ));
                lines.push(format!(
                    "    \"\"\"Function to handle conditional edge '{}' from {}\"\"\"",
                    condition,
                    display_name(from)
                ));
                match mode {
                    Mode::Stub => lines.push("    ...".to_string()),
                    Mode::Implementation => {
                        for path in paths {
                            lines.push(format!("    # return {}", return_entry(path)));
                        }
                    }
                }
                lines.push(String::new());
                lines.push(String::new());
            }
            SpecEdge::Parallel { from, parallel } => {
                parallel_ordinal += 1;
                lines.push(format!(
                    "def {}(state: State, config: RunnableConfig) -> list:",
                    parallel_function_name(parallel_ordinal)
                ));
                lines.push(format!(
                    "    \"\"\"Fan out from {} to every parallel branch\"\"\"",
                    display_name(from)
                ));
                match mode {
                    Mode::Stub => lines.push("    ...".to_string()),
                    Mode::Implementation => {
                        let targets: Vec<String> =
                            parallel.iter().map(|t| return_entry(t)).collect();
                        lines.push(format!("    return [{}]", targets.join(", ")));
                    }
                }
                lines.push(String::new());
                lines.push(String::new());
            }
            SpecEdge::Direct { .. } => {}
        }
    }

    lines.push("workflow = StateGraph(State)".to_string());
    lines.push(String::new());
    if !spec.nodes.is_empty() {
        lines.push("# Add nodes to the graph".to_string());
        for node in &spec.nodes {
            lines.push(format!("workflow.add_node(\"{}\", {})", node, node));
        }
        lines.push(String::new());
    }

    lines.push("# Define edges".to_string());
    let mut parallel_ordinal = 0usize;
    for edge in &spec.edges {
        match edge {
            SpecEdge::Direct { from, to } => {
                lines.push(format!(
                    "workflow.add_edge({}, {})",
                    endpoint(from),
                    endpoint(to)
                ));
            }
            SpecEdge::Conditional {
                from, condition, ..
            } => {
                lines.push(format!(
                    "workflow.add_conditional_edges({}, {})",
                    endpoint(from),
                    condition
                ));
            }
            SpecEdge::Parallel { from, .. } => {
                parallel_ordinal += 1;
                lines.push(format!(
                    "workflow.add_conditional_edges({}, {})",
                    endpoint(from),
                    parallel_function_name(parallel_ordinal)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push("graph = workflow.compile()".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// The spec drops group labels from parallel records, so the function
/// name is derived from the record's ordinal.
fn parallel_function_name(ordinal: usize) -> String {
    format!("parallel_execution_{}", ordinal)
}

/// Registration-call argument: sentinels become the START/END constants
fn endpoint(name: &str) -> String {
    match name {
        START_SENTINEL => "START".to_string(),
        END_SENTINEL => "END".to_string(),
        _ => format!("\"{}\"", name),
    }
}

/// Literal[...] entry for a conditional target
fn literal_entry(name: &str) -> String {
    match name {
        START_SENTINEL => "START".to_string(),
        END_SENTINEL => "END".to_string(),
        _ => format!("'{}'", name),
    }
}

/// Placeholder return value for a branch target
fn return_entry(name: &str) -> String {
    match name {
        START_SENTINEL => "START".to_string(),
        END_SENTINEL => "END".to_string(),
        _ => format!("\"{}\"", name),
    }
}

fn display_name(name: &str) -> &str {
    match name {
        START_SENTINEL => "START",
        END_SENTINEL => "END",
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SPEC_NAME;

    fn spec_with(edges: Vec<SpecEdge>, nodes: Vec<&str>) -> Spec {
        Spec {
            name: SPEC_NAME.to_string(),
            nodes: nodes.into_iter().map(String::from).collect(),
            edges,
        }
    }

    fn linear() -> Spec {
        spec_with(
            vec![
                SpecEdge::Direct {
                    from: "__start__".to_string(),
                    to: "A".to_string(),
                },
                SpecEdge::Direct {
                    from: "A".to_string(),
                    to: "__end__".to_string(),
                },
            ],
            vec!["A"],
        )
    }

    #[test]
    fn test_one_function_per_node() {
        let code = emit(&linear());
        assert_eq!(
            code.implementation
                .matches("def A(state: State, config: RunnableConfig) -> State:")
                .count(),
            1
        );
        assert!(code.implementation.contains("workflow.add_node(\"A\", A)"));
    }

    #[test]
    fn test_stub_has_no_bodies() {
        let code = emit(&linear());
        assert!(code.stub.contains("    ..."));
        assert!(!code.stub.contains("return {}"));
        assert!(code.implementation.contains("    return {}"));
    }

    #[test]
    fn test_sentinel_wiring() {
        let code = emit(&linear());
        assert!(code.implementation.contains("workflow.add_edge(START, \"A\")"));
        assert!(code.implementation.contains("workflow.add_edge(\"A\", END)"));
    }

    #[test]
    fn test_conditional_function_enumerates_targets() {
        let spec = spec_with(
            vec![
                SpecEdge::Direct {
                    from: "__start__".to_string(),
                    to: "A".to_string(),
                },
                SpecEdge::Conditional {
                    from: "A".to_string(),
                    condition: "route".to_string(),
                    paths: vec!["B".to_string(), "__end__".to_string()],
                },
            ],
            vec!["A", "B"],
        );
        let code = emit(&spec);
        assert!(code
            .implementation
            .contains("def route(state: State, config: RunnableConfig) -> Literal['B', END]:"));
        assert!(code.implementation.contains("    # return \"B\""));
        assert!(code.implementation.contains("    # return END"));
        assert!(code
            .implementation
            .contains("workflow.add_conditional_edges(\"A\", route)"));
        assert!(code.implementation.contains(", Literal"));
    }

    #[test]
    fn test_parallel_record_emits_fan_out_function() {
        let spec = spec_with(
            vec![
                SpecEdge::Direct {
                    from: "__start__".to_string(),
                    to: "A".to_string(),
                },
                SpecEdge::Parallel {
                    from: "A".to_string(),
                    parallel: vec!["B".to_string(), "C".to_string()],
                },
            ],
            vec!["A", "B", "C"],
        );
        let code = emit(&spec);
        assert!(code.implementation.contains("import operator"));
        assert!(code
            .implementation
            .contains("node_return: Annotated[list, operator.add]"));
        assert!(code
            .implementation
            .contains("def parallel_execution_1(state: State, config: RunnableConfig) -> list:"));
        assert!(code.implementation.contains("    return [\"B\", \"C\"]"));
        assert!(code
            .implementation
            .contains("workflow.add_conditional_edges(\"A\", parallel_execution_1)"));
    }

    #[test]
    fn test_plain_graph_skips_feature_imports() {
        let code = emit(&linear());
        assert!(!code.implementation.contains("Literal"));
        assert!(!code.implementation.contains("operator"));
        assert!(code.implementation.contains("RunnableConfig"));
    }

    #[test]
    fn test_trailer_present_once() {
        let code = emit(&linear());
        assert_eq!(
            code.implementation.matches("graph = workflow.compile()").count(),
            1
        );
    }

    #[test]
    fn test_emission_is_deterministic() {
        assert_eq!(emit(&linear()), emit(&linear()));
    }
}
