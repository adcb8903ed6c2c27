//! TypeScript code emitter
//!
//! Emits LangGraph.js source from the canonical spec. Same structure as
//! the Python emitter: feature-dependent imports, a state annotation
//! block, one function per node, one decision function per branch
//! record, and a builder chain mirroring the spec's edge order.

use crate::graph::types::{END_SENTINEL, START_SENTINEL};
use crate::spec::{Spec, SpecEdge};

use super::GeneratedCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Stub,
    Implementation,
}

/// Emit the TypeScript stub and implementation for a spec
pub fn emit(spec: &Spec) -> GeneratedCode {
    GeneratedCode {
        stub: emit_source(spec, Mode::Stub),
        implementation: emit_source(spec, Mode::Implementation),
    }
}

fn emit_source(spec: &Spec, mode: Mode) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(
        "import { StateGraph, START, END, Annotation } from '@langchain/langgraph';".to_string(),
    );
    if spec.has_parallel() {
        lines.push("import { BaseMessage } from '@langchain/core/messages';".to_string());
    }
    lines.push(String::new());

    lines.push("const StateAnnotation = Annotation.Root({".to_string());
    lines.push("    // Define your state properties here".to_string());
    if spec.has_parallel() {
        lines.push("    // Parallel fan-out writes concurrently: reduce into one key".to_string());
        lines.push("    messages: Annotation<BaseMessage[]>({".to_string());
        lines.push("        reducer: (x, y) => x.concat(y),".to_string());
        lines.push("        default: () => [],".to_string());
        lines.push("    }),".to_string());
    }
    lines.push("});".to_string());
    lines.push(String::new());

    for node in &spec.nodes {
        lines.push(format!("function {}(state) {{", node));
        if mode == Mode::Implementation {
            lines.push("    return {};".to_string());
        }
        lines.push("}".to_string());
        lines.push(String::new());
    }

    let mut parallel_ordinal = 0usize;
    for edge in &spec.edges {
        match edge {
            SpecEdge::Conditional {
                condition, paths, ..
            } => {
                lines.push(format!("function {}(state) {{", condition));
                if mode == Mode::Implementation {
                    for path in paths {
                        lines.push(format!("    // return {};", return_entry(path)));
                    }
                }
                lines.push("}".to_string());
                lines.push(String::new());
            }
            SpecEdge::Parallel { parallel, .. } => {
                parallel_ordinal += 1;
                lines.push(format!(
                    "function {}(state) {{",
                    parallel_function_name(parallel_ordinal)
                ));
                if mode == Mode::Implementation {
                    let targets: Vec<String> = parallel.iter().map(|t| return_entry(t)).collect();
                    lines.push(format!("    return [{}];", targets.join(", ")));
                }
                lines.push("}".to_string());
                lines.push(String::new());
            }
            SpecEdge::Direct { .. } => {}
        }
    }

    lines.push("const workflow = new StateGraph(StateAnnotation)".to_string());
    for node in &spec.nodes {
        lines.push(format!("    .addNode(\"{}\", {})", node, node));
    }
    let mut parallel_ordinal = 0usize;
    for edge in &spec.edges {
        match edge {
            SpecEdge::Direct { from, to } => {
                lines.push(format!(
                    "    .addEdge({}, {})",
                    endpoint(from),
                    endpoint(to)
                ));
            }
            SpecEdge::Conditional {
                from, condition, ..
            } => {
                lines.push(format!(
                    "    .addConditionalEdges({}, {})",
                    endpoint(from),
                    condition
                ));
            }
            SpecEdge::Parallel { from, .. } => {
                parallel_ordinal += 1;
                lines.push(format!(
                    "    .addConditionalEdges({}, {})",
                    endpoint(from),
                    parallel_function_name(parallel_ordinal)
                ));
            }
        }
    }
    if let Some(last) = lines.last_mut() {
        last.push(';');
    }
    lines.push(String::new());
    lines.push("const graph = workflow.compile();".to_string());
    lines.push("export { graph };".to_string());
    lines.push(String::new());

    lines.join("\n")
}

fn parallel_function_name(ordinal: usize) -> String {
    format!("parallel_execution_{}", ordinal)
}

fn endpoint(name: &str) -> String {
    match name {
        START_SENTINEL => "START".to_string(),
        END_SENTINEL => "END".to_string(),
        _ => format!("\"{}\"", name),
    }
}

fn return_entry(name: &str) -> String {
    match name {
        START_SENTINEL => "START".to_string(),
        END_SENTINEL => "END".to_string(),
        _ => format!("\"{}\"", name),
    }
}
