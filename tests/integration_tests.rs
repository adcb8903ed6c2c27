//! Integration tests for graph compilation and code generation
//!
//! These tests drive the full pipeline: graph construction, spec
//! compilation, wire rendering, code emission, and packaging.

use async_trait::async_trait;
use flowgen_rs::bundle::Bundle;
use flowgen_rs::codegen::{Emitter, GeneratedCode, Language, LocalEmitter};
use flowgen_rs::error::{EmitError, GraphError};
use flowgen_rs::graph::{GraphBuilder, GraphDef, GraphLoader};
use flowgen_rs::spec::{compile, render, SpecEdge};

// ============================================================================
// Mock Components
// ============================================================================

/// Emitter that succeeds for Python and fails for TypeScript, standing
/// in for a generation service with one degraded language backend.
struct HalfBrokenEmitter;

#[async_trait]
impl Emitter for HalfBrokenEmitter {
    async fn emit(
        &self,
        spec: &flowgen_rs::spec::Spec,
        language: Language,
    ) -> Result<GeneratedCode, EmitError> {
        match language {
            Language::Python => LocalEmitter.emit(spec, language).await,
            Language::TypeScript => Err(EmitError::RemoteGeneration {
                status: 503,
                message: "backend unavailable".to_string(),
            }),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Source -> triage, triage -> {research, respond} conditional "route",
/// research -> {fetch, summarize} parallel, every leaf -> End.
fn review_graph() -> GraphDef {
    let mut builder = GraphBuilder::new("review");
    let triage = builder.add_labeled_node("triage");
    let research = builder.add_labeled_node("research");
    let respond = builder.add_labeled_node("respond");
    let fetch = builder.add_labeled_node("fetch");
    let summarize = builder.add_labeled_node("summarize");

    builder.connect("source", &triage);
    let first = builder.connect_conditional(&triage, &research, 0);
    builder.label_edge(&first, "route");
    builder.connect_conditional(&triage, &respond, 0);
    builder.connect_parallel(&research, &fetch, 0);
    builder.connect_parallel(&research, &summarize, 0);
    builder.connect(&fetch, "end");
    builder.connect(&summarize, "end");
    builder.connect(&respond, "end");
    builder.build()
}

// ============================================================================
// Compilation Pipeline
// ============================================================================

#[test]
fn test_full_compile_is_byte_deterministic() {
    let graph = review_graph();
    let first = render(&compile(&graph).unwrap());
    let second = render(&compile(&graph).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_review_graph_spec_shape() {
    let spec = compile(&review_graph()).unwrap();

    assert_eq!(
        spec.nodes,
        vec!["triage", "research", "respond", "fetch", "summarize"]
    );
    assert!(spec.edges.contains(&SpecEdge::Conditional {
        from: "triage".to_string(),
        condition: "route".to_string(),
        paths: vec!["research".to_string(), "respond".to_string()],
    }));
    assert!(spec.edges.contains(&SpecEdge::Parallel {
        from: "research".to_string(),
        parallel: vec!["fetch".to_string(), "summarize".to_string()],
    }));
}

#[test]
fn test_yaml_snapshot_compiles() {
    let yaml = r#"
name: editor-export
nodes:
  - id: source
    kind: source
    label: source
  - id: end
    kind: end
    label: end
  - id: node-1
    kind: custom
    label: call model
  - id: node-2
    kind: custom
    label: tools
edges:
  - id: edge-1
    source: source
    target: node-1
  - id: edge-2
    source: node-1
    target: node-2
    execution: conditional
    label: should continue
  - id: edge-3
    source: node-1
    target: end
    execution: conditional
  - id: edge-4
    source: node-2
    target: node-1
"#;
    let graph = GraphLoader::parse_yaml(yaml).unwrap();
    let spec = compile(&graph).unwrap();

    assert_eq!(spec.nodes, vec!["call_model", "tools"]);
    assert!(spec.edges.contains(&SpecEdge::Conditional {
        from: "call_model".to_string(),
        condition: "should_continue".to_string(),
        paths: vec!["tools".to_string(), "__end__".to_string()],
    }));
    assert!(spec.edges.contains(&SpecEdge::Direct {
        from: "tools".to_string(),
        to: "call_model".to_string(),
    }));
}

#[test]
fn test_invalid_graph_produces_no_spec() {
    let mut builder = GraphBuilder::new("broken");
    let a = builder.add_labeled_node("A");
    builder.connect("source", &a);
    let result = compile(&builder.build());
    assert_eq!(result, Err(GraphError::Unreachable));
}

// ============================================================================
// Code Emission
// ============================================================================

#[tokio::test]
async fn test_local_emitters_cover_every_node_and_group() {
    let spec = compile(&review_graph()).unwrap();

    for language in Language::ALL {
        let code = LocalEmitter.emit(&spec, language).await.unwrap();
        for node in &spec.nodes {
            assert!(
                code.implementation.contains(&format!("{}(state", node)),
                "{} implementation must declare {}",
                language,
                node
            );
        }
        assert!(code.implementation.contains("route"));
        assert!(code.implementation.contains("parallel_execution_1"));
        assert_ne!(code.stub, code.implementation);
    }
}

#[tokio::test]
async fn test_one_language_failure_leaves_the_other_intact() {
    let spec = compile(&review_graph()).unwrap();
    let emitter = HalfBrokenEmitter;

    let (python, typescript) = futures::join!(
        emitter.emit(&spec, Language::Python),
        emitter.emit(&spec, Language::TypeScript)
    );

    assert!(python.is_ok());
    let err = typescript.unwrap_err();
    assert!(matches!(
        err,
        EmitError::RemoteGeneration { status: 503, .. }
    ));

    // The compiled spec text remains valid and reusable regardless of
    // emitter outcome.
    assert!(render(&spec).contains("name: CustomAgent"));
}

// ============================================================================
// Packaging
// ============================================================================

#[tokio::test]
async fn test_bundle_end_to_end() {
    let spec = compile(&review_graph()).unwrap();
    let mut bundle = Bundle::new(render(&spec)).with_deployment();
    for language in Language::ALL {
        let code = LocalEmitter.emit(&spec, language).await.unwrap();
        bundle = bundle.with_language(language, code);
    }

    let bytes = bundle.to_zip_bytes().unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(
        bundle.file_names(),
        vec![
            "spec.yml",
            "stub.py",
            "implementation.py",
            "stub.ts",
            "implementation.ts",
            "Dockerfile",
            "docker-compose.yml",
        ]
    );
}
