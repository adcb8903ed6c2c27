// SPDX-License-Identifier: MIT

//! HTTP API surface
//!
//! Exposes the compile, generate, and bundle operations over HTTP for
//! browser frontends. Remote generation failures are surfaced as
//! retryable errors; the compiled spec stays valid either way.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::bundle::{Bundle, ARCHIVE_FILE_NAME};
use crate::codegen::{emitter_for, EmitterKind, Language};
use crate::error::EmitError;
use crate::graph::GraphDef;
use crate::spec::{compile, render};

pub async fn serve(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let app = Router::new()
        .route("/api/health", get(health_check))
        .route("/api/compile", post(compile_graph))
        .route("/api/generate", post(generate_code))
        .route("/api/bundle", post(bundle_graph))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    log::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Compile a graph snapshot to the canonical spec text
async fn compile_graph(Json(graph): Json<GraphDef>) -> Response {
    match compile(&graph) {
        Ok(spec) => (StatusCode::OK, Json(json!({ "spec": render(&spec) }))).into_response(),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct GenerateBody {
    graph: GraphDef,
    language: Language,
    #[serde(default)]
    emitter: EmitterKind,
}

/// Compile and emit code for one target language
async fn generate_code(Json(body): Json<GenerateBody>) -> Response {
    let request_id = Uuid::new_v4();
    log::info!(
        "[{}] generate request: language={} emitter={:?}",
        request_id,
        body.language,
        body.emitter
    );

    let spec = match compile(&body.graph) {
        Ok(spec) => spec,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    match emitter_for(body.emitter).emit(&spec, body.language).await {
        Ok(code) => (
            StatusCode::OK,
            Json(json!({
                "stub": code.stub,
                "implementation": code.implementation,
            })),
        )
            .into_response(),
        Err(e) => {
            log::error!("[{}] generation failed: {}", request_id, e);
            emit_error_response(&e)
        }
    }
}

#[derive(Deserialize)]
struct BundleBody {
    graph: GraphDef,
    /// Languages to include; defaults to every supported language
    #[serde(default)]
    languages: Option<Vec<Language>>,
    #[serde(default)]
    deployment: bool,
    #[serde(default)]
    emitter: EmitterKind,
}

/// Compile, emit, and package the requested artifacts as a zip download
async fn bundle_graph(Json(body): Json<BundleBody>) -> Response {
    let spec = match compile(&body.graph) {
        Ok(spec) => spec,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    };

    let languages = body
        .languages
        .unwrap_or_else(|| Language::ALL.to_vec());
    let emitter = emitter_for(body.emitter);

    let mut bundle = Bundle::new(render(&spec));
    if body.deployment {
        bundle = bundle.with_deployment();
    }
    for language in languages {
        match emitter.emit(&spec, language).await {
            Ok(code) => bundle = bundle.with_language(language, code),
            // A requested artifact that failed to generate must not be
            // dropped silently: fail the whole bundle.
            Err(e) => {
                log::error!("bundle generation failed for {}: {}", language, e);
                return emit_error_response(&e);
            }
        }
    }

    match bundle.to_zip_bytes() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/zip".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", ARCHIVE_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

fn emit_error_response(error: &EmitError) -> Response {
    let retryable = matches!(
        error,
        EmitError::RemoteGeneration { .. } | EmitError::Http(_)
    );
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": error.to_string(), "retryable": retryable })),
    )
        .into_response()
}
