//! Remote spec-driven emitter
//!
//! Sends the canonical spec text to the external generation service and
//! receives the stub and implementation artifacts back. This is the
//! authoritative path for multi-language support; the local emitters
//! cover a subset.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

use crate::error::EmitError;
use crate::spec::{render, Spec};

use super::{Emitter, GeneratedCode, Language};

const DEFAULT_ENDPOINT: &str = "https://langgraph-gen-570601939772.us-central1.run.app/generate";

static CLIENT: Lazy<Client> = Lazy::new(Client::new);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    spec: &'a str,
    language: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    stub: Option<String>,
    implementation: Option<String>,
}

/// Emitter backed by the external generation service
pub struct RemoteEmitter {
    endpoint: String,
}

impl RemoteEmitter {
    /// Create an emitter for an explicit service endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint from `CODEGEN_SERVICE_URL`, falling back to the public
    /// generation service
    pub fn from_env() -> Self {
        let endpoint =
            env::var("CODEGEN_SERVICE_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Self::new(endpoint)
    }

    /// Generate both languages concurrently.
    ///
    /// The two requests are independent: either may fail without
    /// suppressing the other's result, and dropping the returned future
    /// abandons both in-flight requests while the compiled spec text
    /// stays valid for resubmission.
    pub async fn emit_both(
        &self,
        spec: &Spec,
    ) -> Vec<(Language, Result<GeneratedCode, EmitError>)> {
        let (python, typescript) = futures::join!(
            self.emit(spec, Language::Python),
            self.emit(spec, Language::TypeScript)
        );
        vec![
            (Language::Python, python),
            (Language::TypeScript, typescript),
        ]
    }
}

#[async_trait]
impl Emitter for RemoteEmitter {
    async fn emit(&self, spec: &Spec, language: Language) -> Result<GeneratedCode, EmitError> {
        let text = render(spec);
        let body = GenerateRequest {
            spec: &text,
            language: language.as_str(),
            format: "yaml",
        };

        log::debug!("requesting {} generation from {}", language, self.endpoint);
        let response = CLIENT.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmitError::RemoteGeneration {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EmitError::MalformedResponse(e.to_string()))?;
        match (parsed.stub, parsed.implementation) {
            (Some(stub), Some(implementation)) => Ok(GeneratedCode {
                stub,
                implementation,
            }),
            _ => Err(EmitError::MalformedResponse(
                "missing stub or implementation field".to_string(),
            )),
        }
    }
}
