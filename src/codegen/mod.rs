// SPDX-License-Identifier: MIT

//! Code emitters
//!
//! One interface over both emission strategies: the local template
//! emitters and the remote generation service. Callers pick an
//! implementation by configuration; both produce a stub (signatures and
//! wiring only) and an implementation (stub plus placeholder bodies)
//! for a target language.

pub mod language;
pub mod python;
pub mod remote;
pub mod typescript;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EmitError;
use crate::spec::Spec;

pub use language::Language;
pub use remote::RemoteEmitter;

/// Generated source artifacts for one target language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Signatures and registration scaffolding only
    pub stub: String,
    /// Stub plus placeholder bodies
    pub implementation: String,
}

/// A code emission strategy.
///
/// Emitters are pure with respect to the spec: they never verify
/// reachability (the compiler's job) and never reference a target that
/// is not declared in the spec.
#[async_trait]
pub trait Emitter: Send + Sync {
    async fn emit(&self, spec: &Spec, language: Language) -> Result<GeneratedCode, EmitError>;
}

/// Local template-based emitter covering Python and TypeScript
pub struct LocalEmitter;

#[async_trait]
impl Emitter for LocalEmitter {
    async fn emit(&self, spec: &Spec, language: Language) -> Result<GeneratedCode, EmitError> {
        Ok(match language {
            Language::Python => python::emit(spec),
            Language::TypeScript => typescript::emit(spec),
        })
    }
}

/// Which emission strategy to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitterKind {
    #[default]
    Local,
    Remote,
}

/// Construct the emitter for a strategy choice
pub fn emitter_for(kind: EmitterKind) -> Box<dyn Emitter> {
    match kind {
        EmitterKind::Local => Box::new(LocalEmitter),
        EmitterKind::Remote => Box::new(RemoteEmitter::from_env()),
    }
}
