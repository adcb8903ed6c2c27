// SPDX-License-Identifier: MIT

//! flowgen-rs - compile visual agent workflow graphs into a canonical
//! specification and generated LangGraph source code.
//!
//! The pipeline runs graph model -> edge classifier -> spec compiler ->
//! canonical text -> code emitter (local templates or the remote
//! generation service) -> packaging.

pub mod bundle;
pub mod codegen;
pub mod error;
pub mod graph;
pub mod server;
pub mod spec;
