// SPDX-License-Identifier: MIT

//! Canonical workflow specification
//!
//! The language-agnostic intermediate representation compiled from a
//! graph snapshot, and its stable wire-text rendering.

pub mod compiler;
pub mod render;
pub mod types;

pub use compiler::compile;
pub use render::{render, SPEC_FILE_NAME};
pub use types::{Spec, SpecEdge, SPEC_NAME};
