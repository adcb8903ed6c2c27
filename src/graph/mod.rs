// SPDX-License-Identifier: MIT

//! Graph model and edge classification
//!
//! This module holds the typed node/edge model shared by the spec
//! compiler and the code emitters, plus the derived classification of
//! edges into direct transitions and branch-groups.

pub mod builder;
pub mod classifier;
pub mod loader;
pub mod types;

pub use builder::GraphBuilder;
pub use classifier::{classify, BranchGroup, BranchKind, Classification, EdgeClass};
pub use loader::GraphLoader;
pub use types::{
    normalize_label, Edge, ExecutionType, GraphDef, Node, NodeKind, END_SENTINEL, START_SENTINEL,
};
