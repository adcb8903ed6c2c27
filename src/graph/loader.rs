//! Graph loader - YAML/JSON snapshot loading and parsing
//!
//! This module handles loading graph snapshots exported by the visual
//! editor from YAML or JSON files.

use super::types::GraphDef;
use crate::error::FlowgenError;
use std::fs;
use std::path::Path;

/// Loads graph snapshots from YAML or JSON files
pub struct GraphLoader;

impl GraphLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a graph snapshot from a file, dispatching on the extension
    /// (`.json` is parsed as JSON, anything else as YAML)
    pub fn load_graph<P: AsRef<Path>>(&self, path: P) -> Result<GraphDef, FlowgenError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::parse_json(&content),
            _ => Self::parse_yaml(&content),
        }
    }

    /// Parse a graph snapshot from a YAML string
    pub fn parse_yaml(content: &str) -> Result<GraphDef, FlowgenError> {
        let graph: GraphDef = serde_yaml::from_str(content)?;
        Ok(graph)
    }

    /// Parse a graph snapshot from a JSON string
    pub fn parse_json(content: &str) -> Result<GraphDef, FlowgenError> {
        let graph: GraphDef = serde_json::from_str(content)?;
        Ok(graph)
    }
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self::new()
    }
}
