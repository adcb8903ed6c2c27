// SPDX-License-Identifier: MIT

//! Canonical spec wire rendering
//!
//! Renders a [`Spec`] to the stable text block sent to the generation
//! service and written into bundles. The header comment and the body
//! layout are part of the wire contract: changing either breaks every
//! conforming backend.

use super::types::{Spec, SpecEdge};

/// File name the rendered spec is packaged under
pub const SPEC_FILE_NAME: &str = "spec.yml";

/// Fixed leading comment block naming the originating tool and the
/// companion artifact file names. Preserved verbatim by conforming
/// emitter backends.
const HEADER: &str = "\
# This workflow specification was generated with flowgen.
# It travels with its companion artifacts:
#   spec.yml               - this canonical specification
#   stub.<py|ts>           - generated signatures and graph wiring
#   implementation.<py|ts> - stub plus placeholder bodies
";

/// Render the spec to its canonical wire text.
///
/// Byte-identical output for equal spec values.
pub fn render(spec: &Spec) -> String {
    let mut out = String::from(HEADER);
    out.push_str(&format!("name: {}\n", spec.name));

    if spec.nodes.is_empty() {
        out.push_str("nodes: []\n");
    } else {
        out.push_str("nodes:\n");
        for node in &spec.nodes {
            out.push_str(&format!("  - name: {}\n", node));
        }
    }

    if spec.edges.is_empty() {
        out.push_str("edges: []\n");
    } else {
        out.push_str("edges:\n");
        for edge in &spec.edges {
            match edge {
                SpecEdge::Direct { from, to } => {
                    out.push_str(&format!("  - from: {}\n    to: {}\n", from, to));
                }
                SpecEdge::Conditional {
                    from,
                    condition,
                    paths,
                } => {
                    out.push_str(&format!(
                        "  - from: {}\n    condition: {}\n    paths: [{}]\n",
                        from,
                        condition,
                        paths.join(", ")
                    ));
                }
                SpecEdge::Parallel { from, parallel } => {
                    out.push_str(&format!(
                        "  - from: {}\n    parallel: [{}]\n",
                        from,
                        parallel.join(", ")
                    ));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::types::SPEC_NAME;

    fn linear_spec() -> Spec {
        Spec {
            name: SPEC_NAME.to_string(),
            nodes: vec!["A".to_string()],
            edges: vec![
                SpecEdge::Direct {
                    from: "__start__".to_string(),
                    to: "A".to_string(),
                },
                SpecEdge::Direct {
                    from: "A".to_string(),
                    to: "__end__".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_linear_spec() {
        let text = render(&linear_spec());
        let expected = format!(
            "{}{}",
            HEADER,
            "name: CustomAgent\n\
             nodes:\n\
             \x20 - name: A\n\
             edges:\n\
             \x20 - from: __start__\n\
             \x20   to: A\n\
             \x20 - from: A\n\
             \x20   to: __end__\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_conditional_and_parallel() {
        let spec = Spec {
            name: SPEC_NAME.to_string(),
            nodes: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            edges: vec![
                SpecEdge::Conditional {
                    from: "A".to_string(),
                    condition: "route".to_string(),
                    paths: vec!["B".to_string(), "__end__".to_string()],
                },
                SpecEdge::Parallel {
                    from: "B".to_string(),
                    parallel: vec!["C".to_string(), "A".to_string()],
                },
            ],
        };
        let text = render(&spec);
        assert!(text.contains("  - from: A\n    condition: route\n    paths: [B, __end__]\n"));
        assert!(text.contains("  - from: B\n    parallel: [C, A]\n"));
    }

    #[test]
    fn test_header_names_companion_files() {
        let text = render(&linear_spec());
        assert!(text.starts_with("# "));
        for name in ["spec.yml", "stub.<py|ts>", "implementation.<py|ts>"] {
            assert!(text.contains(name), "header must name {}", name);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(&linear_spec()), render(&linear_spec()));
    }
}
