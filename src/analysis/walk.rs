//! Pre-order walk over one file's syntax tree.

use super::{inspect_function, DiagnosticSink, Finding, FunctionKind, ParsedFile};
use crate::config::Config;

/// Walk every node of `parsed` once, inspecting function-like nodes.
///
/// Declarations and methods are always inspected. Function literals are
/// inspected unless `config.skip_anonymous` is set; their bodies are walked
/// either way. Each diagnostic goes to `sink` as soon as it is found, and the
/// findings are returned in traversal order.
pub fn walk_file(
    parsed: &ParsedFile,
    config: &Config,
    sink: &mut dyn DiagnosticSink,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut cursor = parsed.tree.walk();

    loop {
        let node = cursor.node();
        if let Some(kind) = FunctionKind::from_node_kind(node.kind()) {
            let inspect = match kind {
                FunctionKind::Declaration => true,
                FunctionKind::Literal => !config.skip_anonymous,
            };
            if inspect {
                if let Some(inspection) = inspect_function(parsed, node, kind) {
                    sink.report(inspection.diagnostic);
                    findings.push(inspection.finding);
                }
            }
        }

        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return findings;
            }
        }
    }
}
