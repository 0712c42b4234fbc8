//! Parsed file handle and the diagnostic reporting seam.

use super::{Diagnostic, Position};

/// Holds a parsed tree-sitter tree and associated metadata.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The source bytes (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path, as given to the loader.
    pub path: String,
}

impl ParsedFile {
    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Resolve a node of this file's tree to a file/line/column position.
    pub fn position(&self, node: tree_sitter::Node) -> Position {
        Position::from_node(&self.path, node)
    }
}

/// Receives diagnostics as the walker finds them.
///
/// The host decides what happens to them (print, collect, count).
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A sink that drops every diagnostic, for callers that only want the report.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl DiagnosticSink for Discard {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
