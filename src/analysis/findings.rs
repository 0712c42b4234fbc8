//! Result records produced by the unnamed-returns check.

use std::fmt;

use serde::Serialize;

/// Source position resolved from a syntax tree node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Position {
    /// The source file path.
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Position {
    /// Resolve a tree-sitter node in `file` to a position.
    pub fn from_node(file: &str, node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self {
            file: file.to_string(),
            line: start.row + 1, // tree-sitter is 0-indexed
            column: start.column + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Which kind of function-like node a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    /// A named `func` declaration or method declaration.
    Declaration,
    /// A function literal (anonymous function).
    Literal,
}

impl FunctionKind {
    /// Map a tree-sitter-go node kind to a function kind.
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "function_declaration" | "method_declaration" => Some(FunctionKind::Declaration),
            "func_literal" => Some(FunctionKind::Literal),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, FunctionKind::Literal)
    }
}

/// One function signature with an unnamed return parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Line of the offending return group (1-indexed).
    pub line: usize,
    /// File containing the function.
    #[serde(rename = "file")]
    pub file_name: String,
    /// Enclosing function name; empty for anonymous functions.
    #[serde(rename = "function")]
    pub func_name: String,
    /// Source text of the offending return group's type.
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(rename = "anonymous")]
    pub is_anonymous: bool,
}

impl Finding {
    /// The diagnostic text for this finding.
    pub fn message(&self) -> String {
        if self.is_anonymous {
            "anonymous function has unnamed returns".to_string()
        } else {
            format!("function {} has unnamed returns", self.func_name)
        }
    }
}

/// A message anchored at a source position, delivered through a
/// [`DiagnosticSink`](super::DiagnosticSink).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub position: Position,
    pub message: String,
}

impl Diagnostic {
    /// Build the diagnostic that accompanies `finding`, anchored at `position`.
    pub fn for_finding(finding: &Finding, position: Position) -> Self {
        Self {
            position,
            message: finding.message(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// All findings of one analysis run, in discovery order.
///
/// File order first, then pre-order traversal order within each file.
/// A report is read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(rename = "unnamed_returns")]
    findings: Vec<Finding>,
}

impl Report {
    pub(crate) fn new(findings: Vec<Finding>) -> Self {
        Self { findings }
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings on anonymous functions.
    pub fn anonymous_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_anonymous).count()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
    }
}
