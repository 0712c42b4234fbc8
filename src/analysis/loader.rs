//! Loading Go packages into tree-sitter trees.
//!
//! A package is the set of `.go` files of one directory. Files are parsed with
//! tree-sitter-go; sources containing syntax errors are rejected here so the
//! checker only ever sees well-formed trees.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Node, Parser};

use super::ParsedFile;

/// Errors that can occur while loading a package.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("loading Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to parse Go source: {0}")]
    Parse(String),
    #[error("{path}:{line}:{column}: syntax error")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
    },
}

/// Go source parser.
///
/// Wraps a tree-sitter parser, which is not `Sync`: create one per thread.
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, LoadError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse `source` as the contents of the Go file at `path`.
    pub fn parse(&mut self, path: &str, source: Vec<u8>) -> Result<ParsedFile, LoadError> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_else(|| LoadError::Parse(path.to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let bad = first_error(root).unwrap_or(root);
            let start = bad.start_position();
            return Err(LoadError::Syntax {
                path: path.to_string(),
                line: start.row + 1,
                column: start.column + 1,
            });
        }

        Ok(ParsedFile {
            tree,
            source,
            path: path.to_string(),
        })
    }
}

/// Find the first ERROR or MISSING node below `node`.
fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

/// A compilation unit: the parsed files of one directory, in a stable order.
pub struct Package {
    dir: String,
    files: Vec<ParsedFile>,
}

impl Package {
    /// Read and parse `paths` as the package rooted at `dir`.
    ///
    /// Files are processed in sorted path order.
    pub fn load<P: AsRef<Path>>(dir: P, paths: &[PathBuf]) -> Result<Self, LoadError> {
        let mut paths = paths.to_vec();
        paths.sort();

        let mut parser = GoParser::new()?;
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            let display = path.to_string_lossy().to_string();
            let source = fs::read(path).map_err(|source| LoadError::Io {
                path: display.clone(),
                source,
            })?;
            files.push(parser.parse(&display, source)?);
        }

        Ok(Self {
            dir: dir.as_ref().to_string_lossy().to_string(),
            files,
        })
    }

    /// Build a package from in-memory `(path, source)` pairs, keeping their order.
    pub fn from_sources(dir: &str, sources: &[(&str, &str)]) -> Result<Self, LoadError> {
        let mut parser = GoParser::new()?;
        let files = sources
            .iter()
            .map(|(path, source)| parser.parse(path, source.as_bytes().to_vec()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dir: dir.to_string(),
            files,
        })
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn files(&self) -> &[ParsedFile] {
        &self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_source() {
        let mut parser = GoParser::new().unwrap();
        let parsed = parser
            .parse("main.go", b"package main\n\nfunc main() {}\n".to_vec())
            .unwrap();
        assert_eq!(parsed.path, "main.go");
        assert_eq!(parsed.tree.root_node().kind(), "source_file");
    }

    #[test]
    fn test_syntax_error_rejected() {
        let mut parser = GoParser::new().unwrap();
        let err = parser
            .parse("bad.go", b"package main\n\nfunc main( {\n".to_vec())
            .err()
            .unwrap();
        match err {
            LoadError::Syntax { path, line, .. } => {
                assert_eq!(path, "bad.go");
                assert!(line >= 3, "unexpected line {}", line);
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_sorts_files() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("b.go");
        let a = temp.path().join("a.go");
        std::fs::write(&b, "package p\n").unwrap();
        std::fs::write(&a, "package p\n").unwrap();

        let package = Package::load(temp.path(), &[b, a.clone()]).unwrap();
        assert_eq!(package.files().len(), 2);
        assert_eq!(package.files()[0].path, a.to_string_lossy());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.go");
        let err = Package::load(temp.path(), &[missing]).err().unwrap();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_from_sources_keeps_order() {
        let package = Package::from_sources(
            "p",
            &[("p/z.go", "package p\n"), ("p/a.go", "package p\n")],
        )
        .unwrap();
        assert_eq!(package.dir(), "p");
        assert_eq!(package.files()[0].path, "p/z.go");
        assert_eq!(package.files()[1].path, "p/a.go");
    }
}
