//! Signature inspection for a single function-like node.
//!
//! Classification ([`first_unnamed_result`]) is kept apart from building the
//! finding and its diagnostic ([`inspect_function`]) so it can be exercised on
//! a bare tree.

use tree_sitter::Node;

use super::{Diagnostic, Finding, FunctionKind, ParsedFile};

/// A finding together with the diagnostic emitted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspection {
    pub finding: Finding,
    pub diagnostic: Diagnostic,
}

/// Return the first result group of `func` that declares no names.
///
/// `func` must be a `function_declaration`, `method_declaration` or
/// `func_literal`. Returns `None` when there is no result list or when every
/// group is named. A result written without parentheses (`func f() error`)
/// is itself the unnamed group.
pub fn first_unnamed_result<'tree>(func: Node<'tree>) -> Option<Node<'tree>> {
    let result = func.child_by_field_name("result")?;
    if result.kind() != "parameter_list" {
        return Some(result);
    }

    let mut cursor = result.walk();
    let found = result
        .named_children(&mut cursor)
        .filter(|group| group.kind() == "parameter_declaration")
        .find(|group| group.child_by_field_name("name").is_none());
    found
}

/// Inspect one function-like node, producing at most one finding.
///
/// Later unnamed groups in the same signature are not reported.
pub fn inspect_function(
    parsed: &ParsedFile,
    func: Node,
    kind: FunctionKind,
) -> Option<Inspection> {
    let group = first_unnamed_result(func)?;
    let position = parsed.position(group);

    let func_name = match kind {
        FunctionKind::Declaration => func
            .child_by_field_name("name")
            .map(|name| parsed.node_text(name).to_string())
            .unwrap_or_default(),
        FunctionKind::Literal => String::new(),
    };

    let type_node = if group.kind() == "parameter_declaration" {
        group.child_by_field_name("type").unwrap_or(group)
    } else {
        group
    };

    let finding = Finding {
        line: position.line,
        file_name: position.file.clone(),
        func_name,
        type_text: parsed.node_text(type_node).to_string(),
        is_anonymous: kind.is_anonymous(),
    };
    let diagnostic = Diagnostic::for_finding(&finding, position);

    Some(Inspection {
        finding,
        diagnostic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GoParser;

    fn parse(source: &str) -> ParsedFile {
        GoParser::new()
            .unwrap()
            .parse("test.go", source.as_bytes().to_vec())
            .unwrap()
    }

    /// First node of the given kind, in pre-order.
    fn find_node<'a>(parsed: &'a ParsedFile, kind: &str) -> Node<'a> {
        let mut stack = vec![parsed.tree.root_node()];
        while let Some(node) = stack.pop() {
            if node.kind() == kind {
                return node;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        panic!("no {} node in source", kind);
    }

    fn inspect_decl(source: &str) -> Option<Inspection> {
        let parsed = parse(source);
        let func = find_node(&parsed, "function_declaration");
        inspect_function(&parsed, func, FunctionKind::Declaration)
    }

    #[test]
    fn test_named_results_pass() {
        assert!(inspect_decl("package p\n\nfunc Add(a, b int) (sum int) { return a + b }\n").is_none());
        assert!(inspect_decl(
            "package p\n\nfunc Divide(a, b int) (result int, err error) { return a / b, nil }\n"
        )
        .is_none());
    }

    #[test]
    fn test_no_results_pass() {
        assert!(inspect_decl("package p\n\nfunc Run(x int) {}\n").is_none());
    }

    #[test]
    fn test_unnamed_group_list() {
        let inspection = inspect_decl("package p\n\nfunc F() (int, error) { return 1, nil }\n").unwrap();

        assert_eq!(inspection.finding.func_name, "F");
        assert_eq!(inspection.finding.line, 3);
        assert_eq!(inspection.finding.file_name, "test.go");
        assert_eq!(inspection.finding.type_text, "int");
        assert!(!inspection.finding.is_anonymous);
        assert_eq!(inspection.diagnostic.position.column, 11);
        assert_eq!(inspection.diagnostic.message, "function F has unnamed returns");
    }

    #[test]
    fn test_bare_result_type() {
        let inspection = inspect_decl("package p\n\nfunc Close() error { return nil }\n").unwrap();
        assert_eq!(inspection.finding.func_name, "Close");
        assert_eq!(inspection.finding.type_text, "error");
    }

    #[test]
    fn test_bare_pointer_result_type() {
        let inspection = inspect_decl("package p\n\nfunc New() *Client { return nil }\n").unwrap();
        assert_eq!(inspection.finding.type_text, "*Client");
    }

    #[test]
    fn test_reports_first_unnamed_group_only() {
        let parsed = parse("package p\n\nfunc Pair() (\n\tstring,\n\tint,\n) {\n\treturn \"\", 0\n}\n");
        let func = find_node(&parsed, "function_declaration");

        let group = first_unnamed_result(func).unwrap();
        assert_eq!(parsed.node_text(group), "string");

        let inspection = inspect_function(&parsed, func, FunctionKind::Declaration).unwrap();
        assert_eq!(inspection.finding.line, 4);
    }

    #[test]
    fn test_method_declaration() {
        let parsed = parse("package p\n\ntype C struct{}\n\nfunc (c *C) Validate() (bool, error) { return true, nil }\n");
        let func = find_node(&parsed, "method_declaration");
        let inspection = inspect_function(&parsed, func, FunctionKind::Declaration).unwrap();

        assert_eq!(inspection.finding.func_name, "Validate");
        assert_eq!(
            inspection.diagnostic.message,
            "function Validate has unnamed returns"
        );
    }

    #[test]
    fn test_function_literal() {
        let parsed = parse("package p\n\nvar fn = func() (int, error) { return 42, nil }\n");
        let func = find_node(&parsed, "func_literal");
        let inspection = inspect_function(&parsed, func, FunctionKind::Literal).unwrap();

        assert!(inspection.finding.is_anonymous);
        assert_eq!(inspection.finding.func_name, "");
        assert_eq!(
            inspection.diagnostic.message,
            "anonymous function has unnamed returns"
        );
    }

    #[test]
    fn test_function_typed_result_is_one_group() {
        let inspection =
            inspect_decl("package p\n\nfunc Maker() func() (int, error) { return nil }\n").unwrap();
        assert_eq!(inspection.finding.type_text, "func() (int, error)");
    }
}
