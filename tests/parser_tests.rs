// Integration tests for statement parsing

use hefront::ast::{AstNode, AstError, Datatype, NodeKind, PrimitiveType, Statement, Target};
use hefront::parser::{parse, parse_tokens, parse_with_nodes, Lexer, ParseError};

fn only_statement(source: &str) -> Statement {
    let root = parse(source).expect("Parsing failed");
    assert_eq!(root.len(), 1, "expected one top-level statement");
    root.statements()[0].clone()
}

#[test]
fn test_function_with_parameters() {
    let source = r#"
        public secret int add(secret int a, int b) {
            return a +++ b;
        }
    "#;

    let Statement::Function(function) = only_statement(source) else {
        panic!("Expected function");
    };
    assert_eq!(function.identifier(), "add");
    assert_eq!(function.return_type(), Datatype::secret(PrimitiveType::Int));

    let parameters: Vec<String> = function
        .parameters()
        .iter()
        .map(|p| format!("{} {}", p.datatype(), p.identifier()))
        .collect();
    assert_eq!(parameters, vec!["secret int a", "int b"]);

    let body = function.body().unwrap();
    assert_eq!(body.statements()[0].kind(), NodeKind::Return);
}

#[test]
fn test_if_without_else_has_two_children() {
    let Statement::If(branch) = only_statement("if (x < 3) { y = 1; }") else {
        panic!("Expected if");
    };

    assert!(branch.has_condition());
    assert!(branch.has_then_branch());
    assert!(!branch.has_else_branch());
    assert_eq!(branch.count_children(), 2);
    assert!(matches!(
        branch.else_branch(),
        Err(AstError::MissingChild { node: NodeKind::If, .. })
    ));
    assert!(branch.child(2).is_err());
}

#[test]
fn test_if_else_with_single_statement_bodies() {
    let Statement::If(branch) = only_statement("if (ok) x = 1; else x = 2;") else {
        panic!("Expected if");
    };
    assert_eq!(branch.count_children(), 3);
    assert_eq!(branch.then_branch().unwrap().len(), 1);
    assert_eq!(branch.else_branch().unwrap().len(), 1);
}

#[test]
fn test_for_loop_parts() {
    let source = "for (int i = 0, int j = 9; i < j; i++, j--) { sum = sum + i; }";
    let Statement::For(for_loop) = only_statement(source) else {
        panic!("Expected for");
    };

    assert_eq!(for_loop.initializer().unwrap().len(), 2);
    assert_eq!(for_loop.update().unwrap().len(), 2);
    assert_eq!(for_loop.body().unwrap().len(), 1);
    assert_eq!(for_loop.count_children(), 4);
}

#[test]
fn test_declarations() {
    let Statement::VariableDeclaration(decl) = only_statement("secret float xs[];") else {
        panic!("Expected declaration");
    };
    assert_eq!(decl.datatype().to_string(), "secret float");
    assert_eq!(decl.target().unwrap().identifier(), "xs");
    assert!(!decl.has_value());

    let Statement::VariableDeclaration(decl) = only_statement("string s = \"hi\";") else {
        panic!("Expected declaration");
    };
    assert!(decl.has_value());
}

#[test]
fn test_index_assignment() {
    let Statement::Assignment(assignment) = only_statement("m[i][j] = 0;") else {
        panic!("Expected assignment");
    };
    let Target::IndexAccess(access) = assignment.target().unwrap() else {
        panic!("Expected index access");
    };
    assert_eq!(access.base().map(|v| v.identifier()), Some("m"));
}

#[test]
fn test_parents_are_assigned() {
    let root = parse("public void f() { if (a) { b = 1; } }").unwrap();

    assert_eq!(root.parent(), None);
    for node in root.as_node().descendants().into_iter().skip(1) {
        let parent = node
            .parent()
            .unwrap_or_else(|| panic!("{} has no parent", node.label()));
        let owner = root.as_node().find(parent).expect("parent is in the tree");
        assert!(owner.children().any(|child| child.id() == node.id()));
    }
}

#[test]
fn test_registry_matches_tree() {
    let program = parse_with_nodes("int a = 1; for (int i = 0; i < a; i++) { a = a * 2; }").unwrap();
    let mut registered = program.created.clone();
    let mut in_tree: Vec<_> = program
        .root
        .as_node()
        .descendants()
        .into_iter()
        .map(|node| node.id())
        .collect();
    registered.sort_unstable();
    in_tree.sort_unstable();
    assert_eq!(registered, in_tree);
}

#[test]
fn test_token_reentry() {
    let source = "public int main() { int x = 2; return x * 3; }";
    let tokens = Lexer::new(source).tokenize().unwrap();
    assert_eq!(parse_tokens(tokens).unwrap(), parse(source).unwrap());
}

#[test]
fn test_sized_array_is_unsupported() {
    let err = parse("int arr[3];").unwrap_err();
    assert!(matches!(err, ParseError::Unsupported { .. }), "{err:?}");
    assert_eq!(err.location().line, 1);
    assert!(err.to_string().contains("int i[]"));
}

#[test]
fn test_syntax_errors() {
    for source in [
        "public int f() { return 1;",
        "if (x { y = 1; }",
        "int = 3;",
        "x = 1",
        "public f() {}",
    ] {
        let err = parse(source).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }), "{source}: {err:?}");
    }
}

#[test]
fn test_lexical_error_position() {
    let err = parse("int x = 1;\nint y = #;").unwrap_err();
    assert!(matches!(err, ParseError::Lexical(_)));
    assert_eq!((err.location().line, err.location().column), (2, 9));
}
