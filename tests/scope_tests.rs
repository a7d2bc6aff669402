// Integration tests for scope resolution

use expect_test::expect;
use hefront::ast::{AstNode, Block, NodeKind, NodeRef, Statement, Variable};
use hefront::parser::{parse, parse_structured};
use hefront::visitor::{resolve_scopes, DeclarationKind, ScopeError, ScopeResolver};

/// Every `Variable` named `name`, in preorder
fn uses_of<'a>(root: &'a Block, name: &str) -> Vec<&'a Variable> {
    root.as_node()
        .descendants()
        .into_iter()
        .filter_map(|node| match node {
            NodeRef::Variable(variable) if variable.identifier() == name => Some(variable),
            _ => None,
        })
        .collect()
}

fn first_of_kind(root: &Block, kind: NodeKind) -> NodeRef<'_> {
    root.as_node()
        .descendants()
        .into_iter()
        .find(|node| node.kind() == kind)
        .expect("node of kind not found")
}

#[test]
fn test_for_loop_shares_one_scope() {
    let root = parse("for (int i = 0; i < 10; i++) { x = i; }").unwrap();
    let resolution = resolve_scopes(root.as_node()).unwrap();
    let scopes = resolution.scopes.as_ref().unwrap();

    let for_node = first_of_kind(&root, NodeKind::For);
    let for_scope = scopes.scope_owned_by(for_node.id()).unwrap();
    let declaration = first_of_kind(&root, NodeKind::VariableDeclaration);
    assert_eq!(scopes.scope_of_declaration(declaration.id()), Some(for_scope));

    // Declaration target, condition, update target, update operand, body
    let uses = uses_of(&root, "i");
    assert_eq!(uses.len(), 5);
    for variable in &uses[..4] {
        assert_eq!(resolution.use_scope(variable.id()), Some(for_scope));
    }

    let body_scope = resolution.use_scope(uses[4].id()).unwrap();
    assert_ne!(body_scope, for_scope);
    assert_eq!(scopes.parent_of(body_scope), Some(for_scope));

    for variable in uses {
        let (scope, found) = resolution.declaration_of(variable).unwrap();
        assert_eq!(scope, for_scope);
        assert_eq!(found.node, declaration.id());
    }

    // No scope was opened for the initializer or update blocks
    let for_children = &scopes.get(for_scope).unwrap().children;
    assert_eq!(for_children.len(), 1);
}

#[test]
fn test_function_parameters_are_declared() {
    let root = parse("public int f(secret int a, int b) { return a +++ b; }").unwrap();
    let resolution = resolve_scopes(root.as_node()).unwrap();
    let scopes = resolution.scopes.as_ref().unwrap();

    let function = first_of_kind(&root, NodeKind::Function);
    let function_scope = scopes.scope_owned_by(function.id()).unwrap();
    let scope = scopes.get(function_scope).unwrap();

    let names: Vec<&str> = scope.identifiers().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(scope.get("a").unwrap().kind, DeclarationKind::Parameter);
    assert_eq!(scope.get("a").unwrap().datatype.to_string(), "secret int");

    let a = uses_of(&root, "a")[0];
    let (found_in, _) = resolution.declaration_of(a).unwrap();
    assert_eq!(found_in, function_scope);
}

#[test]
fn test_shadowing_and_redeclaration() {
    let source = "int x = 1; int x = 2; { int x = 3; y = x; } z = x;";
    let root = parse(source).unwrap();
    let resolution = resolve_scopes(root.as_node()).unwrap();

    let declarations: Vec<_> = root
        .statements()
        .iter()
        .map(|statement| statement.id())
        .collect();
    let Statement::Block(inner) = &root.statements()[2] else {
        panic!("Expected nested block");
    };
    let inner_declaration = inner.statements()[0].id();

    let uses = uses_of(&root, "x");
    let inner_use = uses
        .iter()
        .find(|variable| variable.parent() == Some(inner.statements()[1].id()))
        .unwrap();
    let outer_use = uses.last().unwrap();

    let (_, inner_found) = resolution.declaration_of(inner_use).unwrap();
    assert_eq!(inner_found.node, inner_declaration);

    // The second declaration replaced the first
    let (scope, outer_found) = resolution.declaration_of(outer_use).unwrap();
    assert_eq!(outer_found.node, declarations[1]);
    assert_eq!(Some(scope), resolution.scopes.as_ref().map(|tree| tree.root()));
}

#[test]
fn test_unknown_identifier_is_unresolved() {
    let root = parse("y = z;").unwrap();
    let resolution = resolve_scopes(root.as_node()).unwrap();

    let z = uses_of(&root, "z")[0];
    assert!(resolution.use_scope(z.id()).is_some());
    assert!(resolution.declaration_of(z).is_none());
}

#[test]
fn test_declaration_outside_scope_fails() {
    let root = parse("int x = 1;").unwrap();
    let mut resolver = ScopeResolver::new();

    let result = root.statements()[0].accept(&mut resolver);
    assert_eq!(result, Err(ScopeError::NoScope));
    assert!(resolver.scopes().is_none());
}

#[test]
fn test_render_scope_tree() {
    let source = r#"
        public int f(secret int a) {
            for (int i = 0; i < a; i++) {
                if (i == 2) { int t = i; }
            }
            return a;
        }
        char c = 'x';
    "#;
    let root = parse(source).unwrap();
    let resolution = resolve_scopes(root.as_node()).unwrap();

    expect![[r#"
        scope 0 (Block): char c
          scope 1 (Function): secret int a
            scope 2 (Block): -
              scope 3 (For): int i
                scope 4 (Block): -
                  scope 5 (If): -
                    scope 6 (Block): int t
    "#]]
    .assert_eq(&resolution.scopes.unwrap().render());
}

#[test]
fn test_structured_tree_resolves_like_source() {
    let root = parse("public int f(int n) { int m = n; return m; }").unwrap();
    let rebuilt = parse_structured(&root.to_structured()).unwrap();

    let from_source = resolve_scopes(root.as_node()).unwrap();
    let from_structured = resolve_scopes(rebuilt.as_node()).unwrap();

    assert_eq!(
        from_source.scopes.unwrap().render(),
        from_structured.scopes.unwrap().render()
    );
}
