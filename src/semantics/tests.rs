//! Unit tests for semantic analysis.
//!
//! Covers name resolution across scopes, redefinition rules, storage
//! offsets, type checking of every expression kind and error reporting.

use super::{
    analyzer::{analyze, Analysis},
    symbol_table::{
        OffsetAllocator, ScopeId, Symbol, SymbolKind, SymbolTable, GLOBAL_SCOPE_NAME,
    },
};
use crate::{
    ast::{
        ast::{Declaration, NodeId, Program},
        expressions::Expr,
        visit::{self, Visitor},
    },
    diagnostics::{Level, Logger},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

fn parse_source(source: &str) -> Program {
    let logger = Logger::disabled();
    let tokens = tokenize(source).unwrap();
    let (_, result) = parse(tokens, &logger);
    result.unwrap()
}

fn analyze_source(source: &str) -> (Program, Analysis) {
    let program = parse_source(source);
    let analysis = analyze(&program, &Logger::disabled());
    (program, analysis)
}

fn error_kinds(analysis: &Analysis) -> Vec<ErrorImpl> {
    analysis
        .errors()
        .iter()
        .map(|error| error.get_internal_error().clone())
        .collect()
}

fn global_symbol<'a>(analysis: &'a Analysis, name: &str) -> &'a Symbol {
    let table = analysis.table();
    let id = table.lookup_local(table.global(), name).unwrap();
    analysis.symbol(id)
}

fn declared_type_name<'a>(analysis: &'a Analysis, symbol: &Symbol) -> &'a str {
    analysis.table().type_name(symbol.declared_type.unwrap())
}

#[test]
fn test_variable_with_initializer() {
    let (program, analysis) = analyze_source("integer x = 5 + 3;");

    assert!(!analysis.has_error());
    assert!(analysis.errors().is_empty());

    let x = global_symbol(&analysis, "x");
    assert_eq!(declared_type_name(&analysis, x), "integer");

    let Declaration::Variable(variable) = &program.declarations[0] else {
        panic!("expected variable declaration");
    };
    let initializer = variable.initializer.as_ref().unwrap();
    assert_eq!(analysis.type_name_of(initializer.id), Some("integer"));
    assert_eq!(analysis.type_name_of(variable.id), Some("integer"));
}

#[test]
fn test_return_type_mismatch() {
    let (_, analysis) = analyze_source("integer f() { return true; }");

    assert!(analysis.has_error());
    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::ReturnTypeMismatch {
            function: String::from("f"),
            expected: String::from("integer"),
            received: String::from("boolean"),
        }]
    );
    assert_eq!(*analysis.errors()[0].get_position(), Position(1, 22));
}

#[test]
fn test_empty_return_is_not_checked() {
    let (_, analysis) = analyze_source("integer f() { return; }");
    assert!(!analysis.has_error());
}

#[test]
fn test_redefinition_in_same_scope() {
    let (_, analysis) = analyze_source("integer x; integer x;");

    assert!(analysis.has_error());
    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VariableAlreadyDeclared {
            variable: String::from("x"),
        }]
    );
    assert_eq!(*analysis.errors()[0].get_position(), Position(1, 20));

    // The first declaration is untouched
    let x = global_symbol(&analysis, "x");
    assert_eq!(x.position, Position(1, 9));
    assert_eq!(x.offset(), Some(-4));
}

#[test]
fn test_undeclared_identifier() {
    let (_, analysis) = analyze_source("void f() { y = 3; }");

    assert!(analysis.has_error());
    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VariableNotDeclared {
            variable: String::from("y"),
        }]
    );
    assert_eq!(*analysis.errors()[0].get_position(), Position(1, 12));
}

#[test]
fn test_shadowing_in_nested_scope() {
    let (_, analysis) = analyze_source("integer x; void f() { boolean x; x = true; }");

    assert!(!analysis.has_error());
}

#[test]
fn test_function_body_may_shadow_parameter() {
    let (_, analysis) = analyze_source("void f(integer a) { char a; a = 'c'; }");

    assert!(!analysis.has_error(), "{:?}", analysis.errors());
}

#[test]
fn test_duplicate_parameter() {
    let (_, analysis) = analyze_source("void f(integer a, char a) { }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VariableAlreadyDeclared {
            variable: String::from("a"),
        }]
    );
}

#[test]
fn test_inner_block_may_shadow_parameter() {
    let (_, analysis) = analyze_source("void f(integer a) { { char a; a = 'c'; } a = 1; }");

    assert!(!analysis.has_error());
}

#[test]
fn test_offsets_decrease_by_four() {
    let (_, analysis) = analyze_source("integer a; integer b;");

    assert_eq!(global_symbol(&analysis, "a").offset(), Some(-4));
    assert_eq!(global_symbol(&analysis, "b").offset(), Some(-8));
}

#[test]
fn test_parameters_and_locals_get_offsets() {
    let (_, analysis) = analyze_source("void f(integer a, char b) { integer c; }");

    let table = analysis.table();
    let scope_named = |name: &str| {
        analysis
            .scopes()
            .iter()
            .find(|scope| scope.name == name)
            .unwrap()
    };
    let offset = |scope: &str, name: &str| {
        let id = scope_named(scope).lookup_local(name).unwrap();
        table.symbol(id).offset()
    };
    assert_eq!(offset("f", "a"), Some(-4));
    assert_eq!(offset("f", "b"), Some(-8));
    // Body locals live in the body's own scope
    assert_eq!(offset("COMPOUND_STATEMENT", "c"), Some(-12));
    assert!(scope_named("f").lookup_local("c").is_none());

    let f = global_symbol(&analysis, "f");
    let SymbolKind::Function { parameters } = &f.kind else {
        panic!("expected function symbol");
    };
    let names: Vec<&str> = parameters
        .iter()
        .map(|id| table.symbol(*id).name.as_str())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(declared_type_name(&analysis, f), "void");
}

#[test]
fn test_scope_names_and_levels() {
    let (_, analysis) =
        analyze_source("void f() { if (true) { } else { } for (; true; ) { } { { } } }");

    let scopes: Vec<(&str, u32)> = analysis
        .scopes()
        .iter()
        .map(|scope| (scope.name.as_str(), scope.level))
        .collect();

    assert_eq!(
        scopes,
        vec![
            (GLOBAL_SCOPE_NAME, 0),
            ("f", 1),
            ("COMPOUND_STATEMENT", 2),
            ("IF_BLOCK", 3),
            ("COMPOUND_STATEMENT", 4),
            ("ELSE_BLOCK", 3),
            ("COMPOUND_STATEMENT", 4),
            ("FOR_BLOCK", 3),
            ("COMPOUND_STATEMENT", 4),
            ("COMPOUND_STATEMENT", 3),
            ("COMPOUND_STATEMENT", 4),
        ]
    );
}

#[test]
fn test_for_loop_body_is_nested_in_loop_scope() {
    let (_, analysis) =
        analyze_source("void f() { integer i; for (i = 0; i < 3; i = i + 1) { integer j; } }");

    assert!(!analysis.has_error());

    let scopes = analysis.scopes();
    let for_scope = scopes.iter().position(|scope| scope.name == "FOR_BLOCK").unwrap();
    let body = &scopes[for_scope + 1];

    assert_eq!(body.name, "COMPOUND_STATEMENT");
    assert_eq!(body.parent, Some(ScopeId(for_scope)));
    assert!(body.lookup_local("j").is_some());
    assert!(scopes[for_scope].lookup_local("j").is_none());
}

#[test]
fn test_return_in_nested_blocks_checks_function_type() {
    let (_, analysis) = analyze_source(
        "integer f() { integer i; for (i = 0; i < 3; i = i + 1) { if (true) { return 'c'; } } }",
    );

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::ReturnTypeMismatch {
            function: String::from("f"),
            expected: String::from("integer"),
            received: String::from("char"),
        }]
    );
}

#[test]
fn test_return_in_nested_blocks_accepts_matching_type() {
    let (_, analysis) = analyze_source(
        "char f() { integer i; for (i = 0; i < 3; i = i + 1) { if (true) { return 'c'; } else { { return 'd'; } } } return 'e'; }",
    );

    assert!(!analysis.has_error(), "{:?}", analysis.errors());
}

#[test]
fn test_builtins_in_global_scope() {
    let table = SymbolTable::new();
    let global = table.scope(table.global());

    assert_eq!(global.name, GLOBAL_SCOPE_NAME);
    assert_eq!(global.level, 0);
    assert_eq!(global.len(), 5);
    for name in ["integer", "boolean", "char", "string", "void"] {
        let id = global.lookup_local(name).unwrap();
        assert_eq!(table.symbol(id).kind, SymbolKind::Builtin);
    }
}

#[test]
fn test_void_variable() {
    let (_, analysis) = analyze_source("void x;");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VoidVariable {
            name: String::from("x"),
        }]
    );
    // Still declared so later uses resolve
    let x = global_symbol(&analysis, "x");
    assert_eq!(declared_type_name(&analysis, x), "void");
}

#[test]
fn test_void_parameter() {
    let (_, analysis) = analyze_source("void f(void a) { }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VoidVariable {
            name: String::from("a"),
        }]
    );
}

#[test]
fn test_initializer_type_mismatch() {
    let (_, analysis) = analyze_source("string s = 5;");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::TypeMatchError {
            expected: String::from("string"),
            received: String::from("integer"),
        }]
    );
}

#[test]
fn test_assignment_type_mismatch() {
    let (_, analysis) = analyze_source("void f() { integer x; x = 'c'; }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::TypeMatchError {
            expected: String::from("integer"),
            received: String::from("char"),
        }]
    );
    // Reported at the `=`
    assert_eq!(*analysis.errors()[0].get_position(), Position(1, 25));
}

#[test]
fn test_operand_type_mismatch() {
    let (_, analysis) = analyze_source("void f() { integer x; x = 1 + true; }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::OperandTypeMismatch {
            operator: String::from("+"),
            left: String::from("integer"),
            right: String::from("boolean"),
        }]
    );
}

#[test]
fn test_binary_result_is_shared_type() {
    let (program, analysis) = analyze_source("boolean a = true && false; integer b = 1 < 2;");

    assert!(!analysis.has_error());

    let Declaration::Variable(b) = &program.declarations[1] else {
        panic!("expected variable declaration");
    };
    let comparison = b.initializer.as_ref().unwrap();
    assert_eq!(analysis.type_name_of(comparison.id), Some("integer"));
}

#[test]
fn test_unary_takes_operand_type() {
    let (program, analysis) = analyze_source("boolean a = !true; integer b = -5;");

    assert!(!analysis.has_error());
    for (index, expected) in [(0, "boolean"), (1, "integer")] {
        let Declaration::Variable(variable) = &program.declarations[index] else {
            panic!("expected variable declaration");
        };
        let initializer = variable.initializer.as_ref().unwrap();
        assert_eq!(analysis.type_name_of(initializer.id), Some(expected));
    }
}

#[test]
fn test_call_argument_checks() {
    let (_, analysis) = analyze_source(
        "integer add(integer a, integer b) { return a + b; }
         void g() { add(1); add(1, 2, 3); add(true, 2); integer r; r = add(1, 2); }",
    );

    assert_eq!(
        error_kinds(&analysis),
        vec![
            ErrorImpl::MissingArguments {
                expected: 2,
                received: 1,
            },
            ErrorImpl::UnexpectedArguments {
                expected: 2,
                received: 3,
            },
            ErrorImpl::ArgumentTypeMatchError {
                expected: String::from("integer"),
                received: String::from("boolean"),
            },
        ]
    );
}

#[test]
fn test_extra_argument_reported_at_argument() {
    let (_, analysis) = analyze_source("void f() { } void g() { f(1); }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::UnexpectedArguments {
            expected: 0,
            received: 1,
        }]
    );
    assert_eq!(*analysis.errors()[0].get_position(), Position(1, 27));
}

#[test]
fn test_call_type_is_return_type() {
    let (program, analysis) = analyze_source("char c() { return 'a'; } char d = c();");

    assert!(!analysis.has_error());
    let Declaration::Variable(d) = &program.declarations[1] else {
        panic!("expected variable declaration");
    };
    let call = d.initializer.as_ref().unwrap();
    assert_eq!(analysis.type_name_of(call.id), Some("char"));
}

#[test]
fn test_calling_a_variable() {
    let (_, analysis) = analyze_source("integer x; void f() { x(); }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::NotAFunction {
            name: String::from("x"),
        }]
    );
}

#[test]
fn test_calling_an_undeclared_function() {
    let (_, analysis) = analyze_source("void f() { g(); }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::VariableNotDeclared {
            variable: String::from("g"),
        }]
    );
}

#[test]
fn test_recursive_call_resolves() {
    let (_, analysis) = analyze_source(
        "integer fact(integer n) { if (n < 2) { return 1; } return n * fact(n - 1); }",
    );

    assert!(!analysis.has_error());
}

#[test]
fn test_function_redefinition() {
    let (_, analysis) = analyze_source("void f() { } integer f() { return 1; }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::FunctionAlreadyDeclared {
            function: String::from("f"),
        }]
    );
}

#[test]
fn test_indexing() {
    let (_, analysis) =
        analyze_source("integer[] a; void f() { integer b; b = a[1]; a[true] = 2; }");

    assert_eq!(
        error_kinds(&analysis),
        vec![ErrorImpl::TypeMatchError {
            expected: String::from("integer"),
            received: String::from("boolean"),
        }]
    );
}

#[test]
fn test_analysis_continues_after_errors() {
    let (_, analysis) = analyze_source(
        "integer x; integer x; void f() { y = 1; z = 2; } string s = 'c';",
    );

    assert_eq!(analysis.errors().len(), 4);
    assert!(analysis.has_error());
}

struct ExprCollector {
    ids: Vec<NodeId>,
}

impl Visitor for ExprCollector {
    fn visit_expr(&mut self, expr: &Expr) {
        self.ids.push(expr.id);
        visit::walk_expr(self, expr);
    }
}

#[test]
fn test_every_expression_is_typed() {
    let (program, analysis) = analyze_source(
        "integer g;
         integer f(integer a) {
             integer b = a * 2;
             print(b, \"x\", 'c', !true);
             for (b = 0; b < 10; b = b + 1) g = -b;
             if (b == 10 && b != 3) { return f(b); }
             return (b % 3);
         }",
    );

    assert!(!analysis.has_error(), "{:?}", analysis.errors());

    let mut collector = ExprCollector { ids: vec![] };
    collector.visit_program(&program);

    assert!(collector.ids.len() > 20);
    for id in collector.ids {
        assert!(analysis.type_of(id).is_some(), "no type for {}", id);
    }
}

#[test]
fn test_errors_are_logged() {
    let program = parse_source("void f() { y = 1; } integer x; integer x;");
    let logger = Logger::new(true, Level::Debug);

    let analysis = analyze(&program, &logger);

    let logged = logger.records_at(Level::Error);
    assert_eq!(logged.len(), analysis.errors().len());
    assert_eq!(logged.len(), 2);
    assert!(logged[0].message.contains("undefined identifier \"y\""));
}

#[test]
fn test_render_logs_scopes() {
    let (_, analysis) = analyze_source("integer x; void f(char c) { }");
    let logger = Logger::new(true, Level::Info);

    analysis.render(&logger);

    let lines: Vec<String> = logger
        .records_at(Level::Info)
        .into_iter()
        .map(|record| record.message)
        .collect();
    assert!(lines.contains(&String::from("Scope GLOBAL (level 0)")));
    assert!(lines.contains(&String::from("Scope f (level 1)")));
    assert!(lines.contains(&String::from("  x: variable integer offset -4")));
    assert!(lines.contains(&String::from("  f: function void params 1")));
    assert!(lines.contains(&String::from("  c: variable char offset -8")));
}

#[test]
fn test_lookup_walks_scope_chain() {
    let mut table = SymbolTable::new();
    let global = table.global();
    let inner = table.create_scope("inner", global, None);
    let innermost = table.create_scope("innermost", inner, None);

    let integer = table.lookup(innermost, "integer").unwrap();
    let symbol = Symbol {
        name: String::from("v"),
        declared_type: Some(integer),
        kind: SymbolKind::Variable { offset: -4 },
        position: Position(1, 1),
    };
    let v = table.define(inner, symbol.clone()).unwrap();

    assert_eq!(table.lookup(innermost, "v"), Some(v));
    assert_eq!(table.lookup_local(innermost, "v"), None);
    assert_eq!(table.lookup(global, "v"), None);
    assert_eq!(table.define(inner, symbol), Err(v));
    assert_eq!(table.scope(innermost).level, 2);
    assert_eq!(table.type_name(v), "integer");
}

#[test]
fn test_enclosing_return_type() {
    let mut table = SymbolTable::new();
    let global = table.global();
    let boolean = table.lookup(global, "boolean").unwrap();
    let function = table.create_scope("f", global, Some(boolean));
    let block = table.create_scope("IF_BLOCK", function, None);

    assert_eq!(table.enclosing_return_type(block), Some((function, boolean)));
    assert_eq!(table.enclosing_return_type(global), None);
}

#[test]
fn test_offset_allocator() {
    let mut offsets = OffsetAllocator::new();

    assert_eq!(offsets.allocate(), -4);
    assert_eq!(offsets.allocate(), -8);
    assert_eq!(offsets.allocate(), -12);
}
