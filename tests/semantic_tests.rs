use tinyc::parser::ast::{Program, Stmt, TypeName};
use tinyc::semantic::{Diagnostic, DiagnosticKind, SemanticAnalyzer};

fn parse_ok(source: &str) -> Program {
    tinyc::parser::parse(tinyc::lexer::lex(source)).expect("parse should succeed")
}

fn diagnostics(source: &str) -> Vec<Diagnostic> {
    tinyc::semantic::analyze(&parse_ok(source))
}

fn kinds(source: &str) -> Vec<DiagnosticKind> {
    diagnostics(source).into_iter().map(|d| d.kind).collect()
}

#[test]
fn accepts_well_typed_program() {
    let source = "mainn(){ intt x = 1; sttring s = \"hi\"; x = x + 2; prrint(s); san(x); }";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn records_declared_symbols() {
    let program = parse_ok("mainn(){ intt x; sttring s; }");
    let mut analyzer = SemanticAnalyzer::new();
    assert!(analyzer.analyze(&program).is_empty());
    assert!(!analyzer.has_errors());
    assert_eq!(analyzer.symbols()["x"].ty, TypeName::Int);
    assert_eq!(analyzer.symbols()["s"].ty, TypeName::Str);
}

#[test]
fn reports_redeclaration_once() {
    let found = diagnostics("mainn(){ intt x; intt x; }");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::Redeclaration);
    assert_eq!(found[0].message, "Error: Redeclaration of variable 'x'");
}

#[test]
fn reports_each_undeclared_occurrence_once() {
    let found = diagnostics("mainn(){ intt x = y + y; z = 1; }");
    let messages: Vec<&str> = found.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Error: Undeclared variable 'y'",
            "Error: Undeclared variable 'y'",
            "Error: Assignment to undeclared variable 'z'",
        ]
    );
}

#[test]
fn checks_right_side_of_undeclared_assignment() {
    assert_eq!(
        kinds("mainn(){ z = w; }"),
        vec![
            DiagnosticKind::UndeclaredVariable,
            DiagnosticKind::UndeclaredVariable
        ]
    );
}

#[test]
fn reports_declaration_type_mismatch() {
    let found = diagnostics("mainn(){ intt x = \"a\"; }");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::TypeMismatch);
    assert_eq!(
        found[0].message,
        "Type Error: Cannot assign type 'sttring' to variable 'x' of type 'intt'"
    );
}

#[test]
fn reports_assignment_type_mismatch() {
    assert_eq!(
        kinds("mainn(){ sttring s; s = 4; }"),
        vec![DiagnosticKind::TypeMismatch]
    );
}

#[test]
fn mixed_arithmetic_is_reported_without_cascade() {
    let found = diagnostics("mainn(){ sttring s = \"a\"; intt n = s + 1; }");
    assert_eq!(found.len(), 1);
    assert!(found[0].message.contains("Mismatched types 'sttring' and 'intt'"));
}

#[test]
fn comparisons_yield_int() {
    let source = "mainn(){ sttring a = \"x\"; intt b = a == a; intt c = 1 < 2 && b; }";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn loop_control_outside_loop_is_rejected() {
    let found = diagnostics("mainn(){ brreak; conttinue; }");
    let messages: Vec<&str> = found.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Error: 'brreak' used outside of loop",
            "Error: 'conttinue' used outside of loop",
        ]
    );
}

#[test]
fn loop_control_inside_nested_blocks_is_accepted() {
    let source = "mainn(){ intt i = 0; loop (i < 3) { iif (i == 1) { brreak; } ellse { conttinue; } } }";
    assert!(diagnostics(source).is_empty());
}

#[test]
fn return_value_must_match_program_type() {
    assert_eq!(
        kinds("mainn(){ retturn \"s\"; }"),
        vec![DiagnosticKind::ReturnTypeMismatch]
    );
    assert!(diagnostics("sttring mainn(){ retturn \"s\"; }").is_empty());
    assert!(diagnostics("mainn(){ retturn; }").is_empty());
}

#[test]
fn builtins_require_one_argument() {
    let found = diagnostics("mainn(){ prrint(); }");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::ArityMismatch);
    assert_eq!(found[0].message, "Error: 'prrint' expects exactly one argument");
}

#[test]
fn san_accepts_only_int() {
    let found = diagnostics("mainn(){ san(\"a\"); }");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::TypeMismatch);
    assert!(found[0].message.contains("'san' argument must be intt"));
}

#[test]
fn unknown_callee_is_reported() {
    let program = Program {
        return_type: TypeName::Int,
        body: vec![Stmt::Call {
            callee: "foo".to_string(),
            arg: None,
        }],
    };
    let found = tinyc::semantic::analyze(&program);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, DiagnosticKind::UnknownFunction);
    assert_eq!(found[0].message, "Error: Unknown function 'foo'");
}

#[test]
fn analyzer_resets_between_runs() {
    let mut analyzer = SemanticAnalyzer::new();
    assert_eq!(analyzer.analyze(&parse_ok("mainn(){ intt x; intt x; }")).len(), 1);
    assert!(analyzer.analyze(&parse_ok("mainn(){ intt x; }")).is_empty());
}
