use tinyc::parser::ast::{BinaryOp, Expr, Program, Stmt, TypeName};
use tinyc::parser::{ParseError, MAX_NESTING};

fn parse_source(source: &str) -> Result<Program, ParseError> {
    tinyc::parser::parse(tinyc::lexer::lex(source))
}

fn parse_ok(source: &str) -> Program {
    parse_source(source).expect("parse should succeed")
}

fn parse_err(source: &str) -> ParseError {
    parse_source(source).expect_err("parse should fail")
}

fn num(digits: &str) -> Expr {
    Expr::Number(digits.to_string())
}

fn ident(name: &str) -> Expr {
    Expr::Identifier(name.to_string())
}

fn initializer_of(program: &Program) -> &Expr {
    match &program.body[0] {
        Stmt::Declaration {
            initializer: Some(expr),
            ..
        } => expr,
        other => panic!("expected declaration with initializer, got {:?}", other),
    }
}

#[test]
fn parses_empty_program() {
    let program = parse_ok("mainn(){}");
    assert_eq!(program.return_type, TypeName::Int);
    assert!(program.body.is_empty());
}

#[test]
fn parses_optional_return_type() {
    assert_eq!(parse_ok("sttring mainn(){}").return_type, TypeName::Str);
    assert_eq!(parse_ok("intt mainn(){}").return_type, TypeName::Int);
}

#[test]
fn parses_declarations_with_and_without_initializer() {
    let program = parse_ok("mainn(){ intt x; sttring s = \"a\"; }");
    assert_eq!(
        program.body,
        vec![
            Stmt::Declaration {
                ty: TypeName::Int,
                name: "x".to_string(),
                initializer: None,
            },
            Stmt::Declaration {
                ty: TypeName::Str,
                name: "s".to_string(),
                initializer: Some(Expr::Str("\"a\"".to_string())),
            },
        ]
    );
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_ok("mainn(){ intt x = 1 + 2 * 3; }");
    assert_eq!(
        initializer_of(&program),
        &Expr::binary(
            num("1"),
            BinaryOp::Add,
            Expr::binary(num("2"), BinaryOp::Multiply, num("3"))
        )
    );
}

#[test]
fn binary_operators_are_left_associative() {
    let program = parse_ok("mainn(){ intt x = 1 - 2 - 3; }");
    assert_eq!(
        initializer_of(&program),
        &Expr::binary(
            Expr::binary(num("1"), BinaryOp::Subtract, num("2")),
            BinaryOp::Subtract,
            num("3")
        )
    );
}

#[test]
fn parentheses_override_precedence() {
    let program = parse_ok("mainn(){ intt x = (1 + 2) * 3; }");
    assert_eq!(
        initializer_of(&program),
        &Expr::binary(
            Expr::binary(num("1"), BinaryOp::Add, num("2")),
            BinaryOp::Multiply,
            num("3")
        )
    );
}

#[test]
fn logical_operators_bind_loosest() {
    let program = parse_ok("mainn(){ intt b = a < 2 && c > 1; }");
    assert_eq!(
        initializer_of(&program),
        &Expr::binary(
            Expr::binary(ident("a"), BinaryOp::Less, num("2")),
            BinaryOp::And,
            Expr::binary(ident("c"), BinaryOp::Greater, num("1"))
        )
    );
}

#[test]
fn parses_if_else_and_loop() {
    let program = parse_ok(
        "mainn(){ iif (x == 1) { prrint(1); } ellse { prrint(2); } loop (x < 3) { x = x + 1; } }",
    );
    assert!(matches!(
        &program.body[0],
        Stmt::If {
            else_branch: Some(body),
            ..
        } if body.len() == 1
    ));
    assert!(matches!(&program.body[1], Stmt::Loop { body, .. } if body.len() == 1));
}

#[test]
fn parses_calls_returns_and_loop_control() {
    let program = parse_ok("mainn(){ prrint(x); san(); retturn; retturn 1; brreak; conttinue; }");
    assert_eq!(
        program.body,
        vec![
            Stmt::Call {
                callee: "prrint".to_string(),
                arg: Some(ident("x")),
            },
            Stmt::Call {
                callee: "san".to_string(),
                arg: None,
            },
            Stmt::Return { value: None },
            Stmt::Return {
                value: Some(num("1"))
            },
            Stmt::Break,
            Stmt::Continue,
        ]
    );
}

#[test]
fn ignores_tokens_after_closing_brace() {
    let program = parse_ok("mainn(){ prrint(1); } trailing junk");
    assert_eq!(program.body.len(), 1);
}

#[test]
fn reports_missing_closing_brace_at_eof() {
    let err = parse_err("mainn(){ intt x = 1;");
    assert_eq!(err.message, "Expected '}' at end of mainn");
    assert_eq!(err.found, "EOF");
    assert_eq!(
        err.to_string(),
        "Syntax Error: Expected '}' at end of mainn at token: 'EOF'"
    );
}

#[test]
fn reports_missing_entry_point() {
    let err = parse_err("main(){}");
    assert_eq!(err.message, "Expected 'mainn'");
    assert_eq!(err.found, "main");
}

#[test]
fn reports_assignment_without_equals() {
    let err = parse_err("mainn(){ x 1; }");
    assert_eq!(err.message, "Expected '=' after identifier");
    assert_eq!(err.found, "1");
}

#[test]
fn reports_invalid_factor() {
    let err = parse_err("mainn(){ intt x = ; }");
    assert_eq!(err.message, "Invalid factor");
    assert_eq!(err.found, ";");
}

#[test]
fn reports_statement_starting_with_unexpected_token() {
    let err = parse_err("mainn(){ 5; }");
    assert_eq!(err.message, "Unknown or invalid statement");
    assert_eq!((err.line, err.column), (1, 10));
}

#[test]
fn renders_parse_tree() {
    let program = parse_ok("mainn(){ intt x = 2 + 3; prrint(x); }");
    let expected = "\
PROGRAM_NODE: mainn
  STATEMENT_NODE: stmt_list
    DECLARATION_NODE: intt x
      EXPRESSION_NODE: +
        NUMBER_NODE: 2
        NUMBER_NODE: 3
    FUNCTION_CALL_NODE: prrint
      IDENTIFIER_NODE: x
";
    assert_eq!(tinyc::parser::printer::render_tree(&program), expected);
}

#[test]
fn parsing_is_deterministic() {
    let source = "mainn(){ intt i = 0; loop (i < 3) { iif (i == 1) { brreak; } i = i + 1; } }";
    let first = parse_ok(source);
    let second = parse_ok(source);
    assert_eq!(first, second);
    assert_eq!(
        tinyc::parser::printer::render_tree(&first),
        tinyc::parser::printer::render_tree(&second)
    );
}

fn parenthesised(depth: usize) -> String {
    format!("mainn(){{ prrint({}1{}); }}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn accepts_moderate_parenthesis_nesting() {
    let program = parse_ok(&parenthesised(MAX_NESTING / 2));
    assert_eq!(
        program.body,
        vec![Stmt::Call {
            callee: "prrint".to_string(),
            arg: Some(num("1")),
        }]
    );
}

#[test]
fn rejects_parentheses_nested_past_the_limit() {
    let err = parse_err(&parenthesised(20_000));
    assert_eq!(err.message, "Expression nested too deeply");
    assert_eq!(err.found, "(");
}

#[test]
fn rejects_operator_chains_past_the_limit() {
    let chain = |links: usize| format!("mainn(){{ intt x = 1{}; }}", " + 1".repeat(links));
    assert!(parse_source(&chain(MAX_NESTING / 2)).is_ok());

    let err = parse_err(&chain(20_000));
    assert_eq!(err.message, "Expression nested too deeply");
}

#[test]
fn rejects_blocks_nested_past_the_limit() {
    let depth = MAX_NESTING + 10;
    let source = format!(
        "mainn(){{ {}prrint(1);{} }}",
        "loop (1) { ".repeat(depth),
        " }".repeat(depth)
    );
    let err = parse_err(&source);
    assert!(err.message.ends_with("nested too deeply"), "{}", err.message);
}

#[test]
fn nesting_budget_is_released_between_statements() {
    let nested = format!("intt x = {}1{};", "(".repeat(100), ")".repeat(100));
    let source = format!("mainn(){{ {} }}", nested.repeat(10));
    assert_eq!(parse_ok(&source).body.len(), 10);
}
