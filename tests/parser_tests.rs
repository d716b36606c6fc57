//! Parser tests

use pretty_assertions::assert_eq;

use mondo::DoError;
use mondo::ast::{BinaryOp, DoBlock, Expr, Literal, RawStmt, UnaryOp};
use mondo::parse;

fn parse_block(source: &str) -> DoBlock {
    parse(source).unwrap()
}

#[test]
fn test_parse_braced_block() {
    let block = parse_block("do { Present(4); Present(5) }");
    assert_eq!(block.len(), 2);
}

#[test]
fn test_parse_single_statement_normalizes() {
    // A brace-less body becomes a one-statement block
    let block = parse_block("do Present(4)");
    assert_eq!(block.len(), 1);
    assert!(matches!(&block.stmts[0], RawStmt::Expr { .. }));
}

#[test]
fn test_parse_block_assigned_to_variable() {
    let block = parse_block("let m = do { Present(1) }");
    assert_eq!(block.len(), 1);
}

#[test]
fn test_parse_missing_do_is_block_not_found() {
    let result = parse("Present(4)");
    assert!(matches!(result, Err(DoError::BlockNotFound { .. })));
}

#[test]
fn test_parse_trailing_semicolon() {
    let block = parse_block("do { Present(4); }");
    assert_eq!(block.len(), 1);
}

#[test]
fn test_parse_empty_block() {
    let block = parse_block("do { }");
    assert!(block.is_empty());
}

#[test]
fn test_parse_arrow_statement() {
    let block = parse_block("do { x <- Present(4) }");
    let RawStmt::Arrow { target, value, .. } = &block.stmts[0] else {
        panic!("Expected arrow statement, got {:?}", block.stmts[0]);
    };
    assert_eq!(target.as_var(), Some("x"));
    assert!(matches!(value, Expr::Call { .. }));
}

#[test]
fn test_parse_let_statement() {
    let block = parse_block("do { let x = 1 + 3 }");
    let RawStmt::Let { name, value, .. } = &block.stmts[0] else {
        panic!("Expected let statement, got {:?}", block.stmts[0]);
    };
    assert_eq!(name, "x");
    assert!(matches!(
        value,
        Expr::Binary {
            op: BinaryOp::Add,
            ..
        }
    ));
}

#[test]
fn test_parse_return_statement() {
    let block = parse_block("do { return x * 2 }");
    assert!(matches!(&block.stmts[0], RawStmt::Return { .. }));
}

#[test]
fn test_parse_precedence() {
    let block = parse_block("do 1 + 2 * 3");
    let RawStmt::Expr { value, .. } = &block.stmts[0] else {
        panic!("Expected expression statement");
    };
    let Expr::Binary {
        op: BinaryOp::Add,
        right,
        ..
    } = value
    else {
        panic!("Expected addition at the top, got {}", value);
    };
    assert!(matches!(
        right.as_ref(),
        Expr::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn test_parse_comparison_with_negation_is_just_an_expression() {
    // The historical `x < -m` encoding of bind is an ordinary comparison
    // in this syntax
    let block = parse_block("do { x < -m }");
    let RawStmt::Expr { value, .. } = &block.stmts[0] else {
        panic!("Expected expression statement, got {:?}", block.stmts[0]);
    };
    let Expr::Binary {
        op: BinaryOp::Lt,
        right,
        ..
    } = value
    else {
        panic!("Expected comparison, got {}", value);
    };
    assert!(matches!(
        right.as_ref(),
        Expr::Unary {
            op: UnaryOp::Neg,
            ..
        }
    ));
}

#[test]
fn test_parse_if_expression() {
    let block = parse_block(r#"do { y <- if x == "bar" { Absent } else { Present("ok") } }"#);
    let RawStmt::Arrow { value, .. } = &block.stmts[0] else {
        panic!("Expected arrow statement, got {:?}", block.stmts[0]);
    };
    assert!(matches!(value, Expr::If { .. }));
}

#[test]
fn test_parse_call_arguments() {
    let block = parse_block("do f(1, x, g(2))");
    let RawStmt::Expr { value, .. } = &block.stmts[0] else {
        panic!("Expected expression statement");
    };
    let Expr::Call { args, .. } = value else {
        panic!("Expected call, got {}", value);
    };
    assert_eq!(args.len(), 3);
}

#[test]
fn test_parse_string_literal_drops_quotes() {
    let block = parse_block(r#"do "hello""#);
    let RawStmt::Expr { value, .. } = &block.stmts[0] else {
        panic!("Expected expression statement");
    };
    assert!(matches!(
        value,
        Expr::Literal {
            value: Literal::String(s),
            ..
        } if s == "hello"
    ));
}

#[test]
fn test_parse_unclosed_block_is_unexpected_eof() {
    let result = parse("do { Present(4)");
    assert!(matches!(result, Err(DoError::UnexpectedEof { .. })));
}

#[test]
fn test_parse_missing_separator_is_rejected() {
    let result = parse("do { Present(4) Present(5) }");
    assert!(matches!(result, Err(DoError::UnexpectedToken { .. })));
}

#[test]
fn test_ast_serializes_for_dumps() {
    let block = parse_block("do { x <- Present(4) }");
    let json = serde_json::to_string(&block).unwrap();
    assert!(json.contains("Arrow"));
}

#[test]
fn test_rendered_expression_reparses_identically() {
    let block = parse_block("do (1 + 2) * -f(x, 3)");
    let RawStmt::Expr { value, .. } = &block.stmts[0] else {
        panic!("Expected expression statement");
    };
    let rendered = value.to_string();
    let reparsed = parse_block(&format!("do {}", rendered));
    let RawStmt::Expr { value: again, .. } = &reparsed.stmts[0] else {
        panic!("Expected expression statement after rendering");
    };
    assert_eq!(rendered, again.to_string());
}
