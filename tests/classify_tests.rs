//! Classifier tests

use proptest::prelude::*;

use mondo::DoError;
use mondo::ast::{BinaryOp, Expr, Literal, RawStmt, UnaryOp};
use mondo::classify::{Statement, Strictness, classify, classify_block};
use mondo::common::Span;

fn stmts(source: &str) -> Vec<RawStmt> {
    mondo::parse(source).unwrap().stmts
}

fn classify_first(source: &str, strictness: Strictness) -> Result<Statement, DoError> {
    classify(&stmts(source)[0], strictness)
}

#[test]
fn test_classify_return() {
    let stmt = classify_first("do return x * 2", Strictness::Lenient).unwrap();
    assert!(matches!(stmt, Statement::Return { .. }));
}

#[test]
fn test_classify_let() {
    let stmt = classify_first("do let x = 1 + 3", Strictness::Lenient).unwrap();
    let Statement::Let { name, .. } = stmt else {
        panic!("Expected let, got {:?}", stmt);
    };
    assert_eq!(name, "x");
}

#[test]
fn test_classify_bind() {
    let stmt = classify_first("do x <- Present(4)", Strictness::Lenient).unwrap();
    let Statement::Bind { name, rhs } = stmt else {
        panic!("Expected bind, got {:?}", stmt);
    };
    assert_eq!(name, "x");
    assert_eq!(rhs.to_string(), "Present(4)");
}

#[test]
fn test_classify_bare_expression_is_discard() {
    let stmt = classify_first("do Present(4)", Strictness::Lenient).unwrap();
    assert!(matches!(stmt, Statement::Discard { .. }));
}

#[test]
fn test_classify_return_wins_over_monadic_rhs() {
    // `return Present(1)` is still a return; the rhs shape does not matter
    let stmt = classify_first("do return Present(1)", Strictness::Lenient).unwrap();
    assert!(matches!(stmt, Statement::Return { .. }));
}

#[test]
fn test_malformed_bind_degrades_to_discard_in_lenient_mode() {
    let stmt = classify_first("do f(x) <- Present(1)", Strictness::Lenient).unwrap();
    let Statement::Discard { rhs } = stmt else {
        panic!("Expected discard, got {:?}", stmt);
    };
    // The intended binding is dropped; only the rhs survives
    assert_eq!(rhs.to_string(), "Present(1)");
}

#[test]
fn test_malformed_bind_is_an_error_in_strict_mode() {
    let result = classify_first("do f(x) <- Present(1)", Strictness::Strict);
    assert!(matches!(result, Err(DoError::MalformedBind { .. })));
}

#[test]
fn test_literal_bind_target_is_malformed() {
    let result = classify_first("do 1 <- Present(1)", Strictness::Strict);
    assert!(matches!(result, Err(DoError::MalformedBind { .. })));
}

#[test]
fn test_classify_block_keeps_order() {
    let block = mondo::parse("do { x <- Present(4); let y = 1; return x + y }").unwrap();
    let classified = classify_block(&block, Strictness::Lenient).unwrap();
    assert_eq!(classified.len(), 3);
    assert!(matches!(&classified[0], Statement::Bind { .. }));
    assert!(matches!(&classified[1], Statement::Let { .. }));
    assert!(matches!(&classified[2], Statement::Return { .. }));
}

// ==================== Properties ====================

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(|n| Expr::Literal {
            value: Literal::Int(n),
            span: Span::default(),
        }),
        any::<bool>().prop_map(|b| Expr::Literal {
            value: Literal::Bool(b),
            span: Span::default(),
        }),
        "[a-z][a-z0-9]{0,5}".prop_map(|name| Expr::Var {
            name,
            span: Span::default(),
        }),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| Expr::Binary {
                op: BinaryOp::Add,
                left: Box::new(left),
                right: Box::new(right),
                span: Span::default(),
            }),
            inner.clone().prop_map(|expr| Expr::Unary {
                op: UnaryOp::Neg,
                expr: Box::new(expr),
                span: Span::default(),
            }),
            (inner.clone(), proptest::collection::vec(inner, 0..3)).prop_map(
                |(callee, args)| Expr::Call {
                    callee: Box::new(callee),
                    args,
                    span: Span::default(),
                }
            ),
        ]
    })
}

fn raw_stmt_strategy() -> impl Strategy<Value = RawStmt> {
    prop_oneof![
        ("[a-z][a-z0-9]{0,5}", expr_strategy()).prop_map(|(name, value)| RawStmt::Let {
            name,
            value,
            span: Span::default(),
        }),
        (expr_strategy(), expr_strategy()).prop_map(|(target, value)| RawStmt::Arrow {
            target,
            value,
            span: Span::default(),
        }),
        expr_strategy().prop_map(|value| RawStmt::Return {
            value,
            span: Span::default(),
        }),
        expr_strategy().prop_map(|value| RawStmt::Expr {
            value,
            span: Span::default(),
        }),
    ]
}

proptest! {
    /// Lenient classification never fails, whatever the statement shape
    #[test]
    fn classification_is_total_in_lenient_mode(stmt in raw_stmt_strategy()) {
        prop_assert!(classify(&stmt, Strictness::Lenient).is_ok());
    }

    /// Strict classification rejects exactly the arrows whose target is
    /// not a bare identifier
    #[test]
    fn strict_mode_rejects_only_malformed_binds(stmt in raw_stmt_strategy()) {
        let result = classify(&stmt, Strictness::Strict);
        match &stmt {
            RawStmt::Arrow { target, .. } if target.as_var().is_none() => {
                prop_assert!(matches!(result, Err(DoError::MalformedBind { .. })), "expected MalformedBind error, got {:?}", result);
            }
            _ => prop_assert!(result.is_ok()),
        }
    }
}
