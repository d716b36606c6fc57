//! Parser for the do-block surface language
//!
//! A recursive descent parser that locates the do-block in a token stream
//! and parses its body into an ordered sequence of raw statements.

use crate::ast::*;
use crate::common::Span;
use crate::diagnostics::{DoError, Result, SourceFile};
use crate::lexer::{Token, TokenKind};

/// Locate the do-block in a token stream and parse its body
///
/// The `do` keyword may appear anywhere in the stream, so sources like
/// `let m = do { ... }` work. A stream with no `do` token is a
/// `BlockNotFound` error. A brace-less body (`do expr`) is normalized to a
/// one-statement block.
pub fn parse(tokens: &[Token], source: &str) -> Result<DoBlock> {
    let start = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Do)
        .ok_or_else(|| DoError::BlockNotFound {
            src: SourceFile::new("<do-block>", source).to_named_source(),
        })?;

    let mut parser = Parser::new(&tokens[start..], source);
    let block = parser.parse_do_block()?;
    tracing::debug!(statements = block.len(), "parsed do-block");
    Ok(block)
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    src: SourceFile,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            src: SourceFile::new("<do-block>", source),
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should have at least EOF")
        })
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> &Token {
        let tok = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        // Return the token that was at the previous position
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(&format!("{:?}", kind)))
        }
    }

    fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token
    fn prev_span(&self) -> Span {
        self.tokens[self.pos.saturating_sub(1)].span
    }

    fn error_expected(&self, expected: &str) -> DoError {
        let tok = self.current();
        if tok.kind == TokenKind::Eof {
            DoError::UnexpectedEof {
                span: tok.span.into(),
                src: self.src.to_named_source(),
            }
        } else {
            DoError::UnexpectedToken {
                expected: expected.to_string(),
                found: format!("{:?}", tok.kind),
                span: tok.span.into(),
                src: self.src.to_named_source(),
            }
        }
    }

    // ==================== BLOCK ====================

    fn parse_do_block(&mut self) -> Result<DoBlock> {
        let start = self.span();
        self.expect(TokenKind::Do)?;

        let mut stmts = Vec::new();

        if self.at(TokenKind::LBrace) {
            self.advance();
            while !self.at(TokenKind::RBrace) {
                if self.at(TokenKind::Eof) {
                    return Err(self.error_expected("}"));
                }
                stmts.push(self.parse_stmt()?);
                // Statements are `;`-separated with an optional trailing `;`
                if self.at(TokenKind::Semi) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RBrace)?;
        } else {
            // A single-statement body has no braces, normalize it.
            stmts.push(self.parse_stmt()?);
        }

        Ok(DoBlock {
            stmts,
            span: start.merge(self.prev_span()),
        })
    }

    // ==================== STATEMENTS ====================

    fn parse_stmt(&mut self) -> Result<RawStmt> {
        let start = self.span();

        match self.peek() {
            TokenKind::Let => {
                self.advance();
                let name = self.parse_ident()?;
                self.expect(TokenKind::Eq)?;
                let value = self.parse_expr()?;
                Ok(RawStmt::Let {
                    name,
                    value,
                    span: start.merge(self.prev_span()),
                })
            }
            TokenKind::Return => {
                self.advance();
                let value = self.parse_expr()?;
                Ok(RawStmt::Return {
                    value,
                    span: start.merge(self.prev_span()),
                })
            }
            _ => {
                let expr = self.parse_expr()?;
                if self.at(TokenKind::LeftArrow) {
                    self.advance();
                    let value = self.parse_expr()?;
                    Ok(RawStmt::Arrow {
                        target: expr,
                        value,
                        span: start.merge(self.prev_span()),
                    })
                } else {
                    Ok(RawStmt::Expr {
                        value: expr,
                        span: start.merge(self.prev_span()),
                    })
                }
            }
        }
    }

    fn parse_ident(&mut self) -> Result<String> {
        if self.at(TokenKind::Ident) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.error_expected("identifier"))
        }
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_expr_with_precedence(0)
    }

    fn parse_expr_with_precedence(&mut self, min_prec: u8) -> Result<Expr> {
        let mut left = self.parse_unary()?;

        while let Some((op, prec)) = self.binary_op_info() {
            if prec < min_prec {
                break;
            }

            self.advance();
            // All operators are left-associative
            let right = self.parse_expr_with_precedence(prec + 1)?;

            let span = left.span().merge(right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn binary_op_info(&self) -> Option<(BinaryOp, u8)> {
        let (op, prec) = match self.peek() {
            TokenKind::PipePipe => (BinaryOp::Or, 1),
            TokenKind::AmpAmp => (BinaryOp::And, 2),
            TokenKind::EqEq => (BinaryOp::Eq, 3),
            TokenKind::Ne => (BinaryOp::Ne, 3),
            TokenKind::Lt => (BinaryOp::Lt, 4),
            TokenKind::Le => (BinaryOp::Le, 4),
            TokenKind::Gt => (BinaryOp::Gt, 4),
            TokenKind::Ge => (BinaryOp::Ge, 4),
            TokenKind::Plus => (BinaryOp::Add, 5),
            TokenKind::Minus => (BinaryOp::Sub, 5),
            TokenKind::Star => (BinaryOp::Mul, 6),
            TokenKind::Slash => (BinaryOp::Div, 6),
            TokenKind::Percent => (BinaryOp::Rem, 6),
            _ => return None,
        };
        Some((op, prec))
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek() {
            TokenKind::Minus => {
                let start = self.span();
                self.advance();
                let expr = self.parse_unary()?;
                let span = start.merge(expr.span());
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    expr: Box::new(expr),
                    span,
                })
            }
            TokenKind::Bang => {
                let start = self.span();
                self.advance();
                let expr = self.parse_unary()?;
                let span = start.merge(expr.span());
                Ok(Expr::Unary {
                    op: UnaryOp::Not,
                    expr: Box::new(expr),
                    span,
                })
            }
            _ => self.parse_postfix(),
        }
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;

        while self.at(TokenKind::LParen) {
            self.advance();
            let mut args = Vec::new();
            while !self.at(TokenKind::RParen) {
                args.push(self.parse_expr()?);
                if !self.at(TokenKind::RParen) {
                    self.expect(TokenKind::Comma)?;
                }
            }
            self.expect(TokenKind::RParen)?;
            let span = expr.span().merge(self.prev_span());
            expr = Expr::Call {
                callee: Box::new(expr),
                args,
                span,
            };
        }

        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek() {
            // Literals
            TokenKind::IntLit => {
                let tok = self.advance();
                let span = tok.span;
                let value: i64 = tok.text.replace('_', "").parse().unwrap_or(0);
                Ok(Expr::Literal {
                    value: Literal::Int(value),
                    span,
                })
            }
            TokenKind::FloatLit => {
                let tok = self.advance();
                let span = tok.span;
                let value: f64 = tok.text.replace('_', "").parse().unwrap_or(0.0);
                Ok(Expr::Literal {
                    value: Literal::Float(value),
                    span,
                })
            }
            TokenKind::StringLit => {
                let tok = self.advance();
                let span = tok.span;
                // Remove quotes
                let value = tok.text[1..tok.text.len() - 1].to_string();
                Ok(Expr::Literal {
                    value: Literal::String(value),
                    span,
                })
            }
            TokenKind::True => {
                let span = self.advance().span;
                Ok(Expr::Literal {
                    value: Literal::Bool(true),
                    span,
                })
            }
            TokenKind::False => {
                let span = self.advance().span;
                Ok(Expr::Literal {
                    value: Literal::Bool(false),
                    span,
                })
            }

            // Identifiers
            TokenKind::Ident => {
                let tok = self.advance();
                Ok(Expr::Var {
                    name: tok.text.clone(),
                    span: tok.span,
                })
            }

            // Grouped expression
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            // Conditional expression
            TokenKind::If => self.parse_if(),

            _ => Err(self.error_expected("expression")),
        }
    }

    fn parse_if(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::If)?;
        let condition = self.parse_expr()?;

        self.expect(TokenKind::LBrace)?;
        let then_branch = self.parse_expr()?;
        self.expect(TokenKind::RBrace)?;

        self.expect(TokenKind::Else)?;
        let else_branch = if self.at(TokenKind::If) {
            self.parse_if()?
        } else {
            self.expect(TokenKind::LBrace)?;
            let expr = self.parse_expr()?;
            self.expect(TokenKind::RBrace)?;
            expr
        };

        let span = start.merge(self.prev_span());
        Ok(Expr::If {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            span,
        })
    }
}
