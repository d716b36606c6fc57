//! Lexer for the do-block surface language

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::{DoError, Result, SourceFile};
use logos::Logos;

/// Lex source text into a token stream
///
/// The returned stream always ends with an `Eof` token so the parser never
/// runs off the end.
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        match result {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                return Err(DoError::UnknownToken {
                    span: span.into(),
                    src: SourceFile::new("<do-block>", source).to_named_source(),
                });
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(source.len(), source.len()),
        text: String::new(),
    });

    Ok(tokens)
}
