use crate::lexer::{LexError, Position};
use thiserror::Error;

/// What a committed rule was missing when it gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    #[error("invalid syntax")]
    InvalidSyntax,
    #[error("unclosed brace")]
    UnclosedBrace,
    #[error("unclosed paren")]
    UnclosedParen,
    #[error("invalid function definition")]
    InvalidFunctionDefinition,
    #[error("expected block for function body")]
    ExpectedFunctionBody,
    #[error("expected expression")]
    ExpectedExpression,
    #[error("expected semicolon")]
    ExpectedSemicolon,
    #[error("expected EOF")]
    ExpectedEof,
}

/// Unrecoverable parse failure. A rule that merely did not match is
/// `Ok(None)`, never one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("Parse error at {line}:{column}: {kind}")]
    Syntax {
        kind: SyntaxErrorKind,
        line: usize,
        column: usize,
    },

    #[error("Pushback capacity of {capacity} tokens exceeded")]
    PushbackOverflow { capacity: usize },

    #[error("Limit exceeded: {what} is {actual} (max {max})")]
    LimitExceeded {
        what: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("Parsing nesting too deep: {depth} levels (max {max}). Consider simplifying.")]
    NestingTooDeep { depth: usize, max: usize },
}

impl ParseError {
    pub(crate) fn syntax(source: &str, offset: usize, kind: SyntaxErrorKind) -> Self {
        let pos = Position::locate(source, offset);
        Self::Syntax {
            kind,
            line: pos.line,
            column: pos.column,
        }
    }

    pub fn syntax_kind(&self) -> Option<SyntaxErrorKind> {
        match self {
            Self::Syntax { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
