//! Front end for a small expression language: a hand-written lexer feeding a
//! backtracking recursive-descent parser that builds an owned parse tree.

pub mod ast;
pub mod cli;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod printer;
pub mod stream;

pub use ast::{Node, NodeType};
pub use limits::ParserLimits;
pub use parser::{ParseError, Parser, SyntaxErrorKind, parse};
