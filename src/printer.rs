//! Human-readable dumps of tokens and parse trees, one line per item.

use crate::ast::Node;
use crate::lexer::{Token, TokenKind};

pub fn format_token(token: &Token) -> String {
    let len = token.len;
    match &token.kind {
        TokenKind::Name(name) => format!("NAME\t({}): {}", len, name),
        TokenKind::Int(value) => format!("INT\t({}): {}", len, value),
        TokenKind::Str(s) => format!("STR\t({}): \"{}\"", len, s),
        TokenKind::Real(value) => format!("REAL\t({}): {:.6}", len, value),
        TokenKind::Eof => "EOF".to_string(),
        TokenKind::Error(kind) => format!("ERROR: {}", kind),
        other => format!("{}\t({})", other.label(), len),
    }
}

/// Indented tree dump; children sit two spaces deeper than their parent
pub fn format_ast(node: &Node, level: usize) -> String {
    let mut out = String::new();
    write_ast(node, level, &mut out);
    out
}

fn write_ast(node: &Node, level: usize, out: &mut String) {
    out.push_str(&" ".repeat(level));
    out.push_str(node.node_type().label());

    if let Node::Literal(token) = node {
        out.push_str(": ");
        out.push_str(&format_token(token));
        out.push('\n');
        return;
    }

    out.push('\n');
    for child in node.children() {
        write_ast(child, level + 2, out);
    }
}
