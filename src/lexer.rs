use bitflags::bitflags;
use thiserror::Error;

// Token types

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals (carry a payload)
    Name(String),
    Int(i64),
    Str(String),
    Real(f64),

    // Punctuation
    LeftArrow,  // <-
    RightArrow, // =>
    LParen,     // (
    RParen,     // )
    Semicolon,  // ;
    LBrace,     // {
    RBrace,     // }
    Fn,         // fn
    Equals,     // =

    // Trivia
    Whitespace,
    Comment, // # ... end of line

    // Special
    Eof,
    Error(LexErrorKind),
}

bitflags! {
    /// A set of token kinds, ignoring payloads.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenSet: u32 {
        const NAME        = 1 << 0;
        const INT         = 1 << 1;
        const STR         = 1 << 2;
        const REAL        = 1 << 3;
        const LEFT_ARROW  = 1 << 4;
        const RIGHT_ARROW = 1 << 5;
        const LPAREN      = 1 << 6;
        const RPAREN      = 1 << 7;
        const SEMICOLON   = 1 << 8;
        const LBRACE      = 1 << 9;
        const RBRACE      = 1 << 10;
        const FN          = 1 << 11;
        const EQUALS      = 1 << 12;
        const WHITESPACE  = 1 << 13;
        const COMMENT     = 1 << 14;
        const EOF         = 1 << 15;
        const ERROR       = 1 << 16;

        /// Tokens that form a Literal node on their own
        const LITERAL = Self::NAME.bits() | Self::INT.bits() | Self::STR.bits() | Self::REAL.bits();
        /// Tokens the stream never hands to the parser
        const TRIVIA = Self::WHITESPACE.bits() | Self::COMMENT.bits();
    }
}

impl TokenKind {
    pub fn set(&self) -> TokenSet {
        match self {
            TokenKind::Name(_) => TokenSet::NAME,
            TokenKind::Int(_) => TokenSet::INT,
            TokenKind::Str(_) => TokenSet::STR,
            TokenKind::Real(_) => TokenSet::REAL,
            TokenKind::LeftArrow => TokenSet::LEFT_ARROW,
            TokenKind::RightArrow => TokenSet::RIGHT_ARROW,
            TokenKind::LParen => TokenSet::LPAREN,
            TokenKind::RParen => TokenSet::RPAREN,
            TokenKind::Semicolon => TokenSet::SEMICOLON,
            TokenKind::LBrace => TokenSet::LBRACE,
            TokenKind::RBrace => TokenSet::RBRACE,
            TokenKind::Fn => TokenSet::FN,
            TokenKind::Equals => TokenSet::EQUALS,
            TokenKind::Whitespace => TokenSet::WHITESPACE,
            TokenKind::Comment => TokenSet::COMMENT,
            TokenKind::Eof => TokenSet::EOF,
            TokenKind::Error(_) => TokenSet::ERROR,
        }
    }

    pub fn is(&self, set: TokenSet) -> bool {
        set.contains(self.set())
    }

    /// Upper-case tag used by the debug printers
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::Name(_) => "NAME",
            TokenKind::Int(_) => "INT",
            TokenKind::Str(_) => "STR",
            TokenKind::Real(_) => "REAL",
            TokenKind::LeftArrow => "LARROW",
            TokenKind::RightArrow => "RARROW",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Fn => "FN",
            TokenKind::Equals => "EQUALS",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Eof => "EOF",
            TokenKind::Error(_) => "ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize, // Byte offset into the source
    pub len: usize,   // Bytes consumed; 0 only for Eof
}

impl Token {
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Payload text of names and string literals
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Name(s) | TokenKind::Str(s) => Some(s),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("integer literal out of range")]
    IntegerOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical error at {line}:{column}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn at(source: &str, offset: usize, kind: LexErrorKind) -> Self {
        let pos = Position::locate(source, offset);
        Self {
            kind,
            line: pos.line,
            column: pos.column,
        }
    }
}

/// 1-indexed line and column of a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let column = match source.get(line_start..offset) {
            Some(s) => s.chars().count() + 1,
            None => offset - line_start + 1,
        };
        Self { line, column }
    }
}

// Lexer

/// Lex the single token starting at `offset`.
///
/// Never fails: problems are reported as an `Error` token so the caller
/// decides how to surface them.
pub fn lex(source: &str, offset: usize) -> Token {
    let rest = source.as_bytes().get(offset..).unwrap_or(&[]);
    let token = |kind, len| Token {
        kind,
        start: offset,
        len,
    };

    let Some(&first) = rest.first() else {
        return token(TokenKind::Eof, 0);
    };

    let spaces = rest.iter().take_while(|&&b| is_space(b)).count();
    if spaces > 0 {
        return token(TokenKind::Whitespace, spaces);
    }

    match first {
        b'(' => return token(TokenKind::LParen, 1),
        b')' => return token(TokenKind::RParen, 1),
        b'{' => return token(TokenKind::LBrace, 1),
        b'}' => return token(TokenKind::RBrace, 1),
        b';' => return token(TokenKind::Semicolon, 1),
        b'#' => {
            let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            return token(TokenKind::Comment, len);
        }
        _ => {}
    }

    // Two-character tokens before `=`
    match (first, rest.get(1).copied()) {
        (b'f', Some(b'n')) => return token(TokenKind::Fn, 2),
        (b'=', Some(b'>')) => return token(TokenKind::RightArrow, 2),
        (b'<', Some(b'-')) => return token(TokenKind::LeftArrow, 2),
        (b'=', _) => return token(TokenKind::Equals, 1),
        _ => {}
    }

    if first == b'"' {
        return lex_string(source, offset, rest);
    }
    if first.is_ascii_digit() {
        return lex_number(source, offset, rest);
    }
    if is_name_byte(first) {
        let len = rest.iter().take_while(|&&b| is_name_byte(b)).count();
        let name = source[offset..offset + len].to_string();
        return token(TokenKind::Name(name), len);
    }

    let ch = source
        .get(offset..)
        .and_then(|s| s.chars().next())
        .unwrap_or(char::from(first));
    token(
        TokenKind::Error(LexErrorKind::UnexpectedCharacter(ch)),
        ch.len_utf8(),
    )
}

// Strings run to the next quote; there are no escapes
fn lex_string(source: &str, offset: usize, rest: &[u8]) -> Token {
    match rest[1..].iter().position(|&b| b == b'"') {
        Some(content_len) => Token {
            kind: TokenKind::Str(source[offset + 1..offset + 1 + content_len].to_string()),
            start: offset,
            len: content_len + 2,
        },
        None => Token {
            kind: TokenKind::Error(LexErrorKind::UnterminatedString),
            start: offset,
            len: rest.len(),
        },
    }
}

fn lex_number(source: &str, offset: usize, rest: &[u8]) -> Token {
    let digits = count_digits(rest);

    if rest.get(digits) != Some(&b'.') {
        let text = &source[offset..offset + digits];
        let kind = match text.parse::<i64>() {
            Ok(value) => TokenKind::Int(value),
            Err(_) => TokenKind::Error(LexErrorKind::IntegerOutOfRange),
        };
        return Token {
            kind,
            start: offset,
            len: digits,
        };
    }

    let len = digits + 1 + count_digits(&rest[digits + 1..]);
    let text = &source[offset..offset + len];
    // "1." is accepted, matching the digits-dot-digits* shape
    let value = text.parse::<f64>().unwrap_or(0.0);
    Token {
        kind: TokenKind::Real(value),
        start: offset,
        len,
    }
}

// Helper functions

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// Same set as C's isspace in the "C" locale
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Bytes that may appear in a name. Non-ASCII bytes are accepted as opaque
/// name bytes, so a name always ends on an ASCII boundary.
fn is_name_byte(b: u8) -> bool {
    !is_space(b)
        && !b.is_ascii_control()
        && !matches!(b, b';' | b'(' | b')' | b'{' | b'}' | b'"')
}

// Public API

/// Lex the whole source, whitespace and comment tokens included, stopping
/// after `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    loop {
        let token = lex(source, offset);
        if let TokenKind::Error(kind) = &token.kind {
            return Err(LexError::at(source, token.start, kind.clone()));
        }
        offset = token.end();
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

// Tests
