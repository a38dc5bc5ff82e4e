use crate::lexer::{self, LexError, Token, TokenKind, TokenSet};
use crate::limits::ParserLimits;
use crate::parser::ParseError;
use crate::printer::format_token;

/// Most tokens the grammar ever hands back at one position: a statement
/// attempt returns both its NAME and the token that was not `=`.
pub const PUSHBACK_CAPACITY: usize = 2;

/// Lexes on demand, hides trivia and replays pushed-back tokens.
#[derive(Debug)]
pub struct TokenStream<'src> {
    source: &'src str,
    cursor: usize,
    pushback: Vec<Token>,
    limits: ParserLimits,
    token_count: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str, limits: ParserLimits) -> Result<Self, ParseError> {
        if source.len() > limits.max_input_size {
            return Err(ParseError::LimitExceeded {
                what: "input size",
                actual: source.len(),
                max: limits.max_input_size,
            });
        }

        Ok(Self {
            source,
            cursor: 0,
            pushback: Vec::with_capacity(PUSHBACK_CAPACITY),
            limits,
            token_count: 0,
        })
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Byte offset the lexer resumes from
    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of tokens waiting to be replayed
    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.pushback.len()
    }

    /// Offset of the token the next call to `next` will return, or the
    /// cursor if it has not been lexed yet
    pub fn position(&self) -> usize {
        self.pushback.last().map_or(self.cursor, |t| t.start)
    }

    /// Next significant token
    pub fn next(&mut self) -> Result<Token, ParseError> {
        if let Some(token) = self.pushback.pop() {
            log::trace!("replay {}", format_token(&token));
            return Ok(token);
        }

        loop {
            let token = lexer::lex(self.source, self.cursor);

            if let TokenKind::Error(kind) = &token.kind {
                return Err(LexError::at(self.source, token.start, kind.clone()).into());
            }

            self.cursor = token.end();
            self.check_lengths(&token)?;

            if token.kind.is(TokenSet::TRIVIA) {
                continue;
            }

            self.token_count += 1;
            if self.token_count > self.limits.max_token_count {
                return Err(ParseError::LimitExceeded {
                    what: "token count",
                    actual: self.token_count,
                    max: self.limits.max_token_count,
                });
            }

            log::trace!("{}", format_token(&token));
            return Ok(token);
        }
    }

    /// Return a token to the front of the stream
    pub fn push_back(&mut self, token: Token) -> Result<(), ParseError> {
        if self.pushback.len() >= PUSHBACK_CAPACITY {
            return Err(ParseError::PushbackOverflow {
                capacity: PUSHBACK_CAPACITY,
            });
        }
        log::trace!("unget {}", format_token(&token));
        self.pushback.push(token);
        Ok(())
    }

    fn check_lengths(&self, token: &Token) -> Result<(), ParseError> {
        let (what, actual, max) = match &token.kind {
            TokenKind::Name(name) => ("name length", name.len(), self.limits.max_name_length),
            TokenKind::Str(s) => ("string length", s.len(), self.limits.max_string_length),
            TokenKind::Comment => ("comment length", token.len, self.limits.max_comment_length),
            _ => return Ok(()),
        };

        if actual > max {
            return Err(ParseError::LimitExceeded { what, actual, max });
        }
        Ok(())
    }
}
