use super::error::{ParseError, SyntaxErrorKind};
use super::{Attempt, Parser};
use crate::ast::Node;
use crate::lexer::{Token, TokenSet};

// Parser helper methods
impl<'src> Parser<'src> {
    // Helper: Check recursion depth limit
    pub(super) fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth >= self.limits.max_depth {
            return Err(ParseError::NestingTooDeep {
                depth,
                max: self.limits.max_depth,
            });
        }
        Ok(())
    }

    /// Helper: Fatal error pointing at the token that would be read next
    pub(super) fn syntax_error(&self, kind: SyntaxErrorKind) -> ParseError {
        ParseError::syntax(self.stream.source(), self.stream.position(), kind)
    }

    /// Helper: Take the next token if its kind is in `set`, otherwise put it back
    pub(super) fn accept(&mut self, set: TokenSet) -> Result<Option<Token>, ParseError> {
        let token = self.stream.next()?;
        if token.kind.is(set) {
            return Ok(Some(token));
        }
        self.stream.push_back(token)?;
        Ok(None)
    }

    /// Helper: Consume a token past a commitment boundary or fail fatally
    pub(super) fn expect(
        &mut self,
        set: TokenSet,
        kind: SyntaxErrorKind,
    ) -> Result<Token, ParseError> {
        match self.accept(set)? {
            Some(token) => Ok(token),
            None => Err(self.syntax_error(kind)),
        }
    }

    /// Literal node for one token whose kind is in `set`
    pub fn parse_literal(&mut self, set: TokenSet) -> Attempt {
        Ok(self.accept(set)?.map(Node::Literal))
    }

    /// Literal node for a NAME, INT, STR or REAL
    pub fn parse_any_literal(&mut self) -> Attempt {
        self.parse_literal(TokenSet::LITERAL)
    }
}
