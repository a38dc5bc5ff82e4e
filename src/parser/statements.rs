use super::error::{ParseError, SyntaxErrorKind};
use super::{Attempt, Parser};
use crate::ast::Node;
use crate::lexer::TokenSet;
use crate::printer::format_token;

// Recursive statement parsing methods
impl<'src> Parser<'src> {
    /// program = stmt* EOF
    pub fn parse_program(&mut self, depth: usize) -> Result<Node, ParseError> {
        log::trace!("trying parse_program");
        self.check_depth(depth)?;

        let mut statements = Vec::new();
        while let Some(stmt) = self.parse_stmt(depth + 1)? {
            statements.push(stmt);
        }

        self.expect(TokenSet::EOF, SyntaxErrorKind::ExpectedEof)?;
        Ok(Node::Program(statements))
    }

    /// stmt = NAME "=" expr ";"
    ///
    /// Commits once `=` follows the name. Without it, the name goes back
    /// to the stream so the caller can retry it as an expression.
    pub fn parse_stmt(&mut self, depth: usize) -> Attempt {
        log::trace!("trying parse_stmt");
        self.check_depth(depth)?;

        let Some(name) = self.accept(TokenSet::NAME)? else {
            return Ok(None);
        };

        if self.accept(TokenSet::EQUALS)?.is_none() {
            log::debug!("ungetting {}", format_token(&name));
            self.stream.push_back(name)?;
            return Ok(None);
        }

        let expr = match self.parse_expr(depth + 1)? {
            Some(expr) => expr,
            None => return Err(self.syntax_error(SyntaxErrorKind::ExpectedExpression)),
        };
        self.expect(TokenSet::SEMICOLON, SyntaxErrorKind::ExpectedSemicolon)?;

        Ok(Some(Node::Statement(vec![Node::Literal(name), expr])))
    }
}
