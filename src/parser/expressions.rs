use super::error::SyntaxErrorKind;
use super::{Attempt, Parser};
use crate::ast::Node;
use crate::lexer::TokenSet;

// Recursive expression parsing methods
impl<'src> Parser<'src> {
    /// block = "{" stmt* expr "}"
    ///
    /// Commits once the opening brace is consumed.
    pub fn parse_block(&mut self, depth: usize) -> Attempt {
        log::trace!("trying parse_block");
        self.check_depth(depth)?;

        if self.accept(TokenSet::LBRACE)?.is_none() {
            return Ok(None);
        }

        let mut children = Vec::new();
        while let Some(stmt) = self.parse_stmt(depth + 1)? {
            children.push(stmt);
        }

        match self.parse_expr(depth + 1)? {
            Some(expr) => children.push(expr),
            None => return Err(self.syntax_error(SyntaxErrorKind::InvalidSyntax)),
        }

        self.expect(TokenSet::RBRACE, SyntaxErrorKind::UnclosedBrace)?;
        Ok(Some(Node::Block(children)))
    }

    /// Expressions that start with a token of their own: a parenthesized
    /// expression, a function definition or a block
    pub fn parse_expr_no_apply(&mut self, depth: usize) -> Attempt {
        log::trace!("trying parse_expr_no_apply");
        self.check_depth(depth)?;

        if self.accept(TokenSet::LPAREN)?.is_some() {
            log::trace!("trying parens");
            let inner = match self.parse_expr(depth + 1)? {
                Some(expr) => expr,
                None => return Err(self.syntax_error(SyntaxErrorKind::ExpectedExpression)),
            };
            self.expect(TokenSet::RPAREN, SyntaxErrorKind::UnclosedParen)?;
            return Ok(Some(inner));
        }

        if self.accept(TokenSet::FN)?.is_some() {
            log::trace!("trying function definition");
            let mut children = Vec::new();
            while let Some(param) = self.parse_literal(TokenSet::NAME)? {
                children.push(param);
            }

            self.expect(
                TokenSet::RIGHT_ARROW,
                SyntaxErrorKind::InvalidFunctionDefinition,
            )?;

            match self.parse_block(depth + 1)? {
                Some(body) => children.push(body),
                None => return Err(self.syntax_error(SyntaxErrorKind::ExpectedFunctionBody)),
            }
            return Ok(Some(Node::FunctionDef(children)));
        }

        self.parse_block(depth + 1)
    }

    /// expr, trying each alternative in order; the first match wins
    pub fn parse_expr(&mut self, depth: usize) -> Attempt {
        log::trace!("trying parse_expr");
        self.check_depth(depth)?;

        if let Some(expr) = self.parse_expr_no_apply(depth + 1)? {
            return Ok(Some(expr));
        }
        if let Some(apply) = self.parse_apply(depth + 1)? {
            return Ok(Some(apply));
        }
        self.parse_any_literal()
    }

    /// Juxtaposed terms, each a literal or an expr_no_apply.
    ///
    /// No terms backtracks; a single term is returned as-is.
    pub fn parse_apply(&mut self, depth: usize) -> Attempt {
        log::trace!("trying parse_apply");
        self.check_depth(depth)?;

        let mut terms = Vec::new();
        loop {
            if let Some(literal) = self.parse_any_literal()? {
                terms.push(literal);
            } else if let Some(term) = self.parse_expr_no_apply(depth + 1)? {
                terms.push(term);
            } else {
                break;
            }
        }

        Ok(match terms.len() {
            0 => None,
            1 => terms.pop(),
            _ => Some(Node::Apply(terms)),
        })
    }
}
