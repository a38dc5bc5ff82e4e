// Parser module - splits parser into logical components
//
// Every grammar rule is one procedure returning `Attempt`:
// - Ok(Some(node)): the rule matched and its tokens are consumed
// - Ok(None): the rule did not match and nothing is consumed (backtrack)
// - Err(_): the rule had committed and a required piece was missing
//
// Alternatives are tried in a fixed order with no memoization, so a span
// may be re-lexed once per alternative that looks at it.
mod error;
mod expressions;
mod helpers;
mod statements;

// Public exports
pub use error::{ParseError, SyntaxErrorKind};

use crate::ast::Node;
use crate::lexer::Token;
use crate::limits::ParserLimits;
use crate::stream::TokenStream;

/// Result of trying one grammar rule
pub type Attempt = Result<Option<Node>, ParseError>;

// Parser structure
pub struct Parser<'src> {
    stream: TokenStream<'src>,
    limits: ParserLimits,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, limits: ParserLimits) -> Result<Self, ParseError> {
        Ok(Self {
            stream: TokenStream::new(source, limits.clone())?,
            limits,
        })
    }

    // Main parsing entry point
    pub fn parse(mut self) -> Result<Node, ParseError> {
        self.parse_program(0)
    }

    /// Fetch the next significant token directly
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.stream.next()
    }

    pub fn stream(&self) -> &TokenStream<'src> {
        &self.stream
    }
}

// Public API function
pub fn parse(source: &str, limits: ParserLimits) -> Result<Node, ParseError> {
    Parser::new(source, limits)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeType;
    use crate::lexer::TokenKind;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn parser(source: &str) -> Parser<'_> {
        init_logger();
        Parser::new(source, ParserLimits::default()).unwrap()
    }

    fn parse_ok(source: &str) -> Node {
        init_logger();
        parse(source, ParserLimits::default()).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        init_logger();
        parse(source, ParserLimits::default()).unwrap_err()
    }

    fn literal_kind(node: &Node) -> &TokenKind {
        &node.token().expect("literal node").kind
    }

    fn types(nodes: &[Node]) -> Vec<NodeType> {
        nodes.iter().map(Node::node_type).collect()
    }

    #[test]
    fn test_simple_statement() {
        let program = parse_ok("x = 1;");

        assert_eq!(program.node_type(), NodeType::Program);
        assert_eq!(program.children().len(), 1);

        let stmt = &program.children()[0];
        assert_eq!(stmt.node_type(), NodeType::Statement);
        assert_eq!(literal_kind(&stmt.children()[0]), &TokenKind::Name("x".into()));
        assert_eq!(literal_kind(&stmt.children()[1]), &TokenKind::Int(1));
    }

    #[test]
    fn test_function_definition() {
        let program = parse_ok("x = fn a b => { a };");
        let def = &program.children()[0].children()[1];

        assert_eq!(def.node_type(), NodeType::FunctionDef);
        assert_eq!(
            types(def.children()),
            vec![NodeType::Literal, NodeType::Literal, NodeType::Block]
        );
        assert_eq!(literal_kind(&def.children()[0]), &TokenKind::Name("a".into()));
        assert_eq!(literal_kind(&def.children()[1]), &TokenKind::Name("b".into()));

        let body = &def.children()[2];
        assert_eq!(body.children().len(), 1);
        assert_eq!(literal_kind(&body.children()[0]), &TokenKind::Name("a".into()));
    }

    #[test]
    fn test_function_without_params() {
        let program = parse_ok("k = fn => { 0 };");
        let def = &program.children()[0].children()[1];
        assert_eq!(types(def.children()), vec![NodeType::Block]);
    }

    #[test]
    fn test_arrow_right_after_fn() {
        let program = parse_ok("x = fn=> { 1 };");
        let def = &program.children()[0].children()[1];

        assert_eq!(def.node_type(), NodeType::FunctionDef);
        assert_eq!(types(def.children()), vec![NodeType::Block]);
        assert_eq!(
            literal_kind(&def.children()[0].children()[0]),
            &TokenKind::Int(1)
        );
    }

    #[test]
    fn test_apply_collects_terms() {
        let program = parse_ok("y = f a \"s\" 2.5 (g b) { c };");
        let apply = &program.children()[0].children()[1];

        assert_eq!(apply.node_type(), NodeType::Apply);
        assert_eq!(
            types(apply.children()),
            vec![
                NodeType::Literal,
                NodeType::Literal,
                NodeType::Literal,
                NodeType::Literal,
                NodeType::Apply,
                NodeType::Block,
            ]
        );
        assert_eq!(literal_kind(&apply.children()[2]), &TokenKind::Str("s".into()));
        assert_eq!(literal_kind(&apply.children()[3]), &TokenKind::Real(2.5));
    }

    #[test]
    fn test_parens_are_transparent() {
        let program = parse_ok("z = ((7));");
        let expr = &program.children()[0].children()[1];
        assert_eq!(literal_kind(expr), &TokenKind::Int(7));
    }

    #[test]
    fn test_leading_group_is_not_applied() {
        // The group matches first and the statement wants `;` next
        let err = parse_err("z = (f) x;");
        assert_eq!(err.syntax_kind(), Some(SyntaxErrorKind::ExpectedSemicolon));
    }

    #[test]
    fn test_block_with_statements() {
        let program = parse_ok("main = { a = 1; b = f a; g b };");
        let block = &program.children()[0].children()[1];

        assert_eq!(block.node_type(), NodeType::Block);
        assert_eq!(
            types(block.children()),
            vec![NodeType::Statement, NodeType::Statement, NodeType::Apply]
        );
    }

    #[test]
    fn test_multiple_statements_and_comments() {
        let program = parse_ok("# header\na = 1; # one\nb = 2;\n");
        assert_eq!(
            types(program.children()),
            vec![NodeType::Statement, NodeType::Statement]
        );
    }

    #[test]
    fn test_empty_program() {
        let program = parse_ok("  \n");
        assert!(program.children().is_empty());
    }

    #[test]
    fn test_stmt_backtracks_to_name() {
        let mut p = parser("x;");
        assert_eq!(p.parse_stmt(0), Ok(None));
        assert_eq!(p.stream().pending(), 2);

        let token = p.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Name("x".into()));
        assert_eq!(token.start, 0);
        assert_eq!(p.next_token().unwrap().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_literal_backtracks() {
        let mut p = parser("{ 1 }");
        assert_eq!(p.parse_any_literal(), Ok(None));
        let block = p.parse_expr_no_apply(0).unwrap().expect("block");
        assert_eq!(block.node_type(), NodeType::Block);
        assert_eq!(literal_kind(&block.children()[0]), &TokenKind::Int(1));
    }

    #[test]
    fn test_apply_needs_a_term() {
        let mut p = parser(";");
        assert_eq!(p.parse_apply(0), Ok(None));
        assert_eq!(p.parse_expr(0), Ok(None));
        assert_eq!(p.next_token().unwrap().kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_fatal_errors() {
        let cases = [
            ("x = ;", SyntaxErrorKind::ExpectedExpression),
            ("x = 1", SyntaxErrorKind::ExpectedSemicolon),
            ("x = { a = 1; };", SyntaxErrorKind::InvalidSyntax),
            ("x = { a ;", SyntaxErrorKind::UnclosedBrace),
            ("x = (a ;", SyntaxErrorKind::UnclosedParen),
            ("x = ();", SyntaxErrorKind::ExpectedExpression),
            ("x = fn a { a };", SyntaxErrorKind::InvalidFunctionDefinition),
            ("x = fn a => a;", SyntaxErrorKind::ExpectedFunctionBody),
            ("x = 1; )", SyntaxErrorKind::ExpectedEof),
            ("x y = 1;", SyntaxErrorKind::ExpectedEof),
            ("x <- 1;", SyntaxErrorKind::ExpectedEof),
        ];

        for (source, expected) in cases {
            assert_eq!(parse_err(source).syntax_kind(), Some(expected), "{}", source);
        }
    }

    #[test]
    fn test_error_position() {
        let err = parse_err("a = 1;\nb = ;");
        assert_eq!(
            err,
            ParseError::Syntax {
                kind: SyntaxErrorKind::ExpectedExpression,
                line: 2,
                column: 5,
            }
        );
        assert_eq!(err.to_string(), "Parse error at 2:5: expected expression");
    }

    #[test]
    fn test_lex_error_aborts_parse() {
        assert!(matches!(parse_err("s = \"open;"), ParseError::Lex(_)));
        assert!(matches!(parse_err("s = \u{7};"), ParseError::Lex(_)));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let deep = format!("x = {}1{};", "(".repeat(200), ")".repeat(200));
        assert!(matches!(parse_err(&deep), ParseError::NestingTooDeep { max: 256, .. }));

        let shallow = format!("x = {}1{};", "(".repeat(20), ")".repeat(20));
        assert!(parse(&shallow, ParserLimits::default()).is_ok());
    }

    #[test]
    fn test_independent_parses_are_equal() {
        let source = "f = fn x => { y = x; g y 1 };\nmain = f 2;";
        assert_eq!(parse_ok(source), parse_ok(source));
    }
}
