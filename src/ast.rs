use crate::lexer::Token;

// Node types in the parse tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Program,     // Root node containing all statements
    Statement,   // NAME = expr ;
    FunctionDef, // fn params => block
    Apply,       // Juxtaposed terms
    Block,       // { stmt* expr }
    Literal,     // Single token (terminal)
}

impl NodeType {
    pub fn label(self) -> &'static str {
        match self {
            NodeType::Program => "PROGRAM",
            NodeType::Statement => "STMT",
            NodeType::FunctionDef => "FN_DEF",
            NodeType::Apply => "APPLY",
            NodeType::Block => "BLOCK",
            NodeType::Literal => "LITERAL",
        }
    }
}

/// Parse tree node. Children are kept in source order.
///
/// - `Statement`: `[name, expr]`
/// - `FunctionDef`: parameter names followed by the body block
/// - `Block`: statements followed by the trailing expression
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program(Vec<Node>),
    Statement(Vec<Node>),
    FunctionDef(Vec<Node>),
    Apply(Vec<Node>),
    Block(Vec<Node>),
    Literal(Token),
}

impl Node {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Program(_) => NodeType::Program,
            Node::Statement(_) => NodeType::Statement,
            Node::FunctionDef(_) => NodeType::FunctionDef,
            Node::Apply(_) => NodeType::Apply,
            Node::Block(_) => NodeType::Block,
            Node::Literal(_) => NodeType::Literal,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Program(children)
            | Node::Statement(children)
            | Node::FunctionDef(children)
            | Node::Apply(children)
            | Node::Block(children) => children,
            Node::Literal(_) => &[],
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Node::Literal(token) => Some(token),
            _ => None,
        }
    }

    /// Nodes in this subtree, including itself
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(Node::size).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    fn name(s: &str) -> Node {
        Node::Literal(Token {
            kind: TokenKind::Name(s.to_string()),
            start: 0,
            len: s.len(),
        })
    }

    #[test]
    fn test_literal_has_no_children() {
        let lit = name("x");
        assert_eq!(lit.node_type(), NodeType::Literal);
        assert!(lit.children().is_empty());
        assert_eq!(lit.token().and_then(|t| t.text()), Some("x"));
    }

    #[test]
    fn test_children_keep_order() {
        let def = Node::FunctionDef(vec![name("a"), name("b"), Node::Block(vec![name("a")])]);
        let types: Vec<NodeType> = def.children().iter().map(Node::node_type).collect();
        assert_eq!(
            types,
            vec![NodeType::Literal, NodeType::Literal, NodeType::Block]
        );
        assert_eq!(def.size(), 5);
        assert!(def.token().is_none());
    }
}
