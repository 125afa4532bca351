use crate::error::ParseError;
use crate::token::{TokenType, SYMBOL_MAX_LEN};

mod evaluator;
mod parser;
mod render;

pub use parser::Parser;
pub use render::TRUNCATION_MARKER;

/// An arithmetic expression. Every interior node owns its children, so
/// dropping the root releases the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprTree {
    Value(f64),
    Symbol(String),
    Negate(Box<ExprTree>),
    BinaryOperation {
        operator: Operator,
        left: Box<ExprTree>,
        right: Box<ExprTree>,
    },
}

impl ExprTree {
    pub fn value(value: f64) -> Self {
        ExprTree::Value(value)
    }

    /// A symbol leaf. Names longer than 31 bytes are cut at the last char
    /// boundary that fits.
    pub fn symbol(name: &str) -> Self {
        let mut end = name.len().min(SYMBOL_MAX_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        ExprTree::Symbol(name[..end].to_string())
    }

    pub fn node(operator: Operator, left: ExprTree, right: ExprTree) -> Self {
        ExprTree::BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn negate(child: ExprTree) -> Self {
        ExprTree::Negate(Box::new(child))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ExprTree::Value(_) | ExprTree::Symbol(_))
    }

    /// Number of nodes, leaves and interior nodes alike.
    pub fn count(&self) -> usize {
        match self {
            ExprTree::Value(_) | ExprTree::Symbol(_) => 1,
            ExprTree::Negate(child) => 1 + child.count(),
            ExprTree::BinaryOperation { left, right, .. } => 1 + left.count() + right.count(),
        }
    }

    /// Longest root-to-leaf path; a lone leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            ExprTree::Value(_) | ExprTree::Symbol(_) => 1,
            ExprTree::Negate(child) => 1 + child.depth(),
            ExprTree::BinaryOperation { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Assign,
}

impl Operator {
    /// Applies the operator with IEEE-754 semantics. Division by zero and
    /// the like produce infinities or NaN, never an error. Assignment
    /// yields its right-hand side; the store itself is the evaluator's job.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Power => left.powf(right),
            Operator::Assign => right,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Power => '^',
            Operator::Assign => '=',
        }
    }
}

impl TryFrom<TokenType> for Operator {
    type Error = ParseError;

    fn try_from(value: TokenType) -> Result<Self, Self::Error> {
        match value {
            TokenType::Plus => Ok(Operator::Add),
            TokenType::Minus => Ok(Operator::Subtract),
            TokenType::Multiply => Ok(Operator::Multiply),
            TokenType::Divide => Ok(Operator::Divide),
            TokenType::Power => Ok(Operator::Power),
            TokenType::Equal => Ok(Operator::Assign),
            other => Err(ParseError::UnexpectedToken(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_matches_constructor_calls() {
        // 6.5 * (4 + 3): five constructor calls
        let tree = ExprTree::node(
            Operator::Multiply,
            ExprTree::value(6.5),
            ExprTree::node(Operator::Add, ExprTree::value(4.0), ExprTree::value(3.0)),
        );
        assert_eq!(tree.count(), 5);
        assert_eq!(tree.depth(), 3);

        let negated = ExprTree::negate(ExprTree::negate(ExprTree::value(0.125)));
        assert_eq!(negated.count(), 3);
        assert_eq!(negated.depth(), 3);
    }

    #[test]
    fn test_depth_of_lopsided_tree() {
        let leaf = ExprTree::symbol("x");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.depth(), 1);

        let left = ExprTree::node(
            Operator::Subtract,
            ExprTree::node(Operator::Subtract, ExprTree::value(10.0), ExprTree::value(2.0)),
            ExprTree::value(3.0),
        );
        let right = ExprTree::value(1.0);
        let expected = 1 + left.depth().max(right.depth());
        assert_eq!(ExprTree::node(Operator::Power, left, right).depth(), expected);
        assert_eq!(expected, 4);
    }

    #[test]
    fn test_symbol_names_are_capped() {
        let long = "v".repeat(40);
        assert_eq!(ExprTree::symbol(&long), ExprTree::Symbol("v".repeat(31)));
        assert_eq!(ExprTree::symbol("t"), ExprTree::Symbol("t".to_string()));
    }

    #[test]
    fn test_operator_apply_follows_ieee() {
        assert_eq!(Operator::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
        assert!(Operator::Power.apply(-8.0, 1.0 / 3.0).is_nan());
        assert_eq!(Operator::Power.apply(2.0, 10.0), 1024.0);
        assert_eq!(Operator::Assign.apply(1.0, 7.0), 7.0);
    }

    #[test]
    fn test_operator_from_token_type() {
        assert_eq!(Operator::try_from(TokenType::Plus), Ok(Operator::Add));
        assert_eq!(Operator::try_from(TokenType::Equal), Ok(Operator::Assign));
        assert_eq!(
            Operator::try_from(TokenType::OpenParen),
            Err(ParseError::UnexpectedToken(TokenType::OpenParen))
        );
    }
}
