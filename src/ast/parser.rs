use crate::ast::{ExprTree, Operator};
use crate::error::{Error, ParseError};
use crate::token::{tokenize, Token, TokenSequence, TokenType};
use log::{debug, trace};

/// Recursive descent parser over a [`TokenSequence`].
///
/// ```text
/// assignment     := additive { '=' assignment }
/// additive       := multiplicative { ('+'|'-') multiplicative }
/// multiplicative := exponential { ('*'|'/') exponential }
/// exponential    := primary [ '^' exponential ]
/// primary        := VALUE | SYMBOL | '(' assignment ')' | '-' primary
/// ```
///
/// Tokens are consumed as they are matched, so a sequence can be parsed
/// only once. Any subtree built before an error is dropped on the way out.
pub struct Parser<'t> {
    tokens: &'t mut TokenSequence,
}

impl<'t> Parser<'t> {
    /// Parses one complete expression; the sequence must be exhausted after it.
    pub fn parse(tokens: &'t mut TokenSequence) -> Result<ExprTree, ParseError> {
        debug!("Parsing {} tokens", tokens.len());
        let mut parser = Parser { tokens };
        let tree = parser.assignment()?;

        match parser.tokens.peek_type() {
            TokenType::End => {
                debug!("Parse result: {:?}", tree);
                Ok(tree)
            }
            trailing => Err(ParseError::TrailingToken(trailing)),
        }
    }

    /// Tokenizes and parses `input` with the default tokenizer settings.
    pub fn parse_expression(input: &str) -> Result<ExprTree, Error> {
        let mut tokens = tokenize(input)?;
        Ok(Parser::parse(&mut tokens)?)
    }

    fn assignment(&mut self) -> Result<ExprTree, ParseError> {
        let mut node = self.additive()?;

        while self.tokens.peek_type() == TokenType::Equal {
            self.tokens.consume();
            let right = self.assignment()?;
            node = ExprTree::node(Operator::Assign, node, right);
        }

        Ok(node)
    }

    fn additive(&mut self) -> Result<ExprTree, ParseError> {
        let mut node = self.multiplicative()?;

        while let next @ (TokenType::Plus | TokenType::Minus) = self.tokens.peek_type() {
            self.tokens.consume();
            let right = self.multiplicative()?;
            node = ExprTree::node(Operator::try_from(next)?, node, right);
        }

        Ok(node)
    }

    fn multiplicative(&mut self) -> Result<ExprTree, ParseError> {
        let mut node = self.exponential()?;

        while let next @ (TokenType::Multiply | TokenType::Divide) = self.tokens.peek_type() {
            self.tokens.consume();
            let right = self.exponential()?;
            node = ExprTree::node(Operator::try_from(next)?, node, right);
        }

        Ok(node)
    }

    fn exponential(&mut self) -> Result<ExprTree, ParseError> {
        let base = self.primary()?;

        if self.tokens.peek_type() != TokenType::Power {
            return Ok(base);
        }
        self.tokens.consume();
        let exponent = self.exponential()?;
        Ok(ExprTree::node(Operator::Power, base, exponent))
    }

    fn primary(&mut self) -> Result<ExprTree, ParseError> {
        trace!("primary at {}", self.tokens.next());
        let node = match self.tokens.next() {
            Token::Value(value) => ExprTree::value(*value),
            Token::Symbol(name) => ExprTree::symbol(name),
            Token::OpenParen => {
                self.tokens.consume();
                let inner = self.assignment()?;
                if self.tokens.peek_type() != TokenType::CloseParen {
                    return Err(ParseError::MissingCloseParen);
                }
                self.tokens.consume();
                return Ok(inner);
            }
            Token::Minus => {
                self.tokens.consume();
                return Ok(ExprTree::negate(self.primary()?));
            }
            other => return Err(ParseError::UnexpectedToken(other.token_type())),
        };

        self.tokens.consume();
        Ok(node)
    }
}
