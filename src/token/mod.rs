use std::collections::VecDeque;
use std::fmt;

mod number;
mod tokenizer;

pub use tokenizer::{tokenize, SymbolLimit, Tokenizer, TokenizerConfig, SYMBOL_MAX_LEN};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Value(f64),
    Symbol(String),
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    OpenParen,
    CloseParen,
    Equal,
    End,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    Value,
    Symbol,
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    OpenParen,
    CloseParen,
    Equal,
    End,
}

impl Token {
    pub fn token_type(&self) -> TokenType {
        match self {
            Token::Value(_) => TokenType::Value,
            Token::Symbol(_) => TokenType::Symbol,
            Token::Plus => TokenType::Plus,
            Token::Minus => TokenType::Minus,
            Token::Multiply => TokenType::Multiply,
            Token::Divide => TokenType::Divide,
            Token::Power => TokenType::Power,
            Token::OpenParen => TokenType::OpenParen,
            Token::CloseParen => TokenType::CloseParen,
            Token::Equal => TokenType::Equal,
            Token::End => TokenType::End,
        }
    }

    /// Maps a single operator character to its token.
    pub fn from_operator(c: u8) -> Option<Token> {
        match c {
            b'+' => Some(Token::Plus),
            b'-' => Some(Token::Minus),
            b'*' => Some(Token::Multiply),
            b'/' => Some(Token::Divide),
            b'^' => Some(Token::Power),
            b'(' => Some(Token::OpenParen),
            b')' => Some(Token::CloseParen),
            b'=' => Some(Token::Equal),
            _ => None,
        }
    }
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Value => "VALUE",
            TokenType::Symbol => "SYMBOL",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Multiply => "MULTIPLY",
            TokenType::Divide => "DIVIDE",
            TokenType::Power => "POWER",
            TokenType::OpenParen => "OPEN_PAREN",
            TokenType::CloseParen => "CLOSE_PAREN",
            TokenType::Equal => "EQUAL",
            TokenType::End => "(end)",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Value(value) => write!(f, "{} {}", self.token_type(), value),
            Token::Symbol(name) => write!(f, "{} {}", self.token_type(), name),
            _ => write!(f, "{}", self.token_type()),
        }
    }
}

static END: Token = Token::End;

/// An ordered, front-consumable run of tokens.
///
/// Once the real tokens are exhausted the sequence behaves as an endless
/// stream of [`Token::End`]; `End` itself is never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSequence {
    tokens: VecDeque<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Type of the front token, without consuming it.
    pub fn peek_type(&self) -> TokenType {
        self.next().token_type()
    }

    /// The front token. Does not remove it; see [`TokenSequence::consume`].
    pub fn next(&self) -> &Token {
        self.tokens.front().unwrap_or(&END)
    }

    /// Removes the front token. No-op once exhausted.
    pub fn consume(&mut self) {
        self.tokens.pop_front();
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index`, or `End` past the last real token.
    pub fn get(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&END)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    pub(crate) fn push(&mut self, token: Token) {
        if token != Token::End {
            self.tokens.push_back(token);
        }
    }

    pub(crate) fn last(&self) -> Option<&Token> {
        self.tokens.back()
    }

    pub(crate) fn pop(&mut self) -> Option<Token> {
        self.tokens.pop_back()
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut sequence = TokenSequence::new();
        for token in iter {
            sequence.push(token);
        }
        sequence
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        tokens.into_iter().collect()
    }
}
