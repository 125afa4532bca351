use crate::token::TokenType;
use thiserror::Error;

/// Failure while turning raw text into tokens. Positions are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("Position {position}: unexpected character {character}")]
    UnexpectedCharacter { position: usize, character: char },

    #[error("Position {position}: symbol too long")]
    SymbolTooLong { position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A primary expression cannot start with this token.
    #[error("Unexpected token {0}")]
    UnexpectedToken(TokenType),

    #[error("Expected ')'")]
    MissingCloseParen,

    /// Tokens were left over after a complete expression.
    #[error("Syntax error on token {0}")]
    TrailingToken(TokenType),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Left side of assignment must be a symbol")]
    InvalidAssignmentTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DictionaryError {
    #[error("cannot delete key [{0}] not found")]
    KeyNotFound(String),
}

/// Any error the pipeline can produce, for callers that run every stage at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
