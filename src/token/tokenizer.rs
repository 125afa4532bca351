use super::number::scan_number;
use super::{Token, TokenSequence};
use crate::error::TokenizeError;
use log::{debug, trace};

/// Longest symbol name, in bytes.
pub const SYMBOL_MAX_LEN: usize = 31;

/// How the 31-character symbol limit is enforced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SymbolLimit {
    /// Reject the whole input when it is longer than the limit, before
    /// producing any token. Symbols inside shorter input are capped.
    WholeInput,
    /// Reject a symbol that runs past the limit, reporting the position of
    /// its first excess character.
    #[default]
    PerSymbol,
    /// Keep the first 31 characters of a symbol and drop the rest.
    Truncate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TokenizerConfig {
    pub symbol_limit: SymbolLimit,
}

/// Turns a line of text into a [`TokenSequence`].
#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

/// Tokenizes `input` with the default configuration.
pub fn tokenize(input: &str) -> Result<TokenSequence, TokenizeError> {
    Tokenizer::default().tokenize(input)
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn is_math_sign(b: u8) -> bool {
    matches!(b, b'+' | b'-' | b'*' | b'/' | b'^')
}

fn is_symbol_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Error for the character starting at byte `at`, positioned 1-based in chars.
fn unexpected_character(input: &str, at: usize) -> TokenizeError {
    TokenizeError::UnexpectedCharacter {
        position: input[..at].chars().count() + 1,
        character: input[at..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn tokenize(&self, input: &str) -> Result<TokenSequence, TokenizeError> {
        debug!("Tokenizing input: {:?}", input);
        let bytes = input.as_bytes();

        // checked before scanning, so the position is that of the first character
        if self.config.symbol_limit == SymbolLimit::WholeInput && bytes.len() > SYMBOL_MAX_LEN {
            return Err(TokenizeError::SymbolTooLong { position: 1 });
        }

        let mut tokens = TokenSequence::new();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];

            if is_space(c) {
                i += 1;
            } else if c.is_ascii_digit()
                || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
            {
                let Some((value, len)) = scan_number(&bytes[i..]) else {
                    return Err(unexpected_character(input, i));
                };
                trace!("VALUE {} at {}", value, i);
                tokens.push(Token::Value(value));
                i += len;
            } else if (c == b'+' || c == b'-') && self.is_step(&tokens, bytes, i) {
                if let Some(Token::Value(prev)) = tokens.pop() {
                    let stepped = if c == b'+' { prev + 1.0 } else { prev - 1.0 };
                    trace!("stepped VALUE {} to {}", prev, stepped);
                    tokens.push(Token::Value(stepped));
                }
                i += 2;
            } else if let Some(token) = Token::from_operator(c) {
                trace!("{} at {}", token, i);
                tokens.push(token);
                i += 1;
            } else if c.is_ascii_alphabetic() {
                let (name, next) = self.scan_symbol(input, i)?;
                trace!("SYMBOL {} at {}", name, i);
                tokens.push(Token::Symbol(name));
                i = next;
            } else {
                return Err(unexpected_character(input, i));
            }
        }

        debug!("Produced {} tokens", tokens.len());
        Ok(tokens)
    }

    /// `V++op` / `V--op`: the previous value absorbs the increment when the
    /// character after the doubled sign is itself an arithmetic operator.
    fn is_step(&self, tokens: &TokenSequence, bytes: &[u8], i: usize) -> bool {
        bytes.get(i + 1) == Some(&bytes[i])
            && matches!(tokens.last(), Some(Token::Value(_)))
            && bytes.get(i + 2).copied().is_some_and(is_math_sign)
    }

    /// Scans a symbol starting at byte `start`. Returns the name and the
    /// index just past everything consumed.
    fn scan_symbol(&self, input: &str, start: usize) -> Result<(String, usize), TokenizeError> {
        let bytes = input.as_bytes();
        let run = bytes[start..].iter().take_while(|&&b| is_symbol_char(b)).count();

        if run <= SYMBOL_MAX_LEN {
            return Ok((input[start..start + run].to_string(), start + run));
        }

        match self.config.symbol_limit {
            SymbolLimit::PerSymbol => Err(TokenizeError::SymbolTooLong {
                position: start + SYMBOL_MAX_LEN + 1,
            }),
            SymbolLimit::WholeInput | SymbolLimit::Truncate => Ok((
                input[start..start + SYMBOL_MAX_LEN].to_string(),
                start + run,
            )),
        }
    }
}
