use crate::dictionary::DEFAULT_CAPACITY;
use crate::token::TokenizerConfig;

pub const DEFAULT_PARSE_CACHE_SIZE: usize = 100;

/// Settings for an [`Evaluator`](crate::Evaluator) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tokenizer: TokenizerConfig,
    /// Initial slot count of the variable dictionary.
    pub dictionary_capacity: usize,
    /// Parsed expressions kept per input text; 0 disables caching.
    pub parse_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            dictionary_capacity: DEFAULT_CAPACITY,
            parse_cache_size: DEFAULT_PARSE_CACHE_SIZE,
        }
    }
}

impl Config {
    pub fn with_tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_dictionary_capacity(mut self, capacity: usize) -> Self {
        self.dictionary_capacity = capacity;
        self
    }

    pub fn with_parse_cache_size(mut self, size: usize) -> Self {
        self.parse_cache_size = size;
        self
    }
}
