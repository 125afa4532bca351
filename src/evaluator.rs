use crate::ast::{ExprTree, Parser};
use crate::config::Config;
use crate::dictionary::Dictionary;
use crate::error::Error;
use crate::token::Tokenizer;
use log::debug;
use lru::LruCache;
use std::fmt;
use std::num::NonZeroUsize;

/// Outcome of evaluating one line: its canonical form and its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub expression: String,
    pub value: f64,
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ==> {}", self.expression, self.value)
    }
}

/// A session: one variable dictionary that lives across many expressions.
pub struct Evaluator {
    tokenizer: Tokenizer,
    variables: Dictionary,
    cache: Option<LruCache<String, ExprTree>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl Evaluator {
    /// Creates a new `Evaluator` with a given maximum parse cache size.
    pub fn new(max_cache_size: usize) -> Self {
        Self::with_config(Config::default().with_parse_cache_size(max_cache_size))
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            tokenizer: Tokenizer::new(config.tokenizer),
            variables: Dictionary::with_capacity(config.dictionary_capacity),
            cache: NonZeroUsize::new(config.parse_cache_size).map(LruCache::new),
        }
    }

    pub fn variables(&self) -> &Dictionary {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Dictionary {
        &mut self.variables
    }

    /// Parse an expression string into a tree, reusing a cached tree for
    /// text seen before.
    pub fn parse_expression(&mut self, expression: &str) -> Result<ExprTree, Error> {
        if let Some(tree) = self.cache.as_mut().and_then(|cache| cache.get(expression)) {
            debug!("Parse cache hit: {}", expression);
            return Ok(tree.clone());
        }

        let mut tokens = self.tokenizer.tokenize(expression)?;
        let tree = Parser::parse(&mut tokens)?;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(expression.to_string(), tree.clone());
        }
        Ok(tree)
    }

    /// Evaluates a tree against the session's variables.
    pub fn evaluate(&mut self, tree: &ExprTree) -> Result<f64, Error> {
        Ok(tree.evaluate(&mut self.variables)?)
    }

    /// Runs one line through the whole pipeline.
    ///
    /// Assignments take effect on every call, including cache hits.
    pub fn evaluate_expression(&mut self, expression: &str) -> Result<Evaluation, Error> {
        let tree = self.parse_expression(expression)?;
        let value = self.evaluate(&tree)?;
        debug!("Evaluated {} to {}", expression, value);

        Ok(Evaluation {
            expression: tree.render(),
            value,
        })
    }
}
