pub mod ast;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod evaluator;
pub mod token;

pub use ast::{ExprTree, Operator, Parser};
pub use config::Config;
pub use dictionary::Dictionary;
pub use error::{DictionaryError, Error, EvalError, ParseError, TokenizeError};
pub use evaluator::{Evaluation, Evaluator};
pub use token::{tokenize, Token, TokenSequence, TokenType};

/// Tokenizes, parses and evaluates `expression` in one go, reading and
/// assigning variables in `variables`.
pub fn evaluate_expression(expression: &str, variables: &mut Dictionary) -> Result<f64, Error> {
    let tree = Parser::parse_expression(expression)?;
    Ok(tree.evaluate(variables)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios() {
        let mut variables = Dictionary::new();

        let tokens = tokenize("3 + 2").unwrap();
        assert_eq!(
            tokens.iter().cloned().collect::<Vec<_>>(),
            vec![Token::Value(3.0), Token::Plus, Token::Value(2.0)]
        );
        assert_eq!(evaluate_expression("3 + 2", &mut variables), Ok(5.0));

        assert_eq!(evaluate_expression("x = 25", &mut variables), Ok(25.0));
        assert_eq!(evaluate_expression("x", &mut variables), Ok(25.0));

        let tree = Parser::parse_expression("-(-0.125)").unwrap();
        assert_eq!(tree.render(), "(-(-0.125))");
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.evaluate(&mut variables), Ok(0.125));

        let tree = Parser::parse_expression("6.5 * (4 + 3)").unwrap();
        assert_eq!(tree.render(), "(6.5 * (4 + 3))");
        assert_eq!(tree.depth(), 3);
        assert_eq!(evaluate_expression("6.5 * (4 + 3)", &mut variables), Ok(45.5));

        assert_eq!(
            evaluate_expression("3 + 2)", &mut variables),
            Err(Error::Parse(ParseError::TrailingToken(TokenType::CloseParen)))
        );
        assert_eq!(
            evaluate_expression("pi", &mut variables),
            Err(Error::Eval(EvalError::UndefinedVariable("pi".to_string())))
        );
    }
}
