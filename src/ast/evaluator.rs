use crate::ast::{ExprTree, Operator};
use crate::dictionary::Dictionary;
use crate::error::EvalError;
use log::trace;

impl ExprTree {
    /// Evaluates the tree against `variables`, storing the results of any
    /// assignments in it.
    ///
    /// Undefined variables and non-symbol assignment targets are errors.
    /// Arithmetic itself never fails: division by zero, overflow and the
    /// like come back as infinities or NaN.
    pub fn evaluate(&self, variables: &mut Dictionary) -> Result<f64, EvalError> {
        match self {
            ExprTree::Value(value) => Ok(*value),

            ExprTree::Symbol(name) => variables
                .get(name)
                .ok_or_else(|| EvalError::UndefinedVariable(name.clone())),

            ExprTree::Negate(child) => Ok(-child.evaluate(variables)?),

            ExprTree::BinaryOperation {
                operator: Operator::Assign,
                left,
                right,
            } => {
                let ExprTree::Symbol(name) = left.as_ref() else {
                    return Err(EvalError::InvalidAssignmentTarget);
                };
                let value = right.evaluate(variables)?;
                trace!("{} = {}", name, value);
                variables.store(name, value);
                Ok(value)
            }

            ExprTree::BinaryOperation {
                operator,
                left,
                right,
            } => {
                let left_value = left.evaluate(variables)?;
                let right_value = right.evaluate(variables)?;
                Ok(operator.apply(left_value, right_value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parser;

    fn vars() -> Dictionary {
        let mut vars = Dictionary::new();
        vars.store("x", 0.8);
        vars.store("y", 0.2);
        vars
    }

    #[test]
    fn test_symbols_and_assignments() {
        let mut vars = vars();

        let tree = ExprTree::node(Operator::Add, ExprTree::symbol("x"), ExprTree::symbol("y"));
        assert_eq!(tree.evaluate(&mut vars), Ok(1.0));

        let tree = ExprTree::node(Operator::Assign, ExprTree::symbol("t"), ExprTree::symbol("x"));
        assert_eq!(tree.evaluate(&mut vars), Ok(0.8));
        assert_eq!(vars.retrieve("t"), 0.8);

        let tree = ExprTree::node(Operator::Assign, ExprTree::symbol("g"), ExprTree::value(25.0));
        assert_eq!(tree.evaluate(&mut vars), Ok(25.0));

        // x = x - y
        let tree = ExprTree::node(
            Operator::Assign,
            ExprTree::symbol("x"),
            ExprTree::node(Operator::Subtract, ExprTree::symbol("x"), ExprTree::symbol("y")),
        );
        let result = tree.evaluate(&mut vars).unwrap();
        assert!((result - 0.6).abs() < 0.0001);

        let result = ExprTree::symbol("x").evaluate(&mut vars).unwrap();
        assert!((result - 0.6).abs() < 0.0001);
    }

    #[test]
    fn test_undefined_variable() {
        let err = ExprTree::symbol("pi").evaluate(&mut vars()).unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("pi".to_string()));
        assert_eq!(err.to_string(), "Undefined variable: pi");
    }

    #[test]
    fn test_failure_short_circuits_before_the_operator() {
        let mut vars = vars();
        // the right side would assign, but the left side fails first
        let tree = ExprTree::node(
            Operator::Add,
            ExprTree::symbol("missing"),
            ExprTree::node(Operator::Assign, ExprTree::symbol("z"), ExprTree::value(1.0)),
        );
        assert_eq!(
            tree.evaluate(&mut vars),
            Err(EvalError::UndefinedVariable("missing".to_string()))
        );
        assert!(!vars.contains("z"));

        let tree = ExprTree::negate(ExprTree::symbol("nope"));
        assert!(tree.evaluate(&mut vars).is_err());
    }

    #[test]
    fn test_invalid_assignment_target() {
        let mut vars = vars();
        let tree = Parser::parse_expression("1 + x = 3").unwrap();
        let err = tree.evaluate(&mut vars).unwrap_err();
        assert_eq!(err, EvalError::InvalidAssignmentTarget);
        assert_eq!(err.to_string(), "Left side of assignment must be a symbol");
        assert_eq!(vars.retrieve("x"), 0.8);
    }

    #[test]
    fn test_chained_assignment_stores_right_to_left() {
        let mut vars = Dictionary::new();
        let tree = Parser::parse_expression("a = b = c = 4").unwrap();
        assert_eq!(tree.evaluate(&mut vars), Ok(4.0));
        assert_eq!(vars.retrieve("a"), 4.0);
        assert_eq!(vars.retrieve("b"), 4.0);
        assert_eq!(vars.retrieve("c"), 4.0);
        assert_eq!(vars.len(), 3);
    }

    #[test]
    fn test_assignment_overwrites() {
        let mut vars = Dictionary::new();
        Parser::parse_expression("x = 25")
            .unwrap()
            .evaluate(&mut vars)
            .unwrap();
        assert_eq!(ExprTree::symbol("x").evaluate(&mut vars), Ok(25.0));

        Parser::parse_expression("x = x * 2")
            .unwrap()
            .evaluate(&mut vars)
            .unwrap();
        assert_eq!(vars.retrieve("x"), 50.0);
        assert_eq!(vars.len(), 1);
    }

    #[test]
    fn test_special_values_are_results_not_errors() {
        let mut vars = Dictionary::new();
        let eval = |s: &str, vars: &mut Dictionary| {
            Parser::parse_expression(s).unwrap().evaluate(vars)
        };
        assert_eq!(eval("1 / 0", &mut vars), Ok(f64::INFINITY));
        assert_eq!(eval("-1 / 0", &mut vars), Ok(f64::NEG_INFINITY));
        assert!(eval("0 / 0", &mut vars).unwrap().is_nan());
        assert!(eval("(-8) ^ 0.5", &mut vars).unwrap().is_nan());
        assert_eq!(eval("10 ^ 400", &mut vars), Ok(f64::INFINITY));

        // NaN cannot be stored, but the assignment still yields it
        assert!(eval("n = 0 / 0", &mut vars).unwrap().is_nan());
        assert!(!vars.contains("n"));
    }

    #[test]
    fn test_double_negation() {
        let value = 0.125;
        let tree = ExprTree::negate(ExprTree::value(value));
        assert_eq!(tree.evaluate(&mut vars()), Ok(-value));
        assert_eq!(tree.depth(), 2);

        let tree = ExprTree::negate(tree);
        assert_eq!(tree.evaluate(&mut vars()), Ok(value));
        assert_eq!(tree.depth(), 3);

        let parsed = Parser::parse_expression("-(-0.125)").unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn test_product_of_sum() {
        let tree = ExprTree::node(
            Operator::Multiply,
            ExprTree::value(6.5),
            ExprTree::node(Operator::Add, ExprTree::value(4.0), ExprTree::value(3.0)),
        );
        assert_eq!(tree.evaluate(&mut vars()), Ok(45.5));
        assert_eq!(tree.depth(), 3);
    }
}
