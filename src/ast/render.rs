use crate::ast::ExprTree;
use std::fmt;

/// Appended in place of the last character that fits when a bounded
/// rendering is cut short.
pub const TRUNCATION_MARKER: char = '$';

/// Canonical, fully parenthesized form: `(-x)` for negation and
/// `(l op r)` for every binary node. All levels write into the same
/// formatter, so nesting depth never needs a scratch buffer.
impl fmt::Display for ExprTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // an overflowing literal reads back as infinity
            ExprTree::Value(value) if value.is_infinite() => {
                f.write_str(if value.is_sign_positive() { "1e999" } else { "(-1e999)" })
            }
            ExprTree::Value(value) => write!(f, "{}", value),
            ExprTree::Symbol(name) => f.write_str(name),
            ExprTree::Negate(child) => write!(f, "(-{})", child),
            ExprTree::BinaryOperation {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator.symbol(), right),
        }
    }
}

impl ExprTree {
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Renders into at most `capacity` bytes, counting one byte for the
    /// terminator a fixed-size buffer would need.
    ///
    /// Returns the text and its length in bytes. When the full rendering
    /// does not fit, the text is cut and ends in [`TRUNCATION_MARKER`], and
    /// the length is `capacity - 1`. A cut inside a multi-byte character
    /// backs up to the previous char boundary and reports the shorter
    /// length.
    pub fn render_bounded(&self, capacity: usize) -> (String, usize) {
        if capacity == 0 {
            return (String::new(), 0);
        }

        let mut text = self.render();
        if text.len() < capacity {
            let len = text.len();
            return (text, len);
        }
        if capacity == 1 {
            return (String::new(), 0);
        }

        let mut keep = capacity - 2;
        while !text.is_char_boundary(keep) {
            keep -= 1;
        }
        text.truncate(keep);
        text.push(TRUNCATION_MARKER);
        let len = text.len();
        (text, len)
    }
}
