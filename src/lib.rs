//! Library for parsing, evaluating, rendering and symbolically differentiating
//! arithmetic expressions written in fully bracketed prefix or postfix notation.
//!
//! Expressions combine integer constants, the variables `x`, `y` and `z`, and a fixed
//! registry of operations: `+`, `-`, `negate`, `*`, `/`, `pow`, `log`, and the variadic
//! statistical operations `mean` and `var`. Parsed trees are immutable; evaluation,
//! rendering and differentiation are pure tree traversals, and differentiation always
//! builds a fresh tree.
//!
//! ```rust
//! use symbolic_arith::parse_prefix;
//!
//! let expression = parse_prefix("(+ x 1)").unwrap();
//! assert_eq!(expression.evaluate(5.0, 0.0, 0.0).unwrap(), 6.0);
//! assert_eq!(expression.to_string(), "x 1 +");
//! assert_eq!(expression.postfix(), "(x 1 +)");
//!
//! let derivative = expression.diff("x");
//! assert_eq!(derivative.evaluate(5.0, 0.0, 0.0).unwrap(), 1.0);
//! ```
//!
//! Besides the two validated bracketed parsers ([`parse_prefix`], [`parse_postfix`]),
//! a lenient whitespace-tokenized postfix parser ([`parse`]) is available for input
//! that is known to be well-formed:
//!
//! ```rust
//! use symbolic_arith::parse;
//!
//! let mean = parse("1 2 6 mean").unwrap();
//! assert_eq!(mean.evaluate(0.0, 0.0, 0.0).unwrap(), 3.0);
//! ```

pub mod expression;
pub mod parser;

mod utils;

pub use expression::{Arity, Expression, ExpressionNodeData, Op, OperationDef, VARIABLE_NAMES};
pub use parser::{parse, parse_postfix, parse_prefix, ParseError};
