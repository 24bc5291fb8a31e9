use crate::expression::{ExpressionNodeData, Op};
use crate::parser::{parse_postfix, ParseError};
use crate::utils::take_if_not_blank;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A wrapper type that stores [`ExpressionNodeData`] using an atomic reference counter
/// such that it can be safely cloned without data duplication, or shared between
/// threads. Trees are immutable once constructed: parsing and differentiation always
/// build new trees instead of editing existing ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression(Arc<ExpressionNodeData>);

/// Utility data access.
impl Expression {
    /// Get a reference to the underlying [`ExpressionNodeData`].
    #[must_use]
    pub fn as_data(&self) -> &ExpressionNodeData {
        self.0.as_ref()
    }
}

/// Utility constructors.
impl Expression {
    /// Create an [`Expression`] representing a numeric constant.
    #[must_use]
    pub fn mk_constant(value: f64) -> Expression {
        ExpressionNodeData::Constant(value).into()
    }

    /// Create an [`Expression`] representing a variable.
    ///
    /// The name is not validated here. Evaluation resolves it against
    /// [`crate::expression::VARIABLE_NAMES`] and fails for unknown names; the parsers
    /// only ever construct variables from that list.
    #[must_use]
    pub fn mk_variable(name: impl Into<String>) -> Expression {
        ExpressionNodeData::Variable(name.into()).into()
    }

    /// Create an [`Expression`] representing an operation applied to the given operands.
    #[must_use]
    pub fn mk_operation(op: Op, operands: Vec<Expression>) -> Expression {
        ExpressionNodeData::Operation(op, operands).into()
    }

    /// The canonical zero constant.
    #[must_use]
    pub fn zero() -> Expression {
        Expression::mk_constant(0.0)
    }

    /// The canonical one constant.
    #[must_use]
    pub fn one() -> Expression {
        Expression::mk_constant(1.0)
    }

    /// The canonical two constant.
    #[must_use]
    pub fn two() -> Expression {
        Expression::mk_constant(2.0)
    }

    /// Euler's number as a constant.
    #[must_use]
    pub fn euler() -> Expression {
        Expression::mk_constant(std::f64::consts::E)
    }
}

impl Expression {
    /// Render this tree in fully parenthesized prefix notation:
    /// `(<symbol> <operand> ...)`, with constants and variables unparenthesized.
    ///
    /// The output re-parses through [`crate::parser::parse_prefix`] to an
    /// identically rendered tree.
    #[must_use]
    pub fn prefix(&self) -> String {
        let mut out = String::new();
        self.write_prefix(&mut out);
        out
    }

    /// Render this tree in fully parenthesized postfix notation:
    /// `(<operand> ... <symbol>)`, with constants and variables unparenthesized.
    #[must_use]
    pub fn postfix(&self) -> String {
        let mut out = String::new();
        self.write_postfix(&mut out);
        out
    }

    fn write_prefix(&self, out: &mut String) {
        match self.as_data() {
            ExpressionNodeData::Constant(_) | ExpressionNodeData::Variable(_) => {
                out.push_str(&self.to_string());
            }
            ExpressionNodeData::Operation(op, operands) => {
                out.push('(');
                out.push_str(op.definition().symbol);
                for operand in operands {
                    out.push(' ');
                    operand.write_prefix(out);
                }
                out.push(')');
            }
        }
    }

    fn write_postfix(&self, out: &mut String) {
        match self.as_data() {
            ExpressionNodeData::Constant(_) | ExpressionNodeData::Variable(_) => {
                out.push_str(&self.to_string());
            }
            ExpressionNodeData::Operation(op, operands) => {
                out.push('(');
                for operand in operands {
                    operand.write_postfix(out);
                    out.push(' ');
                }
                out.push_str(op.definition().symbol);
                out.push(')');
            }
        }
    }
}

impl Expression {
    /// The same as parsing via [`crate::parser::parse_postfix`], but if the input string
    /// is blank, the method returns `None`.
    #[must_use]
    pub fn parse_optional(input: &str) -> Option<Result<Expression, ParseError>> {
        let value = take_if_not_blank(input)?;
        Some(parse_postfix(value.as_str()))
    }
}

impl TryFrom<&str> for Expression {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        parse_postfix(value)
    }
}

impl AsRef<ExpressionNodeData> for Expression {
    fn as_ref(&self) -> &ExpressionNodeData {
        self.as_data()
    }
}

impl From<ExpressionNodeData> for Expression {
    fn from(value: ExpressionNodeData) -> Self {
        Expression(Arc::new(value))
    }
}

/// The flat rendering: always postfix-shaped regardless of the notation the tree was
/// parsed from, with operands followed by the operation symbol and no parentheses.
impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.as_data() {
            ExpressionNodeData::Constant(value) => write_constant(f, *value),
            ExpressionNodeData::Variable(name) => write!(f, "{name}"),
            ExpressionNodeData::Operation(op, operands) => {
                for operand in operands {
                    write!(f, "{operand} ")?;
                }
                write!(f, "{op}")
            }
        }
    }
}

/// Integral constants render without a decimal point so that rendered trees re-parse
/// through the integer-literal-only parsers.
fn write_constant(f: &mut Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.fract() == 0.0 && value.abs() < 9e15 {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{value}")
    }
}

impl Serialize for Expression {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.postfix().as_str())
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Expression::try_from(value.as_str()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expression {
        // (x + 2) * negate(y)
        Expression::mk_operation(
            Op::Mul,
            vec![
                Expression::mk_operation(
                    Op::Add,
                    vec![Expression::mk_variable("x"), Expression::mk_constant(2.0)],
                ),
                Expression::mk_operation(Op::Negate, vec![Expression::mk_variable("y")]),
            ],
        )
    }

    #[test]
    fn test_flat_rendering() {
        assert_eq!(Expression::mk_constant(5.0).to_string(), "5");
        assert_eq!(Expression::mk_variable("x").to_string(), "x");
        assert_eq!(sample().to_string(), "x 2 + y negate *");
    }

    #[test]
    fn test_prefix_rendering() {
        assert_eq!(sample().prefix(), "(* (+ x 2) (negate y))");
        assert_eq!(Expression::mk_variable("z").prefix(), "z");
    }

    #[test]
    fn test_postfix_rendering() {
        assert_eq!(sample().postfix(), "((x 2 +) (y negate) *)");
        assert_eq!(Expression::mk_constant(-3.0).postfix(), "-3");
    }

    #[test]
    fn test_constant_rendering() {
        assert_eq!(Expression::mk_constant(-17.0).to_string(), "-17");
        assert_eq!(Expression::mk_constant(0.0).to_string(), "0");
        assert_eq!(Expression::euler().to_string(), "2.718281828459045");
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(sample(), sample());
        assert_ne!(sample(), Expression::mk_constant(1.0));
        // A clone shares the same data, so it must compare equal.
        let tree = sample();
        assert_eq!(tree, tree.clone());
    }

    #[test]
    fn test_parse_optional() {
        assert!(Expression::parse_optional("   ").is_none());
        let parsed = Expression::parse_optional(" (x y +) ").unwrap().unwrap();
        assert_eq!(parsed.to_string(), "x y +");
    }

    #[test]
    fn test_serde_round_trip() {
        let tree = sample();
        let serialized = serde_json::to_string(&tree).unwrap();
        assert_eq!(serialized, "\"((x 2 +) (y negate) *)\"");
        let deserialized: Expression = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, tree);
    }

    #[test]
    fn test_serde_rejects_malformed_input() {
        let result = serde_json::from_str::<Expression>("\"(x +)\"");
        assert!(result.is_err());
    }
}
