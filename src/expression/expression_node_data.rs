use crate::expression::{Expression, Op};

/// Enum of possible node types in an expression syntax tree.
///
/// In particular, a node can be:
///     - A "constant" node holding a numeric value.
///     - A "variable" node referencing one of the recognized variable names
///       (see [`crate::expression::VARIABLE_NAMES`]).
///     - An "operation" node with an [`Op`] and an ordered list of operand sub-expressions.
///
/// Nodes are immutable once constructed. Every operation node built by the parsers
/// satisfies the arity recorded in the operation registry; code that consumes trees
/// (evaluation, differentiation) relies on this and does not re-validate it.
#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionNodeData {
    Constant(f64),
    Variable(String),
    Operation(Op, Vec<Expression>),
}
