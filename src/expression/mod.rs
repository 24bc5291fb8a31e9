mod differentiation;
mod evaluation;
mod expression_node_data;
mod expression_tree;
mod operations;

pub use expression_node_data::ExpressionNodeData;
pub use expression_tree::Expression;
pub use operations::{Arity, Op, OperationDef, VARIABLE_NAMES};
