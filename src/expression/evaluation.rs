use crate::expression::{Expression, ExpressionNodeData, VARIABLE_NAMES};
use anyhow::anyhow;
use std::collections::HashSet;

impl Expression {
    /// Evaluate this expression tree with the given values for the recognized
    /// variables `x`, `y` and `z` (in this order).
    ///
    /// Arithmetic follows `f64` semantics, so division by zero or a logarithm of zero
    /// produces an infinite or NaN result instead of an error. The operation only fails
    /// if the tree contains a variable whose name is not in [`VARIABLE_NAMES`], which
    /// cannot happen for trees built by the parsers.
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> anyhow::Result<f64> {
        self.evaluate_raw(&[x, y, z])
    }

    /// Raw evaluation function taking one value per recognized variable name, in the
    /// order prescribed by [`VARIABLE_NAMES`]. A variable resolves to the value at its
    /// name's position in that list.
    pub fn evaluate_raw(&self, values: &[f64]) -> anyhow::Result<f64> {
        match self.as_data() {
            ExpressionNodeData::Constant(value) => Ok(*value),
            ExpressionNodeData::Variable(name) => {
                let index = VARIABLE_NAMES
                    .iter()
                    .position(|known| *known == name.as_str())
                    .ok_or_else(|| anyhow!("`{name}` is not a recognized variable"))?;
                values
                    .get(index)
                    .copied()
                    .ok_or_else(|| anyhow!("No value provided for variable `{name}`"))
            }
            ExpressionNodeData::Operation(op, operands) => {
                let mut operand_values = Vec::with_capacity(operands.len());
                for operand in operands {
                    operand_values.push(operand.evaluate_raw(values)?);
                }
                Ok((op.definition().eval)(&operand_values))
            }
        }
    }

    /// Collect the names of all variables used in this expression tree.
    #[must_use]
    pub fn collect_variables(&self) -> HashSet<String> {
        fn collect_rec(expression: &Expression, result: &mut HashSet<String>) {
            match expression.as_data() {
                ExpressionNodeData::Constant(_) => (),
                ExpressionNodeData::Variable(name) => {
                    result.insert(name.clone());
                }
                ExpressionNodeData::Operation(_, operands) => {
                    for operand in operands {
                        collect_rec(operand, result);
                    }
                }
            }
        }

        let mut result = HashSet::new();
        collect_rec(self, &mut result);
        result
    }
}
