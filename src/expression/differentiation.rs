use crate::expression::{Expression, ExpressionNodeData, Op};

impl Expression {
    /// Symbolically differentiate this expression tree with respect to the variable
    /// with the given name. The result is always a freshly built tree; the original
    /// tree is never modified.
    ///
    /// A constant differentiates to zero; a variable differentiates to one if its name
    /// matches and to zero otherwise; an operation applies the derivative rule recorded
    /// in the operation registry, passing its undifferentiated operand subtrees.
    #[must_use]
    pub fn diff(&self, variable: &str) -> Expression {
        match self.as_data() {
            ExpressionNodeData::Constant(_) => Expression::zero(),
            ExpressionNodeData::Variable(name) => {
                if name == variable {
                    Expression::one()
                } else {
                    Expression::zero()
                }
            }
            ExpressionNodeData::Operation(op, operands) => {
                (op.definition().derivative)(variable, operands)
            }
        }
    }
}

fn binary(op: Op, left: Expression, right: Expression) -> Expression {
    Expression::mk_operation(op, vec![left, right])
}

/// Natural logarithm, expressed through the registry's own `log` operation
/// as log base `e`.
fn ln(argument: &Expression) -> Expression {
    binary(Op::Log, Expression::euler(), argument.clone())
}

pub(crate) fn diff_add(variable: &str, operands: &[Expression]) -> Expression {
    binary(Op::Add, operands[0].diff(variable), operands[1].diff(variable))
}

pub(crate) fn diff_sub(variable: &str, operands: &[Expression]) -> Expression {
    binary(Op::Sub, operands[0].diff(variable), operands[1].diff(variable))
}

pub(crate) fn diff_negate(variable: &str, operands: &[Expression]) -> Expression {
    Expression::mk_operation(Op::Negate, vec![operands[0].diff(variable)])
}

/// Product rule: `x'*y + x*y'`.
pub(crate) fn diff_mul(variable: &str, operands: &[Expression]) -> Expression {
    let (x, y) = (&operands[0], &operands[1]);
    binary(
        Op::Add,
        binary(Op::Mul, x.diff(variable), y.clone()),
        binary(Op::Mul, x.clone(), y.diff(variable)),
    )
}

/// Quotient rule: `(x'*y - x*y') / (y*y)`.
pub(crate) fn diff_div(variable: &str, operands: &[Expression]) -> Expression {
    let (x, y) = (&operands[0], &operands[1]);
    binary(
        Op::Div,
        binary(
            Op::Sub,
            binary(Op::Mul, x.diff(variable), y.clone()),
            binary(Op::Mul, x.clone(), y.diff(variable)),
        ),
        binary(Op::Mul, y.clone(), y.clone()),
    )
}

/// Generalized power rule: `x^(y-1) * (y*x' + x*y'*ln(x))`.
pub(crate) fn diff_pow(variable: &str, operands: &[Expression]) -> Expression {
    let (x, y) = (&operands[0], &operands[1]);
    binary(
        Op::Mul,
        binary(Op::Pow, x.clone(), binary(Op::Sub, y.clone(), Expression::one())),
        binary(
            Op::Add,
            binary(Op::Mul, y.clone(), x.diff(variable)),
            binary(
                Op::Mul,
                x.clone(),
                binary(Op::Mul, y.diff(variable), ln(x)),
            ),
        ),
    )
}

/// Change-of-base expansion of `log(x, y)`:
/// `(ln(x)*y'/y - ln(y)*x'/x) / (ln(x)*ln(x))`.
pub(crate) fn diff_log(variable: &str, operands: &[Expression]) -> Expression {
    let (x, y) = (&operands[0], &operands[1]);
    binary(
        Op::Div,
        binary(
            Op::Sub,
            binary(Op::Div, binary(Op::Mul, ln(x), y.diff(variable)), y.clone()),
            binary(Op::Div, binary(Op::Mul, ln(y), x.diff(variable)), x.clone()),
        ),
        binary(Op::Mul, ln(x), ln(x)),
    )
}

/// Differentiates the left-folded sum of the operands, then divides by the original
/// operand count as a constant. The count itself is not differentiated; this exact
/// formula is deliberate.
pub(crate) fn diff_mean(variable: &str, operands: &[Expression]) -> Expression {
    let mut iter = operands.iter().cloned();
    // The parsers guarantee at least one operand.
    let Some(mut sum) = iter.next() else {
        return Expression::zero();
    };
    for operand in iter {
        sum = binary(Op::Add, sum, operand);
    }
    binary(
        Op::Div,
        sum.diff(variable),
        Expression::mk_constant(operands.len() as f64),
    )
}

/// Rewrites variance as `mean(x_0*x_0, ..) - mean(x_0, ..)*mean(x_0, ..)` and
/// differentiates the rewritten tree instead of using a closed-form rule.
pub(crate) fn diff_var(variable: &str, operands: &[Expression]) -> Expression {
    let squares = operands
        .iter()
        .map(|operand| binary(Op::Mul, operand.clone(), operand.clone()))
        .collect::<Vec<_>>();
    let mean_of_squares = Expression::mk_operation(Op::Mean, squares);
    let mean = Expression::mk_operation(Op::Mean, operands.to_vec());
    let rewritten = binary(
        Op::Sub,
        mean_of_squares,
        binary(Op::Mul, mean.clone(), mean),
    );
    rewritten.diff(variable)
}
