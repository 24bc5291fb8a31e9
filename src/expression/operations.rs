use crate::expression::differentiation;
use crate::expression::Expression;
use std::fmt;

/// The fixed, ordered list of recognized variable names. A variable's position in this
/// list is its index into the value list supplied to [`Expression::evaluate_raw`].
pub const VARIABLE_NAMES: [&str; 3] = ["x", "y", "z"];

/// Operations admissible in expressions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Op {
    Add,
    Sub,
    Negate,
    Mul,
    Div,
    Pow,
    Log,
    Mean,
    Var,
}

/// The number of operands an operation accepts.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Arity {
    /// Exactly this many operands.
    Exact(usize),
    /// Any number of operands, at least one.
    Variadic,
}

impl Arity {
    /// Check whether the given operand count satisfies this arity.
    #[must_use]
    pub fn admits(self, count: usize) -> bool {
        match self {
            Arity::Exact(expected) => count == expected,
            Arity::Variadic => count >= 1,
        }
    }
}

/// A single operation registry entry: everything the parsers, the evaluator, and the
/// differentiation engine need to know about one operation.
///
/// The eval function receives one value per operand, in operand order. The derivative
/// rule receives the differentiation variable and the *undifferentiated* operand
/// subtrees, and returns a freshly built derivative tree. Both may assume the operand
/// count satisfies [`OperationDef::arity`].
pub struct OperationDef {
    pub symbol: &'static str,
    pub arity: Arity,
    pub eval: fn(&[f64]) -> f64,
    pub derivative: fn(&str, &[Expression]) -> Expression,
}

static ADD: OperationDef = OperationDef {
    symbol: "+",
    arity: Arity::Exact(2),
    eval: |args| args[0] + args[1],
    derivative: differentiation::diff_add,
};

static SUB: OperationDef = OperationDef {
    symbol: "-",
    arity: Arity::Exact(2),
    eval: |args| args[0] - args[1],
    derivative: differentiation::diff_sub,
};

static NEGATE: OperationDef = OperationDef {
    symbol: "negate",
    arity: Arity::Exact(1),
    eval: |args| -args[0],
    derivative: differentiation::diff_negate,
};

static MUL: OperationDef = OperationDef {
    symbol: "*",
    arity: Arity::Exact(2),
    eval: |args| args[0] * args[1],
    derivative: differentiation::diff_mul,
};

static DIV: OperationDef = OperationDef {
    symbol: "/",
    arity: Arity::Exact(2),
    eval: |args| args[0] / args[1],
    derivative: differentiation::diff_div,
};

static POW: OperationDef = OperationDef {
    symbol: "pow",
    arity: Arity::Exact(2),
    eval: |args| args[0].powf(args[1]),
    derivative: differentiation::diff_pow,
};

/// Log base `|x|` of `|y|`.
static LOG: OperationDef = OperationDef {
    symbol: "log",
    arity: Arity::Exact(2),
    eval: |args| args[1].abs().ln() / args[0].abs().ln(),
    derivative: differentiation::diff_log,
};

static MEAN: OperationDef = OperationDef {
    symbol: "mean",
    arity: Arity::Variadic,
    eval: eval_mean,
    derivative: differentiation::diff_mean,
};

static VAR: OperationDef = OperationDef {
    symbol: "var",
    arity: Arity::Variadic,
    eval: eval_var,
    derivative: differentiation::diff_var,
};

impl Op {
    /// Look up the registry entry of this operation.
    ///
    /// The registry is immutable and fully constructed before any parsing happens;
    /// unknown symbols are rejected by the parsers, never by the registry itself.
    #[must_use]
    pub fn definition(self) -> &'static OperationDef {
        match self {
            Op::Add => &ADD,
            Op::Sub => &SUB,
            Op::Negate => &NEGATE,
            Op::Mul => &MUL,
            Op::Div => &DIV,
            Op::Pow => &POW,
            Op::Log => &LOG,
            Op::Mean => &MEAN,
            Op::Var => &VAR,
        }
    }
}

fn eval_mean(args: &[f64]) -> f64 {
    args.iter().sum::<f64>() / args.len() as f64
}

/// Population variance: `mean(x_i^2) - mean(x_i)^2`.
fn eval_var(args: &[f64]) -> f64 {
    let mean = eval_mean(args);
    let mean_of_squares = args.iter().map(|value| value * value).sum::<f64>() / args.len() as f64;
    mean_of_squares - mean * mean
}

impl TryFrom<&str> for Op {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Op::Add),
            "-" => Ok(Op::Sub),
            "negate" => Ok(Op::Negate),
            "*" => Ok(Op::Mul),
            "/" => Ok(Op::Div),
            "pow" => Ok(Op::Pow),
            "log" => Ok(Op::Log),
            "mean" => Ok(Op::Mean),
            "var" => Ok(Op::Var),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition().symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_OPS: [Op; 9] = [
        Op::Add,
        Op::Sub,
        Op::Negate,
        Op::Mul,
        Op::Div,
        Op::Pow,
        Op::Log,
        Op::Mean,
        Op::Var,
    ];

    #[test]
    fn test_symbol_round_trip() {
        for op in ALL_OPS {
            let symbol = op.definition().symbol;
            assert_eq!(Op::try_from(symbol), Ok(op));
            assert_eq!(op.to_string(), symbol);
        }
    }

    #[test]
    fn test_unknown_symbols_rejected() {
        assert_eq!(Op::try_from("sin"), Err(()));
        assert_eq!(Op::try_from(""), Err(()));
        assert_eq!(Op::try_from("x"), Err(()));
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(Op::Add.definition().arity, Arity::Exact(2));
        assert_eq!(Op::Negate.definition().arity, Arity::Exact(1));
        assert_eq!(Op::Mean.definition().arity, Arity::Variadic);
        assert_eq!(Op::Var.definition().arity, Arity::Variadic);
    }

    #[test]
    fn test_arity_admits() {
        assert!(Arity::Exact(2).admits(2));
        assert!(!Arity::Exact(2).admits(1));
        assert!(!Arity::Exact(2).admits(3));
        assert!(Arity::Variadic.admits(1));
        assert!(Arity::Variadic.admits(10));
        assert!(!Arity::Variadic.admits(0));
    }

    #[test]
    fn test_binary_eval() {
        assert_eq!((Op::Add.definition().eval)(&[2.0, 3.0]), 5.0);
        assert_eq!((Op::Sub.definition().eval)(&[2.0, 3.0]), -1.0);
        assert_eq!((Op::Mul.definition().eval)(&[2.0, 3.0]), 6.0);
        assert_eq!((Op::Div.definition().eval)(&[3.0, 2.0]), 1.5);
        assert_eq!((Op::Negate.definition().eval)(&[4.0]), -4.0);
        assert_eq!((Op::Pow.definition().eval)(&[2.0, 10.0]), 1024.0);
    }

    #[test]
    fn test_log_eval_uses_absolute_values() {
        let log = Op::Log.definition().eval;
        assert!((log(&[2.0, 8.0]) - 3.0).abs() < 1e-12);
        assert!((log(&[-2.0, -8.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero_is_not_an_error() {
        assert!((Op::Div.definition().eval)(&[1.0, 0.0]).is_infinite());
    }

    #[test]
    fn test_aggregate_eval() {
        assert_eq!(eval_mean(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(eval_mean(&[5.0]), 5.0);
        assert_eq!(eval_var(&[2.0, 5.0, 11.0]), 14.0);
        assert_eq!(eval_var(&[7.0]), 0.0);
    }
}
