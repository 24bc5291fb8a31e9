use crate::expression::{Arity, Expression, Op, VARIABLE_NAMES};

/// Lenient flat postfix parser.
///
/// The input is split on whitespace and processed left to right against an operand
/// stack: an operation symbol pops its arity worth of operands (a variadic operation
/// pops the entire stack) and pushes one operation node; a recognized variable name or
/// an integer literal pushes a leaf. Anything else is silently skipped, as is an
/// operation without enough operands on the stack.
///
/// Unlike [`crate::parser::parse_prefix`] and [`crate::parser::parse_postfix`], this
/// parser reports no structural errors: malformed input produces *some* tree (the
/// bottom element of the final stack, with any leftovers discarded), or `None` when
/// nothing was pushed at all. This asymmetry between the parser families is
/// intentional; the flat parser is not meant for unvalidated input.
#[must_use]
pub fn parse(input: &str) -> Option<Expression> {
    let mut stack: Vec<Expression> = Vec::new();
    for word in input.split_whitespace() {
        if VARIABLE_NAMES.contains(&word) {
            stack.push(Expression::mk_variable(word));
        } else if let Ok(value) = word.parse::<i64>() {
            stack.push(Expression::mk_constant(value as f64));
        } else if let Ok(op) = Op::try_from(word) {
            let taken = match op.definition().arity {
                Arity::Exact(count) => count,
                Arity::Variadic => stack.len(),
            };
            if taken == 0 || stack.len() < taken {
                continue;
            }
            let operands = stack.split_off(stack.len() - taken);
            stack.push(Expression::mk_operation(op, operands));
        }
    }
    stack.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, x: f64, y: f64, z: f64) -> f64 {
        parse(input).unwrap().evaluate(x, y, z).unwrap()
    }

    #[test]
    fn test_parse_leaves() {
        assert_eq!(parse("x").unwrap(), Expression::mk_variable("x"));
        assert_eq!(parse(" -3 ").unwrap(), Expression::mk_constant(-3.0));
    }

    #[test]
    fn test_parse_binary_chain() {
        // (x + y) * z
        assert_eq!(eval("x y + z *", 1.0, 2.0, 3.0), 9.0);
        assert_eq!(parse("x y + z *").unwrap().to_string(), "x y + z *");
    }

    #[test]
    fn test_operand_stack_order() {
        // 10 - 4, not 4 - 10
        assert_eq!(eval("10 4 -", 0.0, 0.0, 0.0), 6.0);
    }

    #[test]
    fn test_variadic_consumes_whole_stack() {
        assert_eq!(eval("1 2 6 mean", 0.0, 0.0, 0.0), 3.0);
        assert_eq!(eval("2 5 11 var", 0.0, 0.0, 0.0), 14.0);
        assert_eq!(eval("x mean", 5.0, 0.0, 0.0), 5.0);
    }

    #[test]
    fn test_unknown_tokens_are_skipped() {
        assert_eq!(eval("hello 2 world 3 +", 0.0, 0.0, 0.0), 5.0);
        assert_eq!(eval("1.5 7", 0.0, 0.0, 0.0), 7.0);
    }

    #[test]
    fn test_leftover_operands_yield_bottom_element() {
        // Nothing reduces the stack, so the result is the first pushed leaf.
        assert_eq!(parse("1 2 3").unwrap(), Expression::mk_constant(1.0));
    }

    #[test]
    fn test_operator_without_operands_is_skipped() {
        assert_eq!(parse("+ 1 2").unwrap(), Expression::mk_constant(1.0));
        assert!(parse("mean").is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_none());
        assert!(parse("   \t  ").is_none());
        assert!(parse("garbage tokens only").is_none());
    }
}
