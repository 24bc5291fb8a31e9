use crate::expression::{Arity, Expression, Op, VARIABLE_NAMES};
use crate::parser::ParseError;

/// Where the operation symbol sits inside a bracket group.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Notation {
    /// The operation symbol is the first token of the group: `(+ x y)`.
    Prefix,
    /// The operation symbol is the last token of the group: `(x y +)`.
    Postfix,
}

/// One parsed top-level item of a bracket group: either a finished subtree, or an
/// operation symbol (with its character offset) waiting to be consumed by the
/// enclosing group.
enum ParsedToken {
    Node(Expression),
    Operator(Op, usize),
}

/// Parse a fully bracketed prefix expression, such as `(* (+ x 2) (negate y))`.
pub fn parse_prefix(input: &str) -> Result<Expression, ParseError> {
    parse_bracketed(input, Notation::Prefix)
}

/// Parse a fully bracketed postfix expression, such as `((x 2 +) (y negate) *)`.
pub fn parse_postfix(input: &str) -> Result<Expression, ParseError> {
    parse_bracketed(input, Notation::Postfix)
}

fn parse_bracketed(input: &str, notation: Notation) -> Result<Expression, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let position = skip_whitespace(&chars, 0);
    let (token, position) = parse_argument(&chars, position, notation)?;
    let position = skip_whitespace(&chars, position);
    if position < chars.len() {
        let message = format!("Unexpected `{}` after the end of the expression", chars[position]);
        return Err(ParseError::invalid_format(position, message));
    }
    match token {
        ParsedToken::Node(expression) => Ok(expression),
        ParsedToken::Operator(op, at) => {
            let message = format!("Operation `{op}` must be enclosed in parentheses");
            Err(ParseError::invalid_format(at, message))
        }
    }
}

fn skip_whitespace(input: &[char], mut position: usize) -> usize {
    while position < input.len() && input[position].is_whitespace() {
        position += 1;
    }
    position
}

/// Parse a single token starting at `start_at`: a parenthesized operation group, or a
/// maximal run of non-whitespace, non-parenthesis characters classified as a variable,
/// an integer constant, or an operation symbol. Returns the token together with the
/// position of the first character after it.
fn parse_argument(
    input: &[char],
    start_at: usize,
    notation: Notation,
) -> Result<(ParsedToken, usize), ParseError> {
    if start_at < input.len() && input[start_at] == '(' {
        return parse_operation(input, start_at, notation);
    }

    let mut position = start_at;
    let mut word = String::new();
    while position < input.len()
        && !input[position].is_whitespace()
        && input[position] != '('
        && input[position] != ')'
    {
        word.push(input[position]);
        position += 1;
    }

    if word.is_empty() {
        let message = "Expected an expression".to_string();
        return Err(ParseError::invalid_format(start_at, message));
    }
    if VARIABLE_NAMES.contains(&word.as_str()) {
        return Ok((ParsedToken::Node(Expression::mk_variable(word)), position));
    }
    // Only whole numbers are accepted as literals.
    if let Ok(value) = word.parse::<i64>() {
        return Ok((ParsedToken::Node(Expression::mk_constant(value as f64)), position));
    }
    if let Ok(op) = Op::try_from(word.as_str()) {
        return Ok((ParsedToken::Operator(op, start_at), position));
    }
    let message = format!("`{word}` is not a variable, a constant, or an operation");
    Err(ParseError::invalid_format(start_at, message))
}

/// Parse one parenthesized operation group starting at the opening `(`. Top-level
/// tokens of the group are collected until the matching `)`; the group must contain
/// exactly one operation symbol, placed according to `notation`, with an operand
/// count admitted by the operation's registered arity.
fn parse_operation(
    input: &[char],
    start_at: usize,
    notation: Notation,
) -> Result<(ParsedToken, usize), ParseError> {
    debug_assert_eq!(input[start_at], '(');

    let mut position = start_at + 1;
    let mut operands: Vec<Expression> = Vec::new();
    // (token index within the group, operation, character offset)
    let mut operators: Vec<(usize, Op, usize)> = Vec::new();
    let mut token_index = 0;

    loop {
        position = skip_whitespace(input, position);
        if position >= input.len() {
            let message = "Expected `)` but found the end of input".to_string();
            return Err(ParseError::invalid_format(position, message));
        }
        if input[position] == ')' {
            position += 1;
            break;
        }
        let (token, next) = parse_argument(input, position, notation)?;
        match token {
            ParsedToken::Node(expression) => operands.push(expression),
            ParsedToken::Operator(op, at) => operators.push((token_index, op, at)),
        }
        token_index += 1;
        position = next;
    }

    if operators.len() != 1 {
        let message = format!(
            "Expected exactly one operation symbol inside the group; found {}",
            operators.len()
        );
        return Err(ParseError::invalid_operation(start_at, message));
    }
    let (op_index, op, op_at) = operators[0];

    let expected_index = match notation {
        Notation::Prefix => 0,
        Notation::Postfix => operands.len(),
    };
    if op_index != expected_index {
        let message = match notation {
            Notation::Prefix => format!("Operation `{op}` must be the first token of the group"),
            Notation::Postfix => format!("Operation `{op}` must be the last token of the group"),
        };
        return Err(ParseError::invalid_operation(op_at, message));
    }

    if operands.is_empty() {
        let message = format!("Operation `{op}` expects at least one operand");
        return Err(ParseError::invalid_operation(start_at, message));
    }
    if let Arity::Exact(expected) = op.definition().arity {
        if operands.len() != expected {
            let message = format!(
                "Operation `{op}` expects {expected} operand(s); found {}",
                operands.len()
            );
            return Err(ParseError::invalid_operation(start_at, message));
        }
    }

    Ok((ParsedToken::Node(Expression::mk_operation(op, operands)), position))
}
