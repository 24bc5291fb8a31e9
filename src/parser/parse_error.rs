use thiserror::Error;

/// An error raised by the bracketed prefix/postfix parsers. Every error carries the
/// character offset of the offending position in the input string. Errors are fatal:
/// parsing aborts on the first one, with no partial result or recovery.
///
/// The two variants distinguish malformed structure from well-bracketed but
/// semantically wrong operation usage. The lenient stack parser
/// (see [`crate::parser::parse`]) deliberately has no error reporting at all.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Error)]
pub enum ParseError {
    /// Malformed structure: empty input, missing closing bracket, trailing content,
    /// a bare operation symbol with no parentheses, or an unknown token.
    #[error("Invalid format at position `{position}`: {message}")]
    InvalidFormat { position: usize, message: String },

    /// Well-bracketed but semantically wrong: zero or multiple operation symbols in
    /// one bracket group, an operation symbol in the wrong position, or an operand
    /// count that does not match the operation's arity.
    #[error("Invalid operation at position `{position}`: {message}")]
    InvalidOperation { position: usize, message: String },
}

impl ParseError {
    pub(crate) fn invalid_format(position: usize, message: String) -> ParseError {
        ParseError::InvalidFormat { position, message }
    }

    pub(crate) fn invalid_operation(position: usize, message: String) -> ParseError {
        ParseError::InvalidOperation { position, message }
    }

    /// The character offset of the offending position in the input string.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            ParseError::InvalidFormat { position, .. }
            | ParseError::InvalidOperation { position, .. } => *position,
        }
    }

    /// Human-readable description of the problem, without the position.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ParseError::InvalidFormat { message, .. }
            | ParseError::InvalidOperation { message, .. } => message.as_str(),
        }
    }
}
