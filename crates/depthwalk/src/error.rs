use thiserror::Error;

use crate::token::TokenKind;

/// Errors produced while decoding a token stream into typed values.
///
/// Every variant that can be attributed to a position in the document carries
/// the name of the field being decoded (when known) and the cursor depth, so
/// callers can report failures without unwinding.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The JSON text itself is malformed.
    #[error("{source} at {line}:{column}")]
    Syntax {
        /// What the lexer rejected.
        source: SyntaxError,
        /// 1-based line of the offending character.
        line: usize,
        /// 1-based column of the offending character.
        column: usize,
    },
    /// A token did not fit the grammar or the kind the decoder expected.
    #[error("expected {expected}, found {found}{}", location(.field, .depth))]
    UnexpectedToken {
        /// What the decoder was looking for.
        expected: &'static str,
        /// What it got.
        found: TokenKind,
        /// The field being decoded, if any.
        field: Option<String>,
        /// Cursor depth at the failure.
        depth: usize,
    },
    /// The stream ended while a value or container was still open.
    #[error("unexpected end of token stream{}", location(.field, .depth))]
    UnexpectedEnd {
        /// The field being decoded, if any.
        field: Option<String>,
        /// Cursor depth at the failure.
        depth: usize,
    },
    /// A scalar had the right token kind but its text could not be converted.
    #[error("invalid {kind} value {text:?}: {reason}{}", in_field(.field))]
    InvalidValue {
        /// The target kind, e.g. `"i32"` or `"blob"`.
        kind: &'static str,
        /// The scalar text as read.
        text: String,
        /// The field being decoded, if any.
        field: Option<String>,
        /// Why the conversion failed.
        reason: String,
    },
    /// A nested composite was requested but its type was never registered.
    #[error("no unmarshaller registered for `{type_name}`")]
    NotRegistered {
        /// `Composite::NAME` of the missing type.
        type_name: &'static str,
    },
    /// Container nesting went past `DecodeOptions::max_depth`.
    #[error("container nesting exceeds the limit of {limit}")]
    DepthLimitExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// A complete top-level document was followed by more tokens.
    #[error("trailing {found} after the end of the document")]
    TrailingTokens {
        /// The first extra token.
        found: TokenKind,
    },
}

impl DecodeError {
    /// The field being decoded when the failure happened, if known.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::UnexpectedToken { field, .. }
            | DecodeError::UnexpectedEnd { field, .. }
            | DecodeError::InvalidValue { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}

#[allow(clippy::ref_option, clippy::trivially_copy_pass_by_ref)]
fn location(field: &Option<String>, depth: &usize) -> String {
    match (field, *depth) {
        (Some(field), 0) => format!(" in field `{field}`"),
        (Some(field), depth) => format!(" in field `{field}` at depth {depth}"),
        (None, 0) => String::new(),
        (None, depth) => format!(" at depth {depth}"),
    }
}

#[allow(clippy::ref_option)]
fn in_field(field: &Option<String>) -> String {
    location(field, &0)
}

/// Lexical and grammatical errors in JSON text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot appear at this point.
    #[error("invalid character '{0}'")]
    InvalidCharacter(String),
    /// A non-hex digit inside `\u` escape.
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    /// A `\u` escape that does not denote a Unicode scalar value.
    #[error("invalid unicode escape sequence \\u{0:X}")]
    InvalidUnicodeEscapeSequence(u32),
    /// The input ended inside a value or container.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
