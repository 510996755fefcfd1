//! Structural tokens consumed by the unmarshaller.
//!
//! A [`Token`] is the smallest unit the decoder looks at: container
//! boundaries, field names, scalar values and `null`. Sources produce them
//! lazily and the [`Cursor`](crate::Cursor) consumes each one exactly once.
//!
//! # Examples
//!
//! ```
//! use depthwalk::{Scalar, Token, TokenKind};
//!
//! let tok = Token::string("data");
//! assert_eq!(tok, Token::Value(Scalar::String("data".to_string())));
//! assert_eq!(tok.kind(), TokenKind::String);
//! ```
use core::fmt;

/// A scalar payload carried by [`Token::Value`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// A string value, already unescaped.
    String(String),
    /// A number, kept as its source lexeme so each numeric decoder can parse
    /// it at its own width without an intermediate `f64`.
    Number(String),
    /// `true` or `false`.
    Boolean(bool),
}

impl Scalar {
    /// The textual form of the scalar, as the primitive decoders read it.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Scalar::String(s) | Scalar::Number(s) => s,
            Scalar::Boolean(true) => "true",
            Scalar::Boolean(false) => "false",
        }
    }
}

/// One structural token of a JSON-like document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// The name of the next field of the enclosing object.
    FieldName(String),
    /// A scalar value.
    Value(Scalar),
    /// The `null` literal.
    Null,
}

impl Token {
    /// Shorthand for `Token::FieldName`.
    pub fn field(name: impl Into<String>) -> Self {
        Token::FieldName(name.into())
    }

    /// Shorthand for a string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Token::Value(Scalar::String(value.into()))
    }

    /// Shorthand for a number scalar; the argument is rendered as the lexeme.
    pub fn number(value: impl fmt::Display) -> Self {
        Token::Value(Scalar::Number(value.to_string()))
    }

    /// Shorthand for a boolean scalar.
    #[must_use]
    pub fn boolean(value: bool) -> Self {
        Token::Value(Scalar::Boolean(value))
    }

    /// The payload-free kind of this token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartObject => TokenKind::StartObject,
            Token::EndObject => TokenKind::EndObject,
            Token::StartArray => TokenKind::StartArray,
            Token::EndArray => TokenKind::EndArray,
            Token::FieldName(_) => TokenKind::FieldName,
            Token::Value(Scalar::String(_)) => TokenKind::String,
            Token::Value(Scalar::Number(_)) => TokenKind::Number,
            Token::Value(Scalar::Boolean(_)) => TokenKind::Boolean,
            Token::Null => TokenKind::Null,
        }
    }

    /// Returns `true` for `StartObject` and `StartArray`.
    #[must_use]
    pub fn is_start(&self) -> bool {
        matches!(self, Token::StartObject | Token::StartArray)
    }

    /// Returns `true` for `EndObject` and `EndArray`.
    #[must_use]
    pub fn is_end(&self) -> bool {
        matches!(self, Token::EndObject | Token::EndArray)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartObject => f.write_str("{"),
            Token::EndObject => f.write_str("}"),
            Token::StartArray => f.write_str("["),
            Token::EndArray => f.write_str("]"),
            Token::FieldName(name) => write!(f, "{name:?}:"),
            Token::Value(Scalar::String(s)) => write!(f, "{s:?}"),
            Token::Value(scalar) => f.write_str(scalar.text()),
            Token::Null => f.write_str("null"),
        }
    }
}

/// The kind of a [`Token`], used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// A field name.
    FieldName,
    /// A string scalar.
    String,
    /// A number scalar.
    Number,
    /// A boolean scalar.
    Boolean,
    /// `null`
    Null,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::StartObject => "start of object",
            TokenKind::EndObject => "end of object",
            TokenKind::StartArray => "start of array",
            TokenKind::EndArray => "end of array",
            TokenKind::FieldName => "field name",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
        })
    }
}
