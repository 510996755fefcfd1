//! The [`Decode`] trait and the primitive decoders.
//!
//! Every decoder is entered with the cursor sitting on the value's first
//! token and returns with the cursor on the value's last token. `null`
//! decodes to `None` for every kind.
use core::fmt;

use base64::{Engine as _, prelude::BASE64_STANDARD};
use time::OffsetDateTime;

use crate::{
    cursor::Cursor,
    error::DecodeError,
    registry::Registry,
    token::{Scalar, Token},
};

/// Describes how a field's value is decoded; used for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// A scalar of the named kind.
    Primitive(&'static str),
    /// A nested composite, by `Composite::NAME`.
    Composite(&'static str),
    /// An array of the inner shape.
    Sequence(Box<Shape>),
    /// An object with string keys and values of the inner shape.
    Mapping(Box<Shape>),
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Primitive(kind) => f.write_str(kind),
            Shape::Composite(name) => f.write_str(name),
            Shape::Sequence(inner) => write!(f, "[{inner}]"),
            Shape::Mapping(inner) => write!(f, "{{string: {inner}}}"),
        }
    }
}

/// A type that can be read from the cursor's current position.
pub trait Decode: Sized {
    /// Decodes one value starting at the current token.
    ///
    /// Returns `Ok(None)` for `null`.
    ///
    /// # Errors
    ///
    /// Fails on a token of the wrong kind, on unconvertible scalar text, or on
    /// a malformed stream.
    fn decode(cursor: &mut Cursor<'_>, registry: &Registry) -> Result<Option<Self>, DecodeError>;

    /// The decoding rule this type stands for.
    fn shape() -> Shape;
}

/// Reads the current scalar's text, `None` for `null`.
///
/// `accept` decides which scalar kinds are acceptable for `expected`.
fn scalar<'c>(
    cursor: &'c Cursor<'_>,
    expected: &'static str,
    accept: fn(&Scalar) -> bool,
) -> Result<Option<&'c Scalar>, DecodeError> {
    match cursor.current() {
        Some(Token::Null) => Ok(None),
        Some(Token::Value(s)) if accept(s) => Ok(Some(s)),
        Some(other) => Err(cursor.unexpected(expected, other.kind())),
        None => Err(cursor.unexpected_end()),
    }
}

impl Decode for String {
    fn decode(cursor: &mut Cursor<'_>, _: &Registry) -> Result<Option<Self>, DecodeError> {
        let value = scalar(cursor, "string", |s| matches!(s, Scalar::String(_)))?;
        Ok(value.map(|s| s.text().to_owned()))
    }

    fn shape() -> Shape {
        Shape::Primitive("string")
    }
}

impl Decode for bool {
    fn decode(cursor: &mut Cursor<'_>, _: &Registry) -> Result<Option<Self>, DecodeError> {
        let accept = |s: &Scalar| match s {
            Scalar::Boolean(_) => true,
            Scalar::String(t) => t == "true" || t == "false",
            Scalar::Number(_) => false,
        };
        let value = scalar(cursor, "boolean", accept)?;
        Ok(value.map(|s| s.text() == "true"))
    }

    fn shape() -> Shape {
        Shape::Primitive("boolean")
    }
}

fn numeric(s: &Scalar) -> bool {
    !matches!(s, Scalar::Boolean(_))
}

// Numbers are read from the token text, so both `5` and `"5"` decode.
macro_rules! impl_decode_for_number {
    ($($t:ty),+) => {
        $(
            impl Decode for $t {
                fn decode(cursor: &mut Cursor<'_>, _: &Registry) -> Result<Option<Self>, DecodeError> {
                    let Some(value) = scalar(cursor, stringify!($t), numeric)? else {
                        return Ok(None);
                    };
                    let text = value.text();
                    text.parse::<$t>()
                        .map(Some)
                        .map_err(|e| cursor.invalid_value(stringify!($t), text, e))
                }

                fn shape() -> Shape {
                    Shape::Primitive(stringify!($t))
                }
            }
        )+
    };
}

impl_decode_for_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Reads a plain decimal such as `1438220400.25` as whole nanoseconds,
/// rounding past the ninth fractional digit. `None` for anything else,
/// exponent forms included.
fn decimal_epoch_nanos(text: &str) -> Option<i128> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut fraction_nanos = 0;
    let mut scale = NANOS_PER_SECOND;
    for digit in fraction.bytes().take(9) {
        scale /= 10;
        fraction_nanos += i128::from(digit - b'0') * scale;
    }
    if fraction.as_bytes().get(9).is_some_and(|&d| d >= b'5') {
        fraction_nanos += 1;
    }
    let nanos = whole
        .parse::<i128>()
        .ok()?
        .checked_mul(NANOS_PER_SECOND)?
        .checked_add(fraction_nanos)?;
    Some(if negative { -nanos } else { nanos })
}

/// Epoch seconds, fractional part allowed.
impl Decode for OffsetDateTime {
    fn decode(cursor: &mut Cursor<'_>, _: &Registry) -> Result<Option<Self>, DecodeError> {
        let Some(value) = scalar(cursor, "timestamp", numeric)? else {
            return Ok(None);
        };
        let text = value.text();
        let nanos = if let Some(nanos) = decimal_epoch_nanos(text) {
            nanos
        } else {
            let seconds: f64 = text
                .parse()
                .map_err(|e| cursor.invalid_value("timestamp", text, e))?;
            if !seconds.is_finite() {
                return Err(cursor.invalid_value("timestamp", text, "not a finite number"));
            }
            #[allow(clippy::cast_possible_truncation)]
            let nanos = (seconds * 1e9).round() as i128;
            nanos
        };
        OffsetDateTime::from_unix_timestamp_nanos(nanos)
            .map(Some)
            .map_err(|e| cursor.invalid_value("timestamp", text, e))
    }

    fn shape() -> Shape {
        Shape::Primitive("timestamp")
    }
}

/// Binary data carried as a base64 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    /// The raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Blob {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(&self.0))
    }
}

impl Decode for Blob {
    fn decode(cursor: &mut Cursor<'_>, _: &Registry) -> Result<Option<Self>, DecodeError> {
        let Some(value) = scalar(cursor, "blob", |s| matches!(s, Scalar::String(_)))? else {
            return Ok(None);
        };
        let text = value.text();
        BASE64_STANDARD
            .decode(text)
            .map(|bytes| Some(Blob(bytes)))
            .map_err(|e| cursor.invalid_value("blob", text, e))
    }

    fn shape() -> Shape {
        Shape::Primitive("blob")
    }
}
